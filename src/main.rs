use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mentorx_docstore::constants::{COLLECTION_PROFILES, COLLECTION_SETTINGS, COLLECTION_TODOS};
use mentorx_docstore::store::InMemoryStore;
use mentorx_docstore::{
    Config, DocumentStoreClient, HostState, Profile, Settings, SyncedCollection, SyncedDocument,
    Todo,
};

/// Owner used for the local session
const DEMO_OWNER: &str = "xion1mentorxdemo";

/// How long the simulated chain takes to make a write visible
const DEMO_SETTLEMENT_LAG: Duration = Duration::from_millis(1500);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mentorx_docstore=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting MentorX document store session...");

    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!(
        "Environment: {}, Contract: {}",
        config.environment,
        config.contract_address
    );

    let store = Arc::new(
        InMemoryStore::new(config.contract_address.clone())
            .with_settlement_lag(DEMO_SETTLEMENT_LAG),
    );
    let client = DocumentStoreClient::new(config)?
        .with_query_client(store.clone())
        .with_signing_client(store.clone());

    // Settings
    let mut settings: SyncedDocument<Settings> =
        SyncedDocument::new(client.clone(), DEMO_OWNER, COLLECTION_SETTINGS);
    let loaded = settings.load().await?.clone();
    tracing::info!("Settings: {:?}", loaded);
    settings
        .save(Settings {
            dark_mode: true,
            ..loaded
        })
        .await?;

    // Profile
    let mut profile: SyncedDocument<Profile> =
        SyncedDocument::new(client.clone(), DEMO_OWNER, COLLECTION_PROFILES);
    profile.load().await?;
    profile
        .save(Profile {
            display_name: "MentorX Demo".to_string(),
            bio: "Exploring mentor reviews".to_string(),
            ..Default::default()
        })
        .await?;

    // Todos
    let mut todos: SyncedCollection<Todo> =
        SyncedCollection::new(client, DEMO_OWNER, COLLECTION_TODOS);
    todos.refresh().await?;

    let (first, confirmation) = todos.add(Todo::new("Read reviews for Prof. Ivy")).await?;
    tracing::info!("Added todo {} ({:?})", first, confirmation);
    let (second, _) = todos.add(Todo::new("Write a review")).await?;

    todos.toggle(&first).await?;
    todos.remove(&second).await?;

    // Host came back to the foreground after the writes settled
    tokio::time::sleep(DEMO_SETTLEMENT_LAG).await;
    todos.handle_host_state(HostState::Active).await?;
    for (id, todo) in todos.newest_first() {
        tracing::info!(
            "[{}] {} {}",
            if todo.completed { "x" } else { " " },
            id,
            todo.title
        );
    }

    tracing::info!(
        "Session complete: {} queries, {} transactions",
        store.query_calls(),
        store.execute_calls()
    );

    Ok(())
}
