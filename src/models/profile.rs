use serde::{Deserialize, Serialize};

/// Optional links shown on a profile
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

/// User profile, one document per owner in the "profiles" collection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    pub display_name: String,
    pub bio: String,
    pub avatar: String,
    pub social_links: SocialLinks,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_profile_wire_format() {
        let profile = Profile {
            display_name: "Ivy".to_string(),
            bio: "Advisor".to_string(),
            avatar: String::new(),
            social_links: SocialLinks {
                github: Some("https://github.com/ivy".to_string()),
                ..Default::default()
            },
        };

        let value = serde_json::to_value(&profile).unwrap();
        assert_eq!(
            value,
            json!({
                "displayName": "Ivy",
                "bio": "Advisor",
                "avatar": "",
                "socialLinks": { "github": "https://github.com/ivy" }
            })
        );
    }

    #[test]
    fn test_partial_profile_fills_defaults() {
        let profile: Profile = serde_json::from_str(r#"{"displayName":"Ivy"}"#).unwrap();

        assert_eq!(profile.display_name, "Ivy");
        assert!(profile.bio.is_empty());
        assert_eq!(profile.social_links, SocialLinks::default());
    }
}
