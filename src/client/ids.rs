use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

/// Issues document ids for multi-item collections
///
/// Ids are Unix-millisecond timestamps. Two ids issued within the same
/// millisecond, or after the wall clock stepped back, are bumped so the
/// sequence stays strictly increasing.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicI64,
}

/// Shared by every client in the process
static PROCESS_IDS: IdGenerator = IdGenerator::new();

impl IdGenerator {
    pub const fn new() -> Self {
        Self {
            last: AtomicI64::new(0),
        }
    }

    /// Generator used by all clients, so separately built clients never
    /// hand out the same id
    pub fn process() -> &'static IdGenerator {
        &PROCESS_IDS
    }

    pub fn next_id(&self) -> String {
        self.next_at(Utc::now().timestamp_millis()).to_string()
    }

    fn next_at(&self, now_millis: i64) -> i64 {
        let mut current = self.last.load(Ordering::SeqCst);
        loop {
            let candidate = if now_millis > current {
                now_millis
            } else {
                current + 1
            };
            match self.last.compare_exchange(
                current,
                candidate,
                Ordering::SeqCst,
                Ordering::SeqCst,
            ) {
                Ok(_) => return candidate,
                Err(actual) => current = actual,
            }
        }
    }
}
