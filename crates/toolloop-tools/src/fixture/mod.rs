//! Number Table Fixture
//!
//! Key-value data source read by the `findNumberValue` tool. Injected as a
//! capability so tests can swap in a fixed table.

mod seeded;

pub use seeded::{DEFAULT_KEY_COUNT, SeededNumberTable};

use async_trait::async_trait;

/// Read-only integer lookup table (Strategy pattern)
#[async_trait]
pub trait NumberTable: Send + Sync {
    /// Value stored for `key`, if any
    async fn get(&self, key: u32) -> Option<u32>;

    /// Number of stored keys
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Table name for logs
    fn name(&self) -> &str;
}
