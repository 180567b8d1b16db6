pub mod disk;
pub mod memory;

use anyhow::Result;

pub use disk::DiskStore;
pub use memory::MemoryStore;

/// Key holding the transactions snapshot.
pub const TRANSACTIONS_KEY: &str = "bf_tx";
/// Key holding the goals snapshot.
pub const GOALS_KEY: &str = "bf_goals";

/// Durable key-value storage for whole-collection snapshots.
///
/// Each key holds one serialized collection that is overwritten wholesale.
pub trait SnapshotStore {
    /// Returns the stored bytes for `key`, or `None` if it was never written.
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Replaces the value of `key`.
    fn write(&mut self, key: &str, value: Vec<u8>) -> Result<()>;

    /// Removes every key in `keys` as a single unit.
    fn remove_all(&mut self, keys: &[&str]) -> Result<()>;
}
