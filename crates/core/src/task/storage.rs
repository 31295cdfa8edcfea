//! Task storage trait
//!
//! Defines the interface between the task store and its backing store.

use super::model::Task;
use crate::Result;

/// Persistence seam for the task collection
pub trait TaskStorage {
    /// Read the stored collection.
    ///
    /// A missing backing store is a normal state and yields an empty
    /// collection. Unreadable or malformed contents also yield an empty
    /// collection; the condition is reported as a warning, not an error.
    fn load(&self) -> Vec<Task>;

    /// Overwrite the stored collection with `tasks`.
    fn save(&self, tasks: &[Task]) -> Result<()>;
}
