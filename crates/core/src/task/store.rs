//! Task store
//!
//! Owns the authoritative, ordered task collection and provides the only
//! sanctioned mutation operations. Every mutation is written to the backing
//! store before the call returns; when a write fails, the in-memory change
//! has already been applied and the error tells the caller that disk is now
//! behind memory.

use super::model::{FilterMode, Priority, Progress, Task};
use super::storage::TaskStorage;
use crate::{Error, Result};

/// In-memory task collection with write-through persistence
pub struct TaskStore<S> {
    tasks: Vec<Task>,
    storage: S,
}

impl<S: TaskStorage> TaskStore<S> {
    /// Create a store, loading any previously persisted collection.
    pub fn new(storage: S) -> Self {
        let tasks = storage.load();
        Self { tasks, storage }
    }

    /// Append a new task with the given text and priority.
    ///
    /// Empty text is a silent no-op returning `Ok(None)`; callers are
    /// expected to validate input, the store just refuses to record it.
    pub fn add(&mut self, text: impl Into<String>, priority: Priority) -> Result<Option<Task>> {
        let text = text.into();
        if text.is_empty() {
            return Ok(None);
        }

        let task = Task::new(text, priority);
        self.tasks.push(task.clone());
        self.storage.save(&self.tasks)?;
        Ok(Some(task))
    }

    /// Set the completion flag of the task at `position`.
    pub fn set_completed(&mut self, position: usize, value: bool) -> Result<()> {
        let len = self.tasks.len();
        let task = self
            .tasks
            .get_mut(position)
            .ok_or(Error::OutOfRange { position, len })?;
        task.completed = value;
        self.storage.save(&self.tasks)
    }

    /// Remove and return the task at `position`.
    ///
    /// All subsequent positions shift down by one; positions held by the
    /// caller are stale after this returns and must be recomputed.
    pub fn delete_at(&mut self, position: usize) -> Result<Task> {
        if position >= self.tasks.len() {
            return Err(Error::OutOfRange {
                position,
                len: self.tasks.len(),
            });
        }

        let task = self.tasks.remove(position);
        self.storage.save(&self.tasks)?;
        Ok(task)
    }

    /// Remove every completed task, preserving the order of the rest.
    ///
    /// Returns the number of tasks removed. Always succeeds; when nothing
    /// was completed the redundant write is skipped.
    pub fn clear_completed(&mut self) -> Result<usize> {
        let before = self.tasks.len();
        self.tasks.retain(|task| !task.completed);
        let removed = before - self.tasks.len();

        if removed > 0 {
            self.storage.save(&self.tasks)?;
        }
        Ok(removed)
    }

    /// Tasks matching `mode`, in collection order. Pure read.
    pub fn filter(&self, mode: FilterMode) -> Vec<Task> {
        self.tasks
            .iter()
            .filter(|task| mode.matches(task))
            .cloned()
            .collect()
    }

    /// Completion counts over the whole collection. Pure read.
    pub fn progress(&self) -> Progress {
        Progress {
            completed: self.tasks.iter().filter(|task| task.completed).count(),
            total: self.tasks.len(),
        }
    }

    /// All tasks in collection order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::FileTaskStore;
    use tempfile::TempDir;

    fn create_test_store() -> (TaskStore<FileTaskStore>, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileTaskStore::new(temp_dir.path().join("tasks.json"));
        (TaskStore::new(storage), temp_dir)
    }

    /// Storage stub whose saves always fail
    struct FailingStorage;

    impl TaskStorage for FailingStorage {
        fn load(&self) -> Vec<Task> {
            Vec::new()
        }

        fn save(&self, _tasks: &[Task]) -> Result<()> {
            Err(Error::Persistence("disk full".to_string()))
        }
    }

    #[test]
    fn test_empty_store() {
        let (store, _temp) = create_test_store();

        assert!(store.is_empty());
        assert_eq!(store.progress(), Progress { completed: 0, total: 0 });
        assert!(store.filter(FilterMode::All).is_empty());
    }

    #[test]
    fn test_add_task() {
        let (mut store, _temp) = create_test_store();

        let task = store.add("Write spec", Priority::High).unwrap().unwrap();
        assert_eq!(task.text, "Write spec");
        assert!(!task.completed);
        assert_eq!(task.priority, "high");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let (mut store, _temp) = create_test_store();

        store.add("First", Priority::Low).unwrap();
        store.add("Second", Priority::High).unwrap();
        store.add("Third", Priority::Medium).unwrap();

        let all = store.filter(FilterMode::All);
        assert_eq!(all[0].text, "First");
        assert_eq!(all[1].text, "Second");
        assert_eq!(all[2].text, "Third");
    }

    #[test]
    fn test_add_empty_text_is_noop() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tasks.json");
        let mut store = TaskStore::new(FileTaskStore::new(&path));

        let created = store.add("", Priority::High).unwrap();
        assert!(created.is_none());
        assert!(store.is_empty());
        // A no-op must not touch the backing store
        assert!(!path.exists());
    }

    #[test]
    fn test_add_then_toggle() {
        let (mut store, _temp) = create_test_store();

        store.add("Write spec", Priority::High).unwrap();
        store.set_completed(0, true).unwrap();

        assert_eq!(store.len(), 1);
        assert!(store.tasks()[0].completed);
        assert_eq!(store.progress(), Progress { completed: 1, total: 1 });
    }

    #[test]
    fn test_set_completed_out_of_range() {
        let (mut store, _temp) = create_test_store();
        store.add("Only task", Priority::Medium).unwrap();

        let result = store.set_completed(1, true);
        assert!(matches!(
            result,
            Err(Error::OutOfRange { position: 1, len: 1 })
        ));
        // No partial mutation
        assert!(!store.tasks()[0].completed);
    }

    #[test]
    fn test_delete_shifts_positions() {
        let (mut store, _temp) = create_test_store();

        store.add("Task 0", Priority::Medium).unwrap();
        store.add("Task 1", Priority::Medium).unwrap();
        store.add("Task 2", Priority::Medium).unwrap();

        let removed = store.delete_at(0).unwrap();
        assert_eq!(removed.text, "Task 0");
        assert_eq!(store.tasks()[0].text, "Task 1");

        // The old last position is now out of range
        let result = store.delete_at(2);
        assert!(matches!(
            result,
            Err(Error::OutOfRange { position: 2, len: 2 })
        ));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_clear_completed() {
        let (mut store, _temp) = create_test_store();

        store.add("Keep 1", Priority::High).unwrap();
        store.add("Drop 1", Priority::Medium).unwrap();
        store.add("Keep 2", Priority::Low).unwrap();
        store.add("Drop 2", Priority::Low).unwrap();
        store.set_completed(1, true).unwrap();
        store.set_completed(3, true).unwrap();

        let removed = store.clear_completed().unwrap();
        assert_eq!(removed, 2);

        let remaining = store.filter(FilterMode::All);
        assert_eq!(remaining.len(), 2);
        assert_eq!(remaining[0].text, "Keep 1");
        assert_eq!(remaining[1].text, "Keep 2");
    }

    #[test]
    fn test_clear_completed_is_idempotent() {
        let (mut store, _temp) = create_test_store();

        store.add("Done", Priority::Medium).unwrap();
        store.add("Open", Priority::Medium).unwrap();
        store.set_completed(0, true).unwrap();

        assert_eq!(store.clear_completed().unwrap(), 1);
        let after_first = store.filter(FilterMode::All);

        assert_eq!(store.clear_completed().unwrap(), 0);
        assert_eq!(store.filter(FilterMode::All), after_first);
    }

    #[test]
    fn test_filter_partition() {
        let (mut store, _temp) = create_test_store();

        store.add("a", Priority::High).unwrap();
        store.add("b", Priority::Medium).unwrap();
        store.add("c", Priority::Low).unwrap();
        store.set_completed(1, true).unwrap();

        let all = store.filter(FilterMode::All);
        let active = store.filter(FilterMode::Active);
        let completed = store.filter(FilterMode::Completed);

        assert_eq!(active.len() + completed.len(), all.len());
        for task in &active {
            assert!(!task.completed);
            assert!(all.contains(task));
        }
        for task in &completed {
            assert!(task.completed);
            assert!(all.contains(task));
        }
    }

    #[test]
    fn test_progress_invariant() {
        let (mut store, _temp) = create_test_store();

        store.add("a", Priority::High).unwrap();
        store.add("b", Priority::Medium).unwrap();
        store.add("c", Priority::Low).unwrap();
        store.set_completed(2, true).unwrap();

        let progress = store.progress();
        assert!(progress.completed <= progress.total);
        assert_eq!(progress.total, store.filter(FilterMode::All).len());
        assert_eq!(progress.completed, store.filter(FilterMode::Completed).len());
    }

    #[test]
    fn test_persistence_across_instances() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tasks.json");

        {
            let mut store = TaskStore::new(FileTaskStore::new(&path));
            store.add("Persistent task", Priority::High).unwrap();
            store.add("Second task", Priority::Low).unwrap();
            store.set_completed(0, true).unwrap();
        }

        let store = TaskStore::new(FileTaskStore::new(&path));
        assert_eq!(store.len(), 2);
        assert_eq!(store.tasks()[0].text, "Persistent task");
        assert!(store.tasks()[0].completed);
        assert_eq!(store.tasks()[1].priority, "low");
    }

    #[test]
    fn test_save_failure_keeps_memory_mutated() {
        let mut store = TaskStore::new(FailingStorage);

        let result = store.add("Doomed task", Priority::Medium);
        assert!(matches!(result, Err(Error::Persistence(_))));

        // Memory is ahead of disk, not rolled back
        assert_eq!(store.len(), 1);
        assert_eq!(store.tasks()[0].text, "Doomed task");
    }
}
