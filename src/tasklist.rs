use crate::models::Task;

/// Snapshot of the most recently completed task, kept so a single undo can
/// restore it at its old position.
#[derive(Debug, Clone)]
pub struct PendingUndo {
    pub task: Task,
    pub index: usize,
}

/// State of the visible task list: only tasks with `done == false`, plus at
/// most one pending-undo slot.
///
/// All methods are pure state transitions. The TUI drives the corresponding
/// server requests and applies a transition only after the request succeeds,
/// so a failed request leaves this state untouched.
#[derive(Debug, Clone, Default)]
pub struct TaskList {
    tasks: Vec<Task>,
    pending_undo: Option<PendingUndo>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    pub fn has_pending_undo(&self) -> bool {
        self.pending_undo.is_some()
    }

    pub fn pending_undo(&self) -> Option<&PendingUndo> {
        self.pending_undo.as_ref()
    }

    /// Replace the whole list from a server fetch, keeping only not-done
    /// tasks. Does not touch the undo slot.
    pub fn replace_all(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks.into_iter().filter(|task| !task.done).collect();
    }

    /// Append a task returned by a successful create request.
    pub fn appended(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Remove the task at `index` after a successful removal request,
    /// snapshotting it into the undo slot. A previous snapshot is discarded;
    /// there is at most one undo candidate at a time.
    ///
    /// Returns the removed task, or None if the index is out of bounds.
    pub fn completed(&mut self, index: usize) -> Option<Task> {
        if index >= self.tasks.len() {
            return None;
        }
        let task = self.tasks.remove(index);
        self.pending_undo = Some(PendingUndo {
            task: task.clone(),
            index,
        });
        Some(task)
    }

    /// Re-insert the task returned by a successful undo create request at the
    /// remembered position (clamped to the current length) and clear the
    /// slot. Returns false if there was nothing to undo.
    pub fn undone(&mut self, created: Task) -> bool {
        match self.pending_undo.take() {
            Some(pending) => {
                let index = pending.index.min(self.tasks.len());
                self.tasks.insert(index, created);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(description: &str) -> Task {
        Task::new(
            description.to_string(),
            "2024-01-01".to_string(),
            "2024-01-10".to_string(),
        )
    }

    fn server_task(id: i64, description: &str) -> Task {
        Task {
            id: Some(id),
            ..task(description)
        }
    }

    #[test]
    fn replace_all_keeps_only_not_done_tasks() {
        let mut list = TaskList::new();
        let mut done = server_task(1, "already finished");
        done.done = true;
        list.replace_all(vec![done, server_task(2, "open")]);

        assert_eq!(list.len(), 1);
        assert_eq!(list.get(0).unwrap().description, "open");
    }

    #[test]
    fn each_append_grows_the_list_by_one() {
        let mut list = TaskList::new();
        for i in 0..4 {
            let before = list.len();
            list.appended(server_task(i, "buy milk"));
            assert_eq!(list.len(), before + 1);
        }
    }

    #[test]
    fn append_to_empty_list_yields_exactly_that_task() {
        let mut list = TaskList::new();
        list.appended(server_task(1, "buy milk"));

        assert_eq!(list.len(), 1);
        let task = list.get(0).unwrap();
        assert_eq!(task.description, "buy milk");
        assert_eq!(task.start_date, "2024-01-01");
        assert_eq!(task.deadline, "2024-01-10");
        assert!(!task.done);
    }

    #[test]
    fn complete_then_undo_restores_content_and_order() {
        let mut list = TaskList::new();
        list.appended(server_task(1, "first"));
        list.appended(server_task(2, "second"));
        list.appended(server_task(3, "third"));
        let before = list.tasks().to_vec();

        let removed = list.completed(1).unwrap();
        assert_eq!(removed.description, "second");
        assert_eq!(list.len(), 2);

        // The server re-creates the task; same content, new id.
        let recreated = server_task(9, "second");
        assert!(list.undone(recreated.clone()));

        assert_eq!(list.len(), 3);
        assert_eq!(list.get(1).unwrap().description, "second");
        let descriptions: Vec<_> = list.tasks().iter().map(|t| &t.description).collect();
        let expected: Vec<_> = before.iter().map(|t| &t.description).collect();
        assert_eq!(descriptions, expected);
        assert!(!list.has_pending_undo());
    }

    #[test]
    fn complete_at_zero_then_undo_restores_index_zero() {
        let mut list = TaskList::new();
        list.appended(server_task(1, "only"));

        list.completed(0).unwrap();
        assert!(list.is_empty());

        assert!(list.undone(server_task(2, "only")));
        assert_eq!(list.len(), 1);
        assert_eq!(list.get(0).unwrap().description, "only");
    }

    #[test]
    fn second_completion_discards_first_undo_slot() {
        let mut list = TaskList::new();
        list.appended(server_task(1, "a"));
        list.appended(server_task(2, "b"));

        list.completed(0).unwrap(); // a
        list.completed(0).unwrap(); // b supersedes a in the slot

        let pending = list.pending_undo().unwrap();
        assert_eq!(pending.task.description, "b");

        assert!(list.undone(server_task(3, "b")));
        let descriptions: Vec<_> = list.tasks().iter().map(|t| t.description.as_str()).collect();
        assert_eq!(descriptions, vec!["b"]);
        // nothing left to undo; a is gone for good
        assert!(!list.undone(server_task(4, "a")));
    }

    #[test]
    fn undo_with_empty_slot_is_a_noop() {
        let mut list = TaskList::new();
        assert!(!list.undone(server_task(1, "ghost")));
        assert!(list.is_empty());
    }

    #[test]
    fn out_of_bounds_completion_changes_nothing() {
        let mut list = TaskList::new();
        list.appended(server_task(1, "a"));
        assert!(list.completed(5).is_none());
        assert_eq!(list.len(), 1);
        assert!(!list.has_pending_undo());
    }

    #[test]
    fn undo_index_is_clamped_when_the_list_shrank() {
        let mut list = TaskList::new();
        list.appended(server_task(1, "a"));
        list.appended(server_task(2, "b"));
        list.appended(server_task(3, "c"));

        list.completed(2).unwrap(); // remembers index 2
        list.replace_all(vec![server_task(1, "a")]); // refresh shrank the list

        assert!(list.undone(server_task(4, "c")));
        let descriptions: Vec<_> = list.tasks().iter().map(|t| t.description.as_str()).collect();
        assert_eq!(descriptions, vec!["a", "c"]);
    }
}
