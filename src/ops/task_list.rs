use crate::io::store::{Store, StoreError};
use crate::model::{Filter, Task};

/// The last-fetched rows for the active filter. Never patched in place:
/// every change goes through `reload`.
#[derive(Debug, Clone, Default)]
pub struct TaskList {
    filter: Filter,
    tasks: Vec<Task>,
}

impl TaskList {
    /// An empty snapshot for `filter`; call `reload` to populate it
    pub fn new(filter: Filter) -> Self {
        TaskList {
            filter,
            tasks: Vec::new(),
        }
    }

    /// Fetch the rows for `filter` into a fresh snapshot
    pub fn load(store: &Store, filter: Filter) -> Result<Self, StoreError> {
        let mut list = TaskList::new(filter);
        list.reload(store)?;
        Ok(list)
    }

    pub fn filter(&self) -> Filter {
        self.filter
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

    pub fn get(&self, id: i64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Re-run the query for the active filter and replace the snapshot.
    /// On error the previous snapshot is kept.
    pub fn reload(&mut self, store: &Store) -> Result<(), StoreError> {
        self.tasks = store.list(self.filter)?;
        Ok(())
    }

    /// Switch filters and reload. If the reload fails the previous filter
    /// and its snapshot stay in place.
    pub fn set_filter(&mut self, filter: Filter, store: &Store) -> Result<(), StoreError> {
        let previous = self.filter;
        self.filter = filter;
        if let Err(e) = self.reload(store) {
            self.filter = previous;
            return Err(e);
        }
        Ok(())
    }
}
