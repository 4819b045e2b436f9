//! Ordered task container.
//!
//! # Responsibility
//! - Hold tasks in insertion order, which is also display order.
//! - Translate 1-based user indices into positions with bounds checks.
//!
//! # Invariants
//! - Valid indices are always `1..=len()`.
//! - A failed bounds check never mutates the list.
//! - `delete` shifts all following tasks down by one index.

use crate::model::task::Task;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type TaskListResult<T> = Result<T, TaskListError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskListError {
    IndexOutOfRange { index: usize, size: usize },
}

impl Display for TaskListError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IndexOutOfRange { index, size } => {
                write!(f, "task index {index} is outside 1..={size}")
            }
        }
    }
}

impl Error for TaskListError {}

/// Ordered, mutable collection of tasks addressed by 1-based index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Removes and returns the task at 1-based `index`.
    pub fn delete(&mut self, index: usize) -> TaskListResult<Task> {
        let position = self.position(index)?;
        Ok(self.tasks.remove(position))
    }

    /// Marks the task at 1-based `index` as done and returns it.
    pub fn mark(&mut self, index: usize) -> TaskListResult<&Task> {
        let position = self.position(index)?;
        let task = &mut self.tasks[position];
        task.mark_done();
        Ok(task)
    }

    /// Marks the task at 1-based `index` as not done and returns it.
    pub fn unmark(&mut self, index: usize) -> TaskListResult<&Task> {
        let position = self.position(index)?;
        let task = &mut self.tasks[position];
        task.mark_undone();
        Ok(task)
    }

    pub fn get(&self, index: usize) -> Option<&Task> {
        index.checked_sub(1).and_then(|position| self.tasks.get(position))
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    /// Returns `(display_index, task)` pairs with display index = position + 1.
    pub fn list(&self) -> Vec<(usize, &Task)> {
        self.tasks
            .iter()
            .enumerate()
            .map(|(position, task)| (position + 1, task))
            .collect()
    }

    /// Returns tasks whose description contains `keyword`, in list order.
    ///
    /// An empty result is a normal outcome here; callers decide whether it is
    /// a failure.
    pub fn find_by_keyword(&self, keyword: &str) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|task| task.matches(keyword))
            .collect()
    }

    fn position(&self, index: usize) -> TaskListResult<usize> {
        if index == 0 || index > self.tasks.len() {
            return Err(TaskListError::IndexOutOfRange {
                index,
                size: self.tasks.len(),
            });
        }
        Ok(index - 1)
    }
}

impl From<Vec<Task>> for TaskList {
    fn from(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }
}

impl<'a> IntoIterator for &'a TaskList {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}
