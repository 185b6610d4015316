//! Print list types persisted as the "last print" snapshot.
//!
//! A [`PrintList`] is an owned copy of the tasks chosen for one print
//! session. It is detached from the task list the moment it is built, so
//! editing or removing a task afterwards never changes a saved print.
//!
//! The serialized field names (`tarefa`, `avaliar`) are the on-disk names
//! used by existing snapshot files and must not change.

use serde::{Deserialize, Serialize};

/// Text of the rating line printed under tasks flagged for evaluation.
pub const RATING_LINE: &str = "[ ] Ruim   [ ] Médio   [ ] Bom";

/// One task copied into a print session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrintItem {
    /// Task text at selection time.
    #[serde(rename = "tarefa")]
    pub task: String,
    /// Whether a rating line is printed under the task.
    #[serde(rename = "avaliar", default)]
    pub evaluate: bool,
}

impl PrintItem {
    /// Creates a print item from task text and its evaluate flag.
    pub fn new(task: impl Into<String>, evaluate: bool) -> Self {
        Self {
            task: task.into(),
            evaluate,
        }
    }
}

/// Ordered content of one print session.
///
/// Order is the order the user selected tasks in, not task-list order.
/// Duplicates are allowed and print the same task more than once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrintList(Vec<PrintItem>);

impl PrintList {
    /// Creates an empty print list.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends an item at the end of the list.
    pub fn push(&mut self, item: PrintItem) {
        self.0.push(item);
    }

    /// Returns the number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the list has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over items in print order.
    pub fn iter(&self) -> std::slice::Iter<'_, PrintItem> {
        self.0.iter()
    }

    /// Returns the items as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[PrintItem] {
        &self.0
    }
}

impl From<Vec<PrintItem>> for PrintList {
    fn from(items: Vec<PrintItem>) -> Self {
        Self(items)
    }
}

impl FromIterator<PrintItem> for PrintList {
    fn from_iter<I: IntoIterator<Item = PrintItem>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a PrintList {
    type Item = &'a PrintItem;
    type IntoIter = std::slice::Iter<'a, PrintItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
