//! Storage for the steps of a session.

use crate::Operator;
#[cfg(feature = "chrono")]
use chrono::{DateTime, Utc};
use core::fmt::{self, Display, Formatter};
use core::ops::Index;
use core::slice;
use rust_decimal::Decimal;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One completed calculation.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
pub struct Step {
    /// The accumulated value after the step.
    pub result: Decimal,
    /// The operand that was consumed.
    pub operand: Decimal,
    /// The operator that was applied.
    pub operator: Operator,
}

impl Step {
    /// Returns a new step.
    pub const fn new(result: Decimal, operand: Decimal, operator: Operator) -> Step {
        Step {
            result,
            operand,
            operator,
        }
    }
}

impl Display for Step {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{} {} = {}", self.operator, self.operand, self.result)
    }
}

/// Wrapper around a step that contains additional metadata.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct Entry {
    step: Step,
    #[cfg(feature = "chrono")]
    timestamp: DateTime<Utc>,
}

impl Entry {
    /// Returns the step.
    pub fn get(&self) -> &Step {
        &self.step
    }

    /// Returns the time the step was calculated.
    #[cfg(feature = "chrono")]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

impl From<Step> for Entry {
    fn from(step: Step) -> Self {
        Entry {
            step,
            #[cfg(feature = "chrono")]
            timestamp: Utc::now(),
        }
    }
}

impl Display for Entry {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        (&self.step as &dyn Display).fmt(f)
    }
}

/// An ordered record of steps.
///
/// The store only appends and truncates. It knows nothing about which step
/// is currently displayed; that is tracked by the [`Session`](crate::Session).
///
/// # Examples
/// ```
/// # use rust_decimal::Decimal;
/// # use tally::{HistoryStore, Operator, Step};
/// let mut store = HistoryStore::new();
/// store.append(Step::new(Decimal::from(8), Decimal::from(5), Operator::Add));
/// store.append(Step::new(Decimal::from(16), Decimal::from(2), Operator::Multiply));
/// store.append(Step::new(Decimal::from(20), Decimal::from(4), Operator::Add));
/// let tail = store.truncate_after(0);
/// assert_eq!(store.len(), 1);
/// assert_eq!(tail.len(), 2);
/// assert_eq!(store[0].get().result, Decimal::from(8));
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct HistoryStore {
    entries: Vec<Entry>,
}

impl HistoryStore {
    /// Returns a new empty store.
    pub fn new() -> HistoryStore {
        HistoryStore::default()
    }

    /// Returns a new empty store with room for `capacity` steps.
    pub fn with_capacity(capacity: usize) -> HistoryStore {
        HistoryStore {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Adds the step to the tail of the store.
    pub fn append(&mut self, step: Step) {
        self.entries.push(Entry::from(step));
    }

    /// Removes every step after `index`, keeping `0..=index`.
    ///
    /// The removed steps are returned, oldest first. Nothing is removed if
    /// `index` is at or beyond the last step. Use [`clear`](Self::clear) to
    /// remove every step.
    pub fn truncate_after(&mut self, index: usize) -> Vec<Entry> {
        match index.checked_add(1) {
            Some(at) if at < self.entries.len() => self.entries.split_off(at),
            _ => Vec::new(),
        }
    }

    /// Removes every step.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns the entry at `index`, or `None` if it is out of range.
    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    /// Returns the last entry.
    pub fn last(&self) -> Option<&Entry> {
        self.entries.last()
    }

    /// Returns the number of steps in the store.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the store has no steps.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the capacity of the store.
    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    /// Returns an iterator over the entries, oldest first.
    pub fn iter(&self) -> slice::Iter<'_, Entry> {
        self.entries.iter()
    }
}

impl Index<usize> for HistoryStore {
    type Output = Entry;

    fn index(&self, index: usize) -> &Entry {
        &self.entries[index]
    }
}

impl<'a> IntoIterator for &'a HistoryStore {
    type Item = &'a Entry;
    type IntoIter = slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
