//! Task and to-do item model.
//!
//! Both tasks (within the collection) and items (within a task) carry a
//! 1-based `position`. After any structural change the owning sequence is
//! renumbered so positions are exactly `1..=len` in stored order.

pub mod patch;
pub mod state;
pub mod task;
pub mod timestamp;
pub mod todo;

pub use patch::{TaskPatch, TodoPatch};
pub use state::{ParseStateError, State};
pub use task::{NewTask, Task};
pub use timestamp::parse_timestamp;
pub use todo::ToDoItem;

/// Anything that occupies a slot in a positioned sequence.
pub(crate) trait Positioned {
    fn set_position(&mut self, position: u32);
}

impl Positioned for ToDoItem {
    fn set_position(&mut self, position: u32) {
        ToDoItem::set_position(self, position);
    }
}

impl Positioned for Task {
    fn set_position(&mut self, position: u32) {
        Task::set_position(self, position);
    }
}

/// Reassign `1..=len` in the current order.
pub(crate) fn renumber<T: Positioned>(entries: &mut [T]) {
    for (rank, entry) in (1_u32..).zip(entries.iter_mut()) {
        entry.set_position(rank);
    }
}

/// Zero-based insertion index for a requested 1-based rank.
///
/// `len` is the length of the sequence the entry is being inserted into
/// (i.e. with the entry already removed). Ranks at or below 1 land at the
/// front and ranks past the end land at the back.
#[must_use]
pub fn insertion_index(requested: i64, len: usize) -> usize {
    if requested <= 1 {
        return 0;
    }
    usize::try_from(requested - 1).map_or(len, |index| index.min(len))
}

/// Remove the entry at `from` and reinsert it at the requested rank, then
/// renumber the whole sequence.
pub(crate) fn move_to_rank<T: Positioned>(entries: &mut Vec<T>, from: usize, requested: i64) {
    let entry = entries.remove(from);
    let index = insertion_index(requested, entries.len());
    entries.insert(index, entry);
    renumber(entries);
}

#[cfg(test)]
mod tests {
    use super::insertion_index;

    #[test]
    fn insertion_index_clamps_low_ranks_to_front() {
        assert_eq!(insertion_index(1, 4), 0);
        assert_eq!(insertion_index(0, 4), 0);
        assert_eq!(insertion_index(-7, 4), 0);
    }

    #[test]
    fn insertion_index_clamps_high_ranks_to_back() {
        assert_eq!(insertion_index(5, 4), 4);
        assert_eq!(insertion_index(99, 4), 4);
        assert_eq!(insertion_index(i64::MAX, 0), 0);
    }

    #[test]
    fn insertion_index_in_range() {
        assert_eq!(insertion_index(2, 4), 1);
        assert_eq!(insertion_index(4, 4), 3);
    }
}
