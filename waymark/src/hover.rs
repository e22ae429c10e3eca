//! Classification of pointer-move events against the previous hover set.

/// What a pointer move means for the hover handlers, given the shapes under the pointer before
/// and after the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HoverChange {
    /// Sets are identical, nothing to report.
    Unchanged,

    /// The pointer covers more shapes than before.
    Enter,

    /// The pointer covers fewer shapes than before, possibly none.
    Leave,

    /// Same number of shapes, but not the same shapes. Reported as a leave followed by an
    /// enter, so handlers observe that the hovered shape changed without the count changing.
    LeaveThenEnter,
}

/// Compare the previous and the next hover set. Both are expected to be ordered the same way
/// (topmost shape first), so plain sequence equality detects content changes.
pub(crate) fn classify(prev: &[usize], next: &[usize]) -> HoverChange {
    use std::cmp::Ordering;

    match next.len().cmp(&prev.len()) {
        Ordering::Greater => HoverChange::Enter,
        Ordering::Less => HoverChange::Leave,
        Ordering::Equal if prev != next => HoverChange::LeaveThenEnter,
        Ordering::Equal => HoverChange::Unchanged,
    }
}
