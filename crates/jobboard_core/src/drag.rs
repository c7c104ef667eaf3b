//! Translating a finished drag gesture into a new display order.

use crate::models::Job;

/// Where a dragged card started and where it was dropped.
///
/// `destination` is `None` when the card was dropped outside the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragOutcome {
    pub source: usize,
    pub destination: Option<usize>,
}

impl DragOutcome {
    /// A drop at `destination` inside the list.
    pub fn new(source: usize, destination: usize) -> Self {
        Self {
            source,
            destination: Some(destination),
        }
    }
}

/// Compute the list after a drag, or `None` when the drag changes nothing.
///
/// The move removes the card at `source` and reinserts it at
/// `destination`; cards in between shift by one.
pub fn on_drag_end(outcome: DragOutcome, current: &[Job], drag_disabled: bool) -> Option<Vec<Job>> {
    if drag_disabled {
        tracing::debug!("Drag ignored: manual ordering is disabled for this category");
        return None;
    }

    let from = outcome.source;
    let to = outcome.destination?;

    if from == to || from >= current.len() || to >= current.len() {
        return None;
    }

    let mut reordered = current.to_vec();
    let job = reordered.remove(from);
    reordered.insert(to, job);
    Some(reordered)
}
