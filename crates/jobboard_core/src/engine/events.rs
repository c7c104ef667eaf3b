//! Discrete control events accepted by the engine.

use crate::drag::DragOutcome;
use crate::models::SortKey;

/// One user action, mapped 1:1 to an engine operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    SearchTermChanged(String),
    CategoryChanged(String),
    SortKeyChanged(SortKey),
    PageRequested(u32),
    NextPage,
    PreviousPage,
    ResetRequested,
    DragEnded(DragOutcome),
    RefreshRequested,
}

