//! Maps front-end commands onto engine events.

use anyhow::{anyhow, bail, Result};
use jobboard_core::drag::DragOutcome;
use jobboard_core::engine::{Event, ReconciliationEngine, SORT_LOCKED_HINT};
use jobboard_core::models::ALL_CATEGORIES;
use jobboard_core::prefs::PreferenceStore;
use jobboard_core::source::JobSource;

use crate::args::Command;

/// What to print after a command ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Board,
    /// One expanded card, by 0-based display index.
    Card(usize),
}

/// Apply `command` to an initialized engine.
///
/// `Categories` and `Shell` are handled by the caller and leave the engine
/// untouched.
pub async fn apply<S, P>(
    engine: &mut ReconciliationEngine<S, P>,
    command: &Command,
    categories: &[String],
) -> Result<View>
where
    S: JobSource,
    P: PreferenceStore,
{
    let shown = engine.displayed_jobs().len();

    let event = match command {
        Command::List | Command::Categories | Command::Shell => return Ok(View::Board),
        Command::Show { index } => return Ok(View::Card(to_index(*index, shown)?)),
        Command::Search { term } => Event::SearchTermChanged(term.clone()),
        Command::Category { name } => {
            let category = resolve_category(name, categories).ok_or_else(|| {
                anyhow!(
                    "Unknown category '{}'. Available: {}",
                    name,
                    categories.join(", ")
                )
            })?;
            Event::CategoryChanged(category)
        }
        Command::Sort { key } => {
            if engine.is_sort_locked() {
                bail!(SORT_LOCKED_HINT);
            }
            Event::SortKeyChanged(*key)
        }
        Command::Page { number } => {
            if *number == 0 {
                bail!("Pages start at 1");
            }
            Event::PageRequested(*number)
        }
        Command::Move { from, to } => {
            if engine.is_drag_disabled() {
                bail!("Reordering is only available when the category is {}", ALL_CATEGORIES);
            }
            let outcome = DragOutcome::new(to_index(*from, shown)?, to_index(*to, shown)?);
            Event::DragEnded(outcome)
        }
        Command::Reset => Event::ResetRequested,
    };

    engine.handle(event).await;
    Ok(View::Board)
}

/// Canonical spelling of `name` among the configured categories.
///
/// With no configured categories any name is accepted as-is.
pub fn resolve_category(name: &str, categories: &[String]) -> Option<String> {
    if name.eq_ignore_ascii_case(ALL_CATEGORIES) {
        return Some(ALL_CATEGORIES.to_string());
    }
    if categories.is_empty() {
        return Some(name.to_string());
    }
    categories
        .iter()
        .find(|c| c.eq_ignore_ascii_case(name.trim()))
        .cloned()
}

/// 1-based position to 0-based index within `len` cards.
pub fn to_index(position: usize, len: usize) -> Result<usize> {
    if position == 0 || position > len {
        bail!("No job at position {} ({} shown)", position, len);
    }
    Ok(position - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories() -> Vec<String> {
        vec!["All".to_string(), "Human Resources".to_string()]
    }

    #[test]
    fn resolves_case_insensitively() {
        assert_eq!(
            resolve_category("human resources", &categories()),
            Some("Human Resources".to_string())
        );
        assert_eq!(resolve_category("all", &categories()), Some("All".to_string()));
        assert_eq!(resolve_category("Sales", &categories()), None);
        assert_eq!(resolve_category("Sales", &[]), Some("Sales".to_string()));
    }

    #[test]
    fn positions_are_one_based() {
        assert_eq!(to_index(1, 3).unwrap(), 0);
        assert_eq!(to_index(3, 3).unwrap(), 2);
        assert!(to_index(0, 3).is_err());
        assert!(to_index(4, 3).is_err());
    }
}
