//! Plain-text job cards and board chrome.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use jobboard_core::engine::{ReconciliationEngine, ViewStatus, SORT_LOCKED_HINT};
use jobboard_core::models::{Job, UNKNOWN};
use jobboard_core::prefs::PreferenceStore;
use jobboard_core::source::JobSource;

const NOT_SPECIFIED: &str = "Not specified";

fn format_date(date: Option<DateTime<Utc>>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

/// Comma-joined skill names.
pub fn skills_line(job: &Job) -> String {
    job.skills
        .iter()
        .map(|s| s.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// First date range's lower bound, as a date when it parses.
pub fn start_date_line(job: &Job) -> String {
    match job.start_date() {
        Some(date) => format_date(Some(date)),
        None => job
            .ranges_date
            .first()
            .and_then(|r| r.value_min.clone())
            .filter(|raw| !raw.trim().is_empty())
            .unwrap_or_else(|| NOT_SPECIFIED.to_string()),
    }
}

/// One card: `position. name` with the creation date, plus details when
/// expanded.
pub fn job_card(position: usize, job: &Job, expanded: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:>3}. {}", position, job.name);
    let _ = writeln!(out, "     Created at: {}", format_date(job.created_at));

    if expanded {
        let _ = writeln!(
            out,
            "     Description: {}",
            job.summary.as_deref().unwrap_or("")
        );
        let _ = writeln!(out, "     Skills: {}", skills_line(job));
        let _ = writeln!(out, "     Start Date: {}", start_date_line(job));
        let _ = writeln!(out, "     Category: {}", job.category_or_unknown());
        let _ = writeln!(
            out,
            "     Company: {}",
            job.company().unwrap_or(UNKNOWN)
        );
    }
    out
}

/// `Page X of Y` with the available directions.
pub fn pagination_line(page: u32, total_pages: u32, has_prev: bool, has_next: bool) -> String {
    let prev = if has_prev { "< prev" } else { "      " };
    let next = if has_next { "next >" } else { "" };
    format!("{}  Page {} of {}  {}", prev, page, total_pages, next)
        .trim_end()
        .to_string()
}

/// Whole board: selection summary, status message, cards, pagination.
pub fn board<S, P>(
    engine: &ReconciliationEngine<S, P>,
    is_expanded: impl Fn(usize) -> bool,
) -> String
where
    S: JobSource,
    P: PreferenceStore,
{
    let selection = engine.selection();
    let mut out = String::new();

    let search = if selection.search_term.is_empty() {
        "-".to_string()
    } else {
        format!("\"{}\"", selection.search_term)
    };
    let sort = if engine.is_sort_locked() {
        format!("manual order ({})", SORT_LOCKED_HINT)
    } else {
        selection.sort_key.label().to_string()
    };
    let _ = writeln!(
        out,
        "Search: {}  Category: {}  Sort: {}",
        search, selection.category, sort
    );

    let status = engine.view_status();
    if let Some(message) = status.message() {
        let _ = writeln!(out, "{}", message);
    }

    if !matches!(status, ViewStatus::Loading) {
        for (i, job) in engine.displayed_jobs().iter().enumerate() {
            out.push_str(&job_card(i + 1, job, is_expanded(i)));
        }
    }

    if engine.shows_pagination() {
        let _ = writeln!(
            out,
            "{}",
            pagination_line(
                selection.page,
                engine.total_pages(),
                engine.has_previous_page(),
                engine.has_next_page()
            )
        );
    }
    out
}
