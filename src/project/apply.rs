//! Writing previewed rows back to the host, one batch at a time.
//!
//! A batch is committed when at least one row changed and rolled back
//! otherwise. A failing row never stops the rest of the batch.

use crate::error::{BimTextError, Result};
use crate::finder::scope::{DocumentSource, PreviewRow, RowTarget, ViewField};
use log::{debug, warn};
use serde::Serialize;
use std::collections::HashSet;

/// Write side of the host document.
pub trait DocumentHost: DocumentSource {
    /// Current value of the targeted field, `None` if the element is gone.
    fn current_text(&self, target: &RowTarget) -> Option<String>;

    fn write(&mut self, target: &RowTarget, text: &str) -> Result<()>;

    /// Names of every view in the document.
    fn view_names(&self) -> Vec<String>;

    fn commit(&mut self) -> Result<()>;

    fn rollback(&mut self);
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub changed: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl BatchSummary {
    fn record(&mut self, outcome: &RowOutcome) {
        match outcome {
            RowOutcome::Changed => self.changed += 1,
            RowOutcome::Skipped => self.skipped += 1,
            RowOutcome::Failed(_) => self.failed += 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    Changed,
    Skipped,
    Failed(String),
}

/// Apply every row not yet applied.
pub fn apply_all<H: DocumentHost + ?Sized>(host: &mut H, rows: &mut [PreviewRow]) -> Result<BatchSummary> {
    apply_all_with(host, rows, |_, _| {})
}

/// [`apply_all`], reporting each row's outcome as it happens.
pub fn apply_all_with<H, F>(host: &mut H, rows: &mut [PreviewRow], mut on_row: F) -> Result<BatchSummary>
where
    H: DocumentHost + ?Sized,
    F: FnMut(&PreviewRow, &RowOutcome),
{
    let indices: Vec<usize> = (0..rows.len()).collect();
    run_batch(host, rows, &indices, &mut on_row)
}

/// Apply the rows at `indices` in a single batch.
///
/// Once a row is written, every other row targeting the same field is
/// marked applied too.
pub fn apply_selected<H: DocumentHost + ?Sized>(
    host: &mut H,
    rows: &mut [PreviewRow],
    indices: &[usize],
) -> Result<BatchSummary> {
    if let Some(&bad) = indices.iter().find(|&&i| i >= rows.len()) {
        return Err(BimTextError::RowOutOfRange(bad));
    }

    let summary = run_batch(host, rows, indices, &mut ignore_outcome)?;

    let written: Vec<RowTarget> = indices
        .iter()
        .filter(|&&i| rows[i].applied)
        .map(|&i| rows[i].target.clone())
        .collect();
    for row in rows.iter_mut() {
        if written.iter().any(|t| t.same_field(&row.target)) {
            row.applied = true;
        }
    }

    Ok(summary)
}

fn ignore_outcome(_: &PreviewRow, _: &RowOutcome) {}

fn run_batch<H, F>(
    host: &mut H,
    rows: &mut [PreviewRow],
    indices: &[usize],
    on_row: &mut F,
) -> Result<BatchSummary>
where
    H: DocumentHost + ?Sized,
    F: FnMut(&PreviewRow, &RowOutcome),
{
    let mut summary = BatchSummary::default();
    let mut taken: HashSet<String> = host.view_names().iter().map(|n| n.to_lowercase()).collect();

    for &idx in indices {
        let row = &mut rows[idx];
        let outcome = apply_row(host, row, &mut taken);
        if let RowOutcome::Failed(reason) = &outcome {
            warn!("{}: {}", row.target, reason);
        }
        summary.record(&outcome);
        on_row(row, &outcome);
    }

    if summary.changed > 0 {
        host.commit()?;
    } else {
        host.rollback();
    }
    debug!(
        "Batch done: {} changed, {} skipped, {} failed",
        summary.changed, summary.skipped, summary.failed
    );
    Ok(summary)
}

fn apply_row<H: DocumentHost + ?Sized>(
    host: &mut H,
    row: &mut PreviewRow,
    taken: &mut HashSet<String>,
) -> RowOutcome {
    if row.applied {
        return RowOutcome::Skipped;
    }

    let proposed = row.replaced_text.trim().to_string();
    if proposed.is_empty() {
        return RowOutcome::Failed("proposed text is empty".to_string());
    }

    let Some(current) = host.current_text(&row.target) else {
        return RowOutcome::Failed("element not found".to_string());
    };

    let is_view_name = matches!(
        row.target,
        RowTarget::ViewTitle {
            field: ViewField::Name,
            ..
        }
    );

    if matches!(row.target, RowTarget::SheetName { .. }) && current == proposed {
        row.applied = true;
        return RowOutcome::Skipped;
    }

    let actual = if is_view_name {
        taken.remove(&current.to_lowercase());
        unique_view_name(&proposed, taken)
    } else {
        proposed
    };

    match host.write(&row.target, &actual) {
        Ok(()) => {
            if is_view_name {
                taken.insert(actual.to_lowercase());
                row.replaced_text = actual;
            }
            row.applied = true;
            RowOutcome::Changed
        }
        Err(e) => {
            if is_view_name {
                taken.insert(current.to_lowercase());
            }
            RowOutcome::Failed(e.to_string())
        }
    }
}

/// `proposed`, or the first free "proposed (n)" for n >= 2.
///
/// `taken` holds lower-cased names; comparison ignores case.
pub fn unique_view_name(proposed: &str, taken: &HashSet<String>) -> String {
    if !taken.contains(&proposed.to_lowercase()) {
        return proposed.to_string();
    }
    (2..)
        .map(|n| format!("{} ({})", proposed, n))
        .find(|candidate| !taken.contains(&candidate.to_lowercase()))
        .unwrap_or_else(|| proposed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_view_name() {
        let taken: HashSet<String> = ["level 1", "level 1 (2)"].iter().map(|s| s.to_string()).collect();
        assert_eq!(unique_view_name("Level 2", &taken), "Level 2");
        assert_eq!(unique_view_name("LEVEL 1", &taken), "LEVEL 1 (3)");
    }

    #[test]
    fn test_summary_record() {
        let mut summary = BatchSummary::default();
        summary.record(&RowOutcome::Changed);
        summary.record(&RowOutcome::Failed("x".to_string()));
        summary.record(&RowOutcome::Skipped);
        summary.record(&RowOutcome::Changed);
        assert_eq!(
            summary,
            BatchSummary {
                changed: 2,
                skipped: 1,
                failed: 1
            }
        );
    }
}
