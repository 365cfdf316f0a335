pub mod output;

use crate::finder::scope::PreviewRow;
use anyhow::{Context, Result};
use dialoguer::theme::ColorfulTheme;
use dialoguer::MultiSelect;

/// Ask which pending rows to apply. Already-applied rows are not offered.
pub fn select_rows(rows: &[PreviewRow]) -> Result<Vec<usize>> {
    let pending: Vec<usize> = (0..rows.len()).filter(|&i| !rows[i].applied).collect();
    if pending.is_empty() {
        return Ok(Vec::new());
    }

    let items: Vec<String> = pending
        .iter()
        .map(|&i| {
            let row = &rows[i];
            format!(
                "[{}] {}: {} → {}",
                i,
                output::target_label(&row.target),
                row.found_text,
                row.replaced_text
            )
        })
        .collect();

    let chosen = MultiSelect::with_theme(&ColorfulTheme::default())
        .with_prompt("Select rows to apply (space to toggle, enter to confirm)")
        .items(&items)
        .interact()
        .context("Failed to read selection")?;

    Ok(chosen.into_iter().map(|k| pending[k]).collect())
}
