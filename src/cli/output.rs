use crate::finder::scope::{PreviewRow, RowTarget, ScopeKind};
use crate::project::BatchSummary;
use crate::{HighlightSegments, SpellingIssue};
use colored::*;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Serialize)]
struct JsonRow<'a> {
    index: usize,
    scope: ScopeKind,
    #[serde(flatten)]
    row: &'a PreviewRow,
}

#[derive(Debug, Serialize)]
struct JsonPreview<'a> {
    find: &'a str,
    replace: &'a str,
    total_rows: usize,
    rows: Vec<JsonRow<'a>>,
}

#[derive(Debug, Serialize)]
struct JsonIssues<'a> {
    source: &'a str,
    text: &'a str,
    issues: &'a [SpellingIssue],
}

/// Which side of the preview a segment set belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Found,
    Replaced,
}

/// Render segments with the matched span colored and the rest of the word
/// bold.
pub fn render_segments(segments: &HighlightSegments, side: Side, colored_output: bool) -> String {
    if !colored_output {
        return segments.full_text();
    }

    let mid = match side {
        Side::Found => segments.word_mid.green().bold(),
        Side::Replaced => segments.word_mid.red().bold(),
    };
    format!(
        "{}{}{}{}{}",
        segments.pre_text,
        segments.word_left.bold(),
        mid,
        segments.word_right.bold(),
        segments.post_text
    )
}

pub fn target_label(target: &RowTarget) -> String {
    match target {
        RowTarget::Keynote { type_id, schedule } => {
            if schedule.is_empty() {
                format!("type {}", type_id)
            } else {
                format!("type {} in {}", type_id, schedule)
            }
        }
        RowTarget::SheetName { sheet_number, .. } => format!("sheet {}", sheet_number),
        RowTarget::ViewTitle { view_id, field } => format!("{} {} ({})", field.describe(), view_id, field.code()),
    }
}

pub fn print_preview(rows: &[PreviewRow], find: &str, replace: &str, colored_output: bool, format: &OutputFormat) {
    match format {
        OutputFormat::Text => print_text_preview(rows, colored_output),
        OutputFormat::Json => print_json(&JsonPreview {
            find,
            replace,
            total_rows: rows.len(),
            rows: rows
                .iter()
                .enumerate()
                .map(|(index, row)| JsonRow {
                    index,
                    scope: row.target.scope(),
                    row,
                })
                .collect(),
        }),
    }
}

fn print_text_preview(rows: &[PreviewRow], colored_output: bool) {
    let mut current_scope = None;

    for (index, row) in rows.iter().enumerate() {
        let scope = row.target.scope();
        if current_scope != Some(scope) {
            current_scope = Some(scope);
            if colored_output {
                println!("\n{}", scope.display_name().bold().underline());
            } else {
                println!("\n{}", scope.display_name());
            }
        }

        let number = format!("[{}]", index);
        let status = if row.applied { " ✓" } else { "" };
        if colored_output {
            println!(
                "  {} {} {}{}",
                number.blue().bold(),
                target_label(&row.target).cyan(),
                row.sheet.dimmed(),
                status.green()
            );
            println!("    {} {}", "-".red(), render_segments(&row.found, Side::Found, true));
            println!("    {} {}", "+".green(), render_segments(&row.replaced, Side::Replaced, true));
        } else {
            println!("  {} {} {}{}", number, target_label(&row.target), row.sheet, status);
            println!("    - {}", row.found_text);
            println!("    + {}", row.replaced.full_text());
        }
    }
}

pub fn print_preview_summary(rows: &[PreviewRow], scopes: &[ScopeKind], colored: bool) {
    println!();
    let names = scopes
        .iter()
        .map(|s| s.display_name())
        .collect::<Vec<_>>()
        .join(", ");
    if rows.is_empty() {
        if colored {
            println!("{} {}", "No matches in".yellow(), names.yellow());
        } else {
            println!("No matches in {}", names);
        }
    } else {
        let row_word = if rows.len() == 1 { "change" } else { "changes" };
        if colored {
            println!(
                "{} {} {} previewed in {}",
                "→".cyan().bold(),
                rows.len().to_string().cyan().bold(),
                row_word,
                names
            );
        } else {
            println!("→ {} {} previewed in {}", rows.len(), row_word, names);
        }
    }
}

pub fn print_apply_summary(summary: &BatchSummary, colored: bool, format: &OutputFormat) {
    if *format == OutputFormat::Json {
        print_json(summary);
        return;
    }

    println!();
    if colored {
        println!(
            "{} Changed: {}  Skipped: {}  Failed: {}",
            if summary.failed == 0 { "✓".green().bold() } else { "!".yellow().bold() },
            summary.changed.to_string().green().bold(),
            summary.skipped.to_string().dimmed(),
            if summary.failed == 0 {
                summary.failed.to_string().normal()
            } else {
                summary.failed.to_string().red().bold()
            }
        );
    } else {
        println!(
            "Changed: {}  Skipped: {}  Failed: {}",
            summary.changed, summary.skipped, summary.failed
        );
    }
}

pub fn print_issues(
    source: &str,
    text: &str,
    issues: &[SpellingIssue],
    colored_output: bool,
    format: &OutputFormat,
) {
    match format {
        OutputFormat::Text => print_text_issues(source, text, issues, colored_output),
        OutputFormat::Json => print_json(&JsonIssues { source, text, issues }),
    }
}

fn print_text_issues(source: &str, text: &str, issues: &[SpellingIssue], colored_output: bool) {
    if issues.is_empty() {
        return;
    }

    if colored_output {
        println!("\n{}  {}", source.bold(), format_context(text, issues, true));
    } else {
        println!("\n{}  {}", source, text);
    }

    for issue in issues {
        let position = format!("{}:{}", issue.start, issue.len);
        let suggestions = issue.suggestions.join(", ");
        if colored_output {
            println!(
                "  {} {} {} {}",
                position.blue().bold(),
                issue.word.red().bold(),
                "→".dimmed(),
                suggestions.green()
            );
        } else {
            println!("  {} {} → {}", position, issue.word, suggestions);
        }
    }
}

/// Text with every flagged word painted red.
fn format_context(text: &str, issues: &[SpellingIssue], colored: bool) -> String {
    if !colored {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for issue in issues {
        if issue.start < cursor || issue.end() > text.len() {
            continue;
        }
        out.push_str(&text[cursor..issue.start]);
        out.push_str(&text[issue.start..issue.end()].red().underline().to_string());
        cursor = issue.end();
    }
    out.push_str(&text[cursor..]);
    out
}

pub fn print_spell_summary(total_issues: usize, fields: usize, colored: bool) {
    println!();
    if total_issues == 0 {
        if colored {
            println!("{}", "✓ No spelling issues found!".green().bold());
        } else {
            println!("✓ No spelling issues found!");
        }
    } else {
        let issue_word = if total_issues == 1 { "issue" } else { "issues" };
        let field_word = if fields == 1 { "field" } else { "fields" };
        if colored {
            println!(
                "{} {} {} found in {} {}",
                "✗".red().bold(),
                total_issues.to_string().red().bold(),
                issue_word,
                fields,
                field_word
            );
        } else {
            println!("✗ {} {} found in {} {}", total_issues, issue_word, fields, field_word);
        }
    }
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error: failed to serialize output: {}", e),
    }
}
