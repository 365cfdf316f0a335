use crate::finder::highlight::build_highlight;
use crate::finder::matcher::{is_effective_change, locate_match, replace_all};
use crate::HighlightSegments;
use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Host-assigned element identifier. Opaque to everything but the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub i64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScopeKind {
    Keynotes,
    SheetNames,
    ViewTitles,
}

impl ScopeKind {
    pub const ALL: [ScopeKind; 3] = [ScopeKind::Keynotes, ScopeKind::SheetNames, ScopeKind::ViewTitles];

    pub fn display_name(&self) -> &'static str {
        match self {
            ScopeKind::Keynotes => "Keynotes",
            ScopeKind::SheetNames => "Sheet Names",
            ScopeKind::ViewTitles => "View Titles",
        }
    }
}

impl FromStr for ScopeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "keynotes" | "keynote" => Ok(ScopeKind::Keynotes),
            "sheet-names" | "sheets" => Ok(ScopeKind::SheetNames),
            "view-titles" | "views" => Ok(ScopeKind::ViewTitles),
            _ => Err(format!("Unknown scope: {}", s)),
        }
    }
}

impl fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScopeKind::Keynotes => write!(f, "keynotes"),
            ScopeKind::SheetNames => write!(f, "sheet-names"),
            ScopeKind::ViewTitles => write!(f, "view-titles"),
        }
    }
}

/// Which text of a view a row edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewField {
    Name,
    TitleOnSheet,
}

impl ViewField {
    pub fn code(&self) -> &'static str {
        match self {
            ViewField::Name => "VN",
            ViewField::TitleOnSheet => "VT",
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            ViewField::Name => "View Name",
            ViewField::TitleOnSheet => "View Title",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeynoteSource {
    pub type_id: ElementId,
    pub comment: String,
    #[serde(default)]
    pub sheet: String,
    #[serde(default)]
    pub schedule: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetSource {
    pub sheet_id: ElementId,
    pub number: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewSource {
    pub view_id: ElementId,
    pub name: String,
    #[serde(default)]
    pub title_on_sheet: Option<String>,
    #[serde(default)]
    pub sheet: String,
}

/// Read side of the host document: the text fields each scope scans.
pub trait DocumentSource {
    fn keynotes(&self) -> Vec<KeynoteSource>;
    fn sheets(&self) -> Vec<SheetSource>;
    fn views(&self) -> Vec<ViewSource>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum RowTarget {
    Keynote {
        type_id: ElementId,
        schedule: String,
    },
    SheetName {
        sheet_id: ElementId,
        sheet_number: String,
    },
    ViewTitle {
        view_id: ElementId,
        field: ViewField,
    },
}

impl RowTarget {
    pub fn scope(&self) -> ScopeKind {
        match self {
            RowTarget::Keynote { .. } => ScopeKind::Keynotes,
            RowTarget::SheetName { .. } => ScopeKind::SheetNames,
            RowTarget::ViewTitle { .. } => ScopeKind::ViewTitles,
        }
    }

    /// Rows that write the same host field.
    pub fn same_field(&self, other: &RowTarget) -> bool {
        match (self, other) {
            (RowTarget::Keynote { type_id: a, .. }, RowTarget::Keynote { type_id: b, .. }) => a == b,
            (RowTarget::SheetName { sheet_id: a, .. }, RowTarget::SheetName { sheet_id: b, .. }) => {
                a == b
            }
            (
                RowTarget::ViewTitle { view_id: a, field: fa },
                RowTarget::ViewTitle { view_id: b, field: fb },
            ) => a == b && fa == fb,
            _ => false,
        }
    }
}

impl fmt::Display for RowTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowTarget::Keynote { type_id, .. } => write!(f, "type {}", type_id),
            RowTarget::SheetName { sheet_id, sheet_number } => {
                write!(f, "sheet {} ({})", sheet_number, sheet_id)
            }
            RowTarget::ViewTitle { view_id, field } => write!(f, "view {} [{}]", view_id, field.code()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewRow {
    pub target: RowTarget,
    /// Sheet the field appears on, "A101 - Level 1 Plan" style
    pub sheet: String,
    pub found_text: String,
    /// Full text after replace-all; this is what gets written
    pub replaced_text: String,
    pub found: HighlightSegments,
    pub replaced: HighlightSegments,
    #[serde(default)]
    pub applied: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub find: String,
    pub replace: String,
    pub case_sensitive: bool,
}

impl SearchQuery {
    pub fn new(find: impl Into<String>, replace: impl Into<String>, case_sensitive: bool) -> Self {
        Self {
            find: find.into(),
            replace: replace.into(),
            case_sensitive,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.find.trim().is_empty()
    }
}

struct Candidate {
    replaced_text: String,
    found: HighlightSegments,
    replaced: HighlightSegments,
}

/// Match, replace and highlight one field. `None` when the field is not a
/// result row.
fn evaluate(text: &str, query: &SearchQuery, trim_result: bool) -> Option<Candidate> {
    locate_match(text, &query.find, query.case_sensitive)?;

    let mut replaced_text = replace_all(text, &query.find, &query.replace, query.case_sensitive);
    if trim_result {
        replaced_text = replaced_text.trim().to_string();
        if replaced_text.is_empty() {
            return None;
        }
    }
    if !is_effective_change(text, &replaced_text, query.case_sensitive) {
        return None;
    }

    let (found, replaced) = build_highlight(text, &query.find, &query.replace, query.case_sensitive);
    Some(Candidate {
        replaced_text,
        found,
        replaced,
    })
}

impl PreviewRow {
    fn from_candidate(target: RowTarget, sheet: String, found_text: String, c: Candidate) -> Self {
        Self {
            target,
            sheet,
            found_text,
            replaced_text: c.replaced_text,
            found: c.found,
            replaced: c.replaced,
            applied: false,
        }
    }
}

/// Preview rows for one scope, in document order.
pub fn scan<D: DocumentSource + ?Sized>(doc: &D, scope: ScopeKind, query: &SearchQuery) -> Vec<PreviewRow> {
    if query.is_blank() {
        return Vec::new();
    }

    let rows = match scope {
        ScopeKind::Keynotes => scan_keynotes(doc.keynotes(), query),
        ScopeKind::SheetNames => scan_sheets(doc.sheets(), query),
        ScopeKind::ViewTitles => scan_views(doc.views(), query),
    };
    debug!("{}: {} row(s) for {:?}", scope.display_name(), rows.len(), query.find);
    rows
}

/// Preview rows for several scopes, concatenated in the order given.
pub fn scan_scopes<D: DocumentSource + ?Sized>(
    doc: &D,
    scopes: &[ScopeKind],
    query: &SearchQuery,
) -> Vec<PreviewRow> {
    scopes.iter().flat_map(|&scope| scan(doc, scope, query)).collect()
}

/// Every non-empty text field in a scope, keynotes deduplicated by type.
pub fn field_texts<D: DocumentSource + ?Sized>(doc: &D, scope: ScopeKind) -> Vec<(RowTarget, String)> {
    match scope {
        ScopeKind::Keynotes => {
            let mut seen = HashSet::new();
            doc.keynotes()
                .into_iter()
                .filter(|k| !k.comment.is_empty() && seen.insert(k.type_id))
                .map(|k| {
                    let target = RowTarget::Keynote {
                        type_id: k.type_id,
                        schedule: k.schedule,
                    };
                    (target, k.comment)
                })
                .collect()
        }
        ScopeKind::SheetNames => doc
            .sheets()
            .into_iter()
            .filter(|s| !s.name.is_empty())
            .map(|s| {
                let target = RowTarget::SheetName {
                    sheet_id: s.sheet_id,
                    sheet_number: s.number,
                };
                (target, s.name)
            })
            .collect(),
        ScopeKind::ViewTitles => doc
            .views()
            .into_iter()
            .flat_map(|v| {
                let name = (!v.name.is_empty()).then(|| {
                    let target = RowTarget::ViewTitle {
                        view_id: v.view_id,
                        field: ViewField::Name,
                    };
                    (target, v.name.clone())
                });
                let title = v.title_on_sheet.filter(|t| !t.is_empty()).map(|t| {
                    let target = RowTarget::ViewTitle {
                        view_id: v.view_id,
                        field: ViewField::TitleOnSheet,
                    };
                    (target, t)
                });
                name.into_iter().chain(title)
            })
            .collect(),
    }
}

fn scan_keynotes(sources: Vec<KeynoteSource>, query: &SearchQuery) -> Vec<PreviewRow> {
    let mut seen = HashSet::new();
    let unique: Vec<KeynoteSource> = sources
        .into_iter()
        .filter(|k| !k.comment.is_empty())
        .filter(|k| seen.insert(k.type_id))
        .collect();

    unique
        .into_par_iter()
        .filter_map(|k| {
            let c = evaluate(&k.comment, query, false)?;
            let target = RowTarget::Keynote {
                type_id: k.type_id,
                schedule: k.schedule,
            };
            Some(PreviewRow::from_candidate(target, k.sheet, k.comment, c))
        })
        .collect()
}

fn scan_sheets(sources: Vec<SheetSource>, query: &SearchQuery) -> Vec<PreviewRow> {
    sources
        .into_par_iter()
        .filter_map(|s| {
            let c = evaluate(&s.name, query, true)?;
            let sheet = format!("{} - {}", s.number, s.name);
            let target = RowTarget::SheetName {
                sheet_id: s.sheet_id,
                sheet_number: s.number,
            };
            Some(PreviewRow::from_candidate(target, sheet, s.name, c))
        })
        .collect()
}

fn scan_views(sources: Vec<ViewSource>, query: &SearchQuery) -> Vec<PreviewRow> {
    sources
        .into_par_iter()
        .flat_map_iter(|v| {
            let mut rows = Vec::with_capacity(2);
            if let Some(c) = evaluate(&v.name, query, true) {
                let target = RowTarget::ViewTitle {
                    view_id: v.view_id,
                    field: ViewField::Name,
                };
                rows.push(PreviewRow::from_candidate(target, v.sheet.clone(), v.name.clone(), c));
            }
            if let Some(title) = v.title_on_sheet.as_deref().filter(|t| !t.is_empty()) {
                if let Some(c) = evaluate(title, query, true) {
                    let target = RowTarget::ViewTitle {
                        view_id: v.view_id,
                        field: ViewField::TitleOnSheet,
                    };
                    rows.push(PreviewRow::from_candidate(target, v.sheet.clone(), title.to_string(), c));
                }
            }
            rows
        })
        .collect()
}
