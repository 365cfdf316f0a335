//! A project snapshot stored as JSON, used as the document host.
//!
//! Writes go to a staged copy. `commit` swaps it in and saves the file;
//! `rollback` drops it.

pub mod apply;

use crate::checker::dictionary::CustomWords;
use crate::error::{BimTextError, Result};
use crate::finder::scope::{
    DocumentSource, KeynoteSource, RowTarget, SheetSource, ViewField, ViewSource,
};
use apply::DocumentHost;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub use apply::{apply_all, apply_all_with, apply_selected, BatchSummary, RowOutcome};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeynoteRecord {
    #[serde(flatten)]
    pub source: KeynoteSource,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub read_only: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetRecord {
    #[serde(flatten)]
    pub source: SheetSource,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub read_only: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewRecord {
    #[serde(flatten)]
    pub source: ViewSource,
    /// Title on sheet cannot be edited
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub title_read_only: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectData {
    #[serde(default)]
    pub keynotes: Vec<KeynoteRecord>,
    #[serde(default)]
    pub sheets: Vec<SheetRecord>,
    #[serde(default)]
    pub views: Vec<ViewRecord>,
    /// `|`-joined custom dictionary
    #[serde(default)]
    pub custom_words: String,
}

#[derive(Debug, Clone, Default)]
pub struct Project {
    path: Option<PathBuf>,
    data: ProjectData,
    staged: Option<ProjectData>,
}

impl Project {
    pub fn open(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| BimTextError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut project = Self::from_json(&content)?;
        project.path = Some(path.to_path_buf());
        debug!(
            "Opened {}: {} keynote(s), {} sheet(s), {} view(s)",
            path.display(),
            project.data.keynotes.len(),
            project.data.sheets.len(),
            project.data.views.len()
        );
        Ok(project)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(Self::from_data(serde_json::from_str(content)?))
    }

    pub fn from_data(data: ProjectData) -> Self {
        Self {
            path: None,
            data,
            staged: None,
        }
    }

    pub fn data(&self) -> &ProjectData {
        &self.data
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Write committed state back to the file it was opened from.
    pub fn save(&self) -> Result<()> {
        if let Some(path) = &self.path {
            let json = serde_json::to_string_pretty(&self.data)?;
            fs::write(path, json)?;
            debug!("Saved {}", path.display());
        }
        Ok(())
    }

    pub fn custom_words(&self) -> CustomWords {
        CustomWords::parse(&self.data.custom_words)
    }

    pub fn set_custom_words(&mut self, words: &CustomWords) {
        self.data.custom_words = words.to_joined();
    }

    fn working(&self) -> &ProjectData {
        self.staged.as_ref().unwrap_or(&self.data)
    }

    fn staged_mut(&mut self) -> &mut ProjectData {
        self.staged.get_or_insert_with(|| self.data.clone())
    }
}

impl DocumentSource for Project {
    fn keynotes(&self) -> Vec<KeynoteSource> {
        self.data.keynotes.iter().map(|k| k.source.clone()).collect()
    }

    fn sheets(&self) -> Vec<SheetSource> {
        self.data.sheets.iter().map(|s| s.source.clone()).collect()
    }

    fn views(&self) -> Vec<ViewSource> {
        self.data.views.iter().map(|v| v.source.clone()).collect()
    }
}

impl DocumentHost for Project {
    fn current_text(&self, target: &RowTarget) -> Option<String> {
        let data = self.working();
        match target {
            RowTarget::Keynote { type_id, .. } => data
                .keynotes
                .iter()
                .find(|k| k.source.type_id == *type_id)
                .map(|k| k.source.comment.clone()),
            RowTarget::SheetName { sheet_id, .. } => data
                .sheets
                .iter()
                .find(|s| s.source.sheet_id == *sheet_id)
                .map(|s| s.source.name.clone()),
            RowTarget::ViewTitle { view_id, field } => {
                let view = data.views.iter().find(|v| v.source.view_id == *view_id)?;
                match field {
                    ViewField::Name => Some(view.source.name.clone()),
                    ViewField::TitleOnSheet => view.source.title_on_sheet.clone(),
                }
            }
        }
    }

    fn write(&mut self, target: &RowTarget, text: &str) -> Result<()> {
        let rejected = |reason: &str| BimTextError::WriteRejected {
            target: target.to_string(),
            reason: reason.to_string(),
        };
        let data = self.staged_mut();

        match target {
            RowTarget::Keynote { type_id, .. } => {
                let records: Vec<&mut KeynoteRecord> = data
                    .keynotes
                    .iter_mut()
                    .filter(|k| k.source.type_id == *type_id)
                    .collect();
                if records.is_empty() {
                    return Err(BimTextError::MissingElement(target.to_string()));
                }
                if records.iter().any(|k| k.read_only) {
                    return Err(rejected("type comment is read-only"));
                }
                for record in records {
                    record.source.comment = text.to_string();
                }
            }
            RowTarget::SheetName { sheet_id, .. } => {
                let sheet = data
                    .sheets
                    .iter_mut()
                    .find(|s| s.source.sheet_id == *sheet_id)
                    .ok_or_else(|| BimTextError::MissingElement(target.to_string()))?;
                if sheet.read_only {
                    return Err(rejected("sheet name is read-only"));
                }
                sheet.source.name = text.to_string();
            }
            RowTarget::ViewTitle { view_id, field } => {
                let lower = text.to_lowercase();
                if *field == ViewField::Name
                    && data
                        .views
                        .iter()
                        .any(|v| v.source.view_id != *view_id && v.source.name.to_lowercase() == lower)
                {
                    return Err(rejected("view name already in use"));
                }
                let view = data
                    .views
                    .iter_mut()
                    .find(|v| v.source.view_id == *view_id)
                    .ok_or_else(|| BimTextError::MissingElement(target.to_string()))?;
                match field {
                    ViewField::Name => view.source.name = text.to_string(),
                    ViewField::TitleOnSheet => {
                        if view.title_read_only {
                            return Err(rejected("title on sheet is read-only"));
                        }
                        view.source.title_on_sheet = Some(text.to_string());
                    }
                }
            }
        }
        Ok(())
    }

    fn view_names(&self) -> Vec<String> {
        self.working()
            .views
            .iter()
            .map(|v| v.source.name.clone())
            .collect()
    }

    fn commit(&mut self) -> Result<()> {
        if let Some(staged) = self.staged.take() {
            self.data = staged;
            self.save()?;
        }
        Ok(())
    }

    fn rollback(&mut self) {
        if self.staged.take().is_some() {
            debug!("Rolled back staged changes");
        }
    }
}
