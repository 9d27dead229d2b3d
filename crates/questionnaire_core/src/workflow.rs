//! crates/questionnaire_core/src/workflow.rs
//!
//! The editor and creator workflows. Each session owns its own state (the
//! fetched File Index and the single active document) and is driven through
//! the typed edit commands; nothing is shared between sessions, so two open
//! editors never see each other's edits.
//!
//! The remote File Index is read optimistically and patched at save time
//! with no compare-and-swap: two simultaneous editors can overwrite each
//! other's index export. Accepted for this single-user tool.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::domain::{FileIndex, FileIndexEntry, Questionnaire};
use crate::edit::{apply, EditCommand};
use crate::export::{ExportFile, SaveBundle};
use crate::ports::{PortError, StorageService};

/// Newly created questionnaires always enter the index at this version;
/// nothing parses or increments it afterwards.
pub const INITIAL_VERSION: &str = "1.0";

/// Failures surfaced to the user as inline error states. None are fatal and
/// none are retried.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("failed to fetch the file list: {0}")]
    IndexFetchFailed(#[source] PortError),
    #[error("failed to fetch the questionnaire: {0}")]
    DocumentFetchFailed(#[source] PortError),
    #[error("failed to parse the questionnaire: {0}")]
    DocumentParseFailed(#[source] PortError),
    /// A save was requested before any document was loaded or created.
    #[error("no active document")]
    NoActiveDocument,
}

/// Timestamps written into the File Index, ISO-8601 with milliseconds, the
/// format the existing `fileList.json` entries carry.
pub fn index_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

//=========================================================================================
// Editor Session
//=========================================================================================

/// Edits an existing questionnaire picked from the File Index.
#[derive(Debug)]
pub struct EditorSession {
    index: FileIndex,
    selected: Option<String>,
    document: Option<Questionnaire>,
}

impl EditorSession {
    /// Opens a session by fetching the File Index once. The index is not
    /// re-fetched afterwards; the save patches this in-session copy.
    pub async fn open(storage: &dyn StorageService) -> Result<Self, WorkflowError> {
        let index = storage
            .fetch_file_index()
            .await
            .map_err(WorkflowError::IndexFetchFailed)?;
        Ok(Self {
            index,
            selected: None,
            document: None,
        })
    }

    /// Rebuilds a session around state the caller already holds (a stateless
    /// HTTP embedding fetches the index and document in earlier requests).
    pub fn resume(index: FileIndex, selected: String, document: Questionnaire) -> Self {
        Self {
            index,
            selected: Some(selected),
            document: Some(document),
        }
    }

    /// The entries available for selection, in listing order.
    pub fn files(&self) -> &[FileIndexEntry] {
        &self.index.questionnaire_files
    }

    /// Fetches the selected document and makes it the active one. Unsaved
    /// edits to a previously selected document are discarded without
    /// confirmation.
    pub async fn select(
        &mut self,
        filename: &str,
        storage: &dyn StorageService,
    ) -> Result<(), WorkflowError> {
        let document = storage
            .fetch_questionnaire(filename)
            .await
            .map_err(|e| match e {
                PortError::Parse(_) => WorkflowError::DocumentParseFailed(e),
                _ => WorkflowError::DocumentFetchFailed(e),
            })?;
        self.selected = Some(filename.to_string());
        self.document = Some(document);
        Ok(())
    }

    pub fn document(&self) -> Option<&Questionnaire> {
        self.document.as_ref()
    }

    /// Applies one edit to the active document. The survey id is locked once
    /// a document is loaded, so `SetSurveyId` is dropped here.
    pub fn apply(&mut self, command: &EditCommand) {
        if matches!(command, EditCommand::SetSurveyId(_)) {
            return;
        }
        if let Some(doc) = &self.document {
            self.document = Some(apply(doc, command));
        }
    }

    /// Serializes the active document and the patched index. The entry whose
    /// filename matches the current selection gets its `lastModified`
    /// rewritten to `now`; every other field and entry is untouched, and an
    /// unmatched selection exports the index unchanged.
    pub fn save(&self, now: DateTime<Utc>) -> Result<SaveBundle, WorkflowError> {
        let document = self.document.as_ref().ok_or(WorkflowError::NoActiveDocument)?;

        let mut index = self.index.clone();
        if let Some(selected) = &self.selected {
            for entry in &mut index.questionnaire_files {
                if entry.filename == *selected {
                    entry.last_modified = index_timestamp(now);
                }
            }
        }

        Ok(SaveBundle {
            document: ExportFile::questionnaire(document),
            index: Ok(ExportFile::file_index(&index)),
        })
    }
}

//=========================================================================================
// Creator Session
//=========================================================================================

/// Builds a new questionnaire from scratch.
pub struct CreatorSession {
    document: Questionnaire,
}

impl CreatorSession {
    pub fn new() -> Self {
        Self {
            document: Questionnaire::new(),
        }
    }

    /// Wraps a document the caller assembled elsewhere (the stateless HTTP
    /// embedding posts the finished draft in one request).
    pub fn with_document(document: Questionnaire) -> Self {
        Self { document }
    }

    pub fn document(&self) -> &Questionnaire {
        &self.document
    }

    /// Applies one edit. Unlike the editor, `SetSurveyId` is allowed: the id
    /// is chosen here and locked only once the document reaches the index.
    pub fn apply(&mut self, command: &EditCommand) {
        self.document = apply(&self.document, command);
    }

    /// Serializes the document, then fetches the index fresh and appends
    /// `{<surveyId>.json, "1.0", now}`, unconditionally and with no
    /// de-duplication against existing entries for the same survey id. If
    /// the fetch fails the document artifact is still produced and the
    /// index slot carries the typed error.
    pub async fn save(&self, storage: &dyn StorageService, now: DateTime<Utc>) -> SaveBundle {
        let document = ExportFile::questionnaire(&self.document);

        let index = match storage.fetch_file_index().await {
            Ok(mut index) => {
                index.questionnaire_files.push(FileIndexEntry {
                    filename: self.document.export_filename(),
                    version: INITIAL_VERSION.to_string(),
                    last_modified: index_timestamp(now),
                });
                Ok(ExportFile::file_index(&index))
            }
            Err(e) => Err(WorkflowError::IndexFetchFailed(e)),
        };

        SaveBundle { document, index }
    }
}

impl Default for CreatorSession {
    fn default() -> Self {
        Self::new()
    }
}
