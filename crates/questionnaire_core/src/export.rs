//! crates/questionnaire_core/src/export.rs
//!
//! Save artifacts. A save always produces the document file and attempts
//! the index file; the two are reported together in a [`SaveBundle`] so the
//! caller sees a partial success for what it is instead of the index file
//! silently never appearing.

use serde::Serialize;

use crate::domain::{FileIndex, Questionnaire};
use crate::workflow::WorkflowError;

/// The file list always exports under this name.
pub const FILE_INDEX_FILENAME: &str = "fileList.json";

/// One downloadable artifact: a filename and pretty-printed JSON contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportFile {
    pub filename: String,
    pub contents: String,
}

impl ExportFile {
    /// Serializes the document under its `<surveyId>.json` name.
    pub fn questionnaire(doc: &Questionnaire) -> Self {
        Self {
            filename: doc.export_filename(),
            contents: pretty_json(doc),
        }
    }

    /// Serializes an index snapshot as `fileList.json`.
    pub fn file_index(index: &FileIndex) -> Self {
        Self {
            filename: FILE_INDEX_FILENAME.to_string(),
            contents: pretty_json(index),
        }
    }
}

/// The combined outcome of a save: the document artifact (always produced)
/// and the index artifact, which can fail independently when the creator's
/// fresh index fetch does. No transactional guarantee spans the two; the
/// caller decides whether a partial success is acceptable.
#[derive(Debug)]
pub struct SaveBundle {
    pub document: ExportFile,
    pub index: Result<ExportFile, WorkflowError>,
}

// Both domain types serialize infallibly: no maps with non-string keys, no
// non-finite floats.
fn pretty_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FileIndexEntry, Questionnaire};
    use pretty_assertions::assert_eq;

    #[test]
    fn questionnaire_artifact_is_named_after_the_survey_id() {
        let mut doc = Questionnaire::new();
        doc.survey_id = "s1".to_string();
        let file = ExportFile::questionnaire(&doc);

        assert_eq!(file.filename, "s1.json");
        let parsed: Questionnaire = serde_json::from_str(&file.contents).unwrap();
        assert_eq!(parsed, doc);
    }

    #[test]
    fn index_artifact_round_trips() {
        let index = FileIndex {
            questionnaire_files: vec![FileIndexEntry {
                filename: "s1.json".to_string(),
                version: "1.0".to_string(),
                last_modified: "2024-01-01T00:00:00Z".to_string(),
            }],
        };
        let file = ExportFile::file_index(&index);

        assert_eq!(file.filename, "fileList.json");
        let parsed: FileIndex = serde_json::from_str(&file.contents).unwrap();
        assert_eq!(parsed, index);
    }
}
