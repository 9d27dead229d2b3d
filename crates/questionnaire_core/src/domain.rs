//! crates/questionnaire_core/src/domain.rs
//!
//! Defines the pure, core data structures for the questionnaire toolbox.
//! The serde attributes pin these structs to the exact JSON shapes of the
//! deployed artifacts (`<surveyId>.json` and `fileList.json`), so nothing
//! here may be renamed on the wire without a data migration.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The kind of a question, which decides how it is rendered and whether
/// `options` applies to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuestionKind {
    SingleChoice,
    MultiChoice,
    TextEntry,
    NumberEntry,
}

impl QuestionKind {
    /// True for the kinds whose `options` list is meaningful.
    pub fn is_choice(&self) -> bool {
        matches!(self, QuestionKind::SingleChoice | QuestionKind::MultiChoice)
    }
}

/// A single survey question.
///
/// `options` is only read when `kind` is a choice kind; for the entry kinds
/// it may linger with stale content (the editor deliberately does not clear
/// it on a kind switch) and is simply never rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    pub is_optional: bool,
}

impl Question {
    /// The options to show for this question: the stored list when the kind
    /// is a choice kind, and nothing otherwise.
    pub fn rendered_options(&self) -> &[String] {
        if self.kind.is_choice() {
            self.options.as_deref().unwrap_or_default()
        } else {
            &[]
        }
    }
}

/// The page shown before the first question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntroPage {
    pub title: String,
    pub description: String,
    // Carried in the artifact but not consulted by the preview.
    pub is_optional: bool,
}

/// The page shown after the last question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExitPage {
    pub title: String,
    pub description: String,
}

/// The full survey definition, held as a single in-memory value by the
/// active editing session and serialized atomically on save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Questionnaire {
    pub survey_id: String,
    #[serde(rename = "initPage")]
    pub init_page: IntroPage,
    pub questions: Vec<Question>,
    pub exit_page: ExitPage,
}

impl Questionnaire {
    /// An all-empty document, the starting point of the creator workflow.
    pub fn new() -> Self {
        Self {
            survey_id: String::new(),
            init_page: IntroPage {
                title: String::new(),
                description: String::new(),
                is_optional: false,
            },
            questions: Vec::new(),
            exit_page: ExitPage {
                title: String::new(),
                description: String::new(),
            },
        }
    }

    /// The filename this document exports under.
    pub fn export_filename(&self) -> String {
        format!("{}.json", self.survey_id)
    }
}

impl Default for Questionnaire {
    fn default() -> Self {
        Self::new()
    }
}

/// One entry of the remote file listing.
///
/// `version` is a free-form string, never parsed or incremented. Filenames
/// are intended to be unique but nothing enforces that on append.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileIndexEntry {
    pub filename: String,
    pub version: String,
    pub last_modified: String,
}

/// The remote listing of available questionnaire documents
/// (`fileList.json`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileIndex {
    pub questionnaire_files: Vec<FileIndexEntry>,
}

//=========================================================================================
// Outbound-service payloads (email / push)
//=========================================================================================

/// Credentials and addressing for the transactional-email service, uploaded
/// by the operator as a JSON file. Field names match that file verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailConfig {
    #[serde(rename = "EMAIL_HOST")]
    pub email_host: String,
    /// Config files in the wild carry the port both quoted and bare; both
    /// are accepted and normalized to a string.
    #[serde(rename = "EMAIL_PORT", deserialize_with = "port_as_string")]
    pub email_port: String,
    #[serde(rename = "EMAIL_HOST_USER")]
    pub email_host_user: String,
    #[serde(rename = "EMAIL_HOST_PASSWORD")]
    pub email_host_password: String,
    #[serde(rename = "DEFAULT_FROM_EMAIL")]
    pub default_from_email: String,
}

fn port_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Port {
        Number(u64),
        Text(String),
    }

    Ok(match Port::deserialize(deserializer)? {
        Port::Number(n) => n.to_string(),
        Port::Text(s) => s,
    })
}

/// A push notification to broadcast to a topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushNotification {
    pub title: String,
    pub body: String,
    /// Free-form key/value payload delivered alongside the notification.
    pub data: HashMap<String, String>,
    pub topic: PushTopic,
}

/// The fixed broadcast topics of the push-messaging service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PushTopic {
    Android,
    Ios,
    All,
}

impl PushTopic {
    /// Maps a raw target string onto a topic. Anything that is not exactly
    /// `android` or `ios` broadcasts to everyone.
    pub fn from_target(target: &str) -> Self {
        match target {
            "android" => PushTopic::Android,
            "ios" => PushTopic::Ios,
            _ => PushTopic::All,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PushTopic::Android => "android",
            PushTopic::Ios => "ios",
            PushTopic::All => "all",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_document() -> Questionnaire {
        Questionnaire {
            survey_id: "wellbeing-2024".to_string(),
            init_page: IntroPage {
                title: "Welcome".to_string(),
                description: "A short check-in.".to_string(),
                is_optional: false,
            },
            questions: vec![
                Question {
                    id: "q1".to_string(),
                    question: "How are you feeling today?".to_string(),
                    options: Some(vec!["Good".to_string(), "Okay".to_string()]),
                    kind: QuestionKind::SingleChoice,
                    is_optional: false,
                },
                Question {
                    id: "q2".to_string(),
                    question: "Anything else?".to_string(),
                    options: None,
                    kind: QuestionKind::TextEntry,
                    is_optional: true,
                },
            ],
            exit_page: ExitPage {
                title: "Thanks".to_string(),
                description: "All done.".to_string(),
            },
        }
    }

    #[test]
    fn questionnaire_round_trips_through_json() {
        let doc = sample_document();
        let json = serde_json::to_string_pretty(&doc).unwrap();
        let parsed: Questionnaire = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, doc);
    }

    #[test]
    fn questionnaire_uses_deployed_wire_names() {
        let json = serde_json::to_value(sample_document()).unwrap();
        assert!(json.get("surveyId").is_some());
        assert!(json.get("initPage").is_some());
        assert!(json.get("exitPage").is_some());
        let q = &json["questions"][0];
        assert_eq!(q["type"], "singleChoice");
        assert_eq!(q["isOptional"], false);
        // Absent options stay absent so round-trips are byte-faithful.
        assert!(json["questions"][1].get("options").is_none());
    }

    #[test]
    fn file_index_round_trips_through_json() {
        let index = FileIndex {
            questionnaire_files: vec![FileIndexEntry {
                filename: "wellbeing-2024.json".to_string(),
                version: "1.0".to_string(),
                last_modified: "2024-01-01T00:00:00Z".to_string(),
            }],
        };
        let json = serde_json::to_string(&index).unwrap();
        assert!(json.contains("questionnaireFiles"));
        assert!(json.contains("lastModified"));
        let parsed: FileIndex = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, index);
    }

    #[test]
    fn rendered_options_is_empty_for_entry_kinds() {
        let doc = sample_document();
        assert_eq!(doc.questions[0].rendered_options().len(), 2);
        assert!(doc.questions[1].rendered_options().is_empty());

        // Stale options on an entry kind are retained but never rendered.
        let mut q = doc.questions[0].clone();
        q.kind = QuestionKind::NumberEntry;
        assert!(q.rendered_options().is_empty());
        assert!(q.options.is_some());
    }

    #[test]
    fn export_filename_appends_json_suffix() {
        assert_eq!(sample_document().export_filename(), "wellbeing-2024.json");
    }

    #[test]
    fn email_config_accepts_quoted_and_bare_ports() {
        let quoted = r#"{
            "EMAIL_HOST": "smtp.example.com",
            "EMAIL_PORT": "587",
            "EMAIL_HOST_USER": "user",
            "EMAIL_HOST_PASSWORD": "secret",
            "DEFAULT_FROM_EMAIL": "noreply@example.com"
        }"#;
        let bare = quoted.replace("\"587\"", "587");

        let from_quoted: EmailConfig = serde_json::from_str(quoted).unwrap();
        let from_bare: EmailConfig = serde_json::from_str(&bare).unwrap();
        assert_eq!(from_quoted, from_bare);
        assert_eq!(from_bare.email_port, "587");
    }

    #[test]
    fn push_topic_defaults_to_all() {
        assert_eq!(PushTopic::from_target("android"), PushTopic::Android);
        assert_eq!(PushTopic::from_target("ios"), PushTopic::Ios);
        assert_eq!(PushTopic::from_target("web"), PushTopic::All);
        assert_eq!(PushTopic::from_target(""), PushTopic::All);
    }
}
