pub mod domain;
pub mod edit;
pub mod export;
pub mod ports;
pub mod preview;
pub mod workflow;

pub use domain::{
    EmailConfig, ExitPage, FileIndex, FileIndexEntry, IntroPage, PushNotification, PushTopic,
    Question, QuestionKind, Questionnaire,
};
pub use edit::EditCommand;
pub use export::{ExportFile, SaveBundle, FILE_INDEX_FILENAME};
pub use ports::{EmailService, PortError, PortResult, PushService, StorageService};
pub use workflow::{CreatorSession, EditorSession, WorkflowError};
