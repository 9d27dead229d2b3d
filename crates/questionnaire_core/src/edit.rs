//! crates/questionnaire_core/src/edit.rs
//!
//! The typed mutation surface over a [`Questionnaire`]. Every edit the UI
//! can make is one variant of [`EditCommand`], dispatched through a single
//! reducer. Commands are total: indices that fall outside the document
//! (which UI-bound inputs never produce) leave it unchanged rather than
//! failing.

use crate::domain::{Question, QuestionKind, Questionnaire};

/// A single field-scoped edit to the active document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditCommand {
    /// Creator only; the editor locks the survey id once a document loads.
    SetSurveyId(String),
    SetIntroTitle(String),
    SetIntroDescription(String),
    SetIntroOptional(bool),
    SetExitTitle(String),
    SetExitDescription(String),
    /// Appends a fresh single-choice question with one empty option and
    /// id `q<count+1>`.
    AddQuestion,
    /// Removes by position. Remaining ids are not renumbered, so removal
    /// leaves an id gap and a later `AddQuestion` can mint a duplicate id;
    /// deployed consumers reference ids, so renumbering would re-key their
    /// answers.
    RemoveQuestion(usize),
    SetQuestionText { index: usize, text: String },
    /// Switching away from a choice kind keeps `options` in place; the
    /// stale list is simply not rendered.
    SetQuestionKind { index: usize, kind: QuestionKind },
    SetQuestionOptional { index: usize, optional: bool },
    /// Appends an empty option. There is no remove-option command.
    AddOption { index: usize },
    SetOption { index: usize, option: usize, value: String },
}

/// Applies one command, producing the next document value. The caller swaps
/// the result in as a single assignment, so no partial update is ever
/// observable.
pub fn apply(doc: &Questionnaire, command: &EditCommand) -> Questionnaire {
    let mut next = doc.clone();
    match command {
        EditCommand::SetSurveyId(id) => next.survey_id = id.clone(),
        EditCommand::SetIntroTitle(title) => next.init_page.title = title.clone(),
        EditCommand::SetIntroDescription(description) => {
            next.init_page.description = description.clone();
        }
        EditCommand::SetIntroOptional(optional) => next.init_page.is_optional = *optional,
        EditCommand::SetExitTitle(title) => next.exit_page.title = title.clone(),
        EditCommand::SetExitDescription(description) => {
            next.exit_page.description = description.clone();
        }
        EditCommand::AddQuestion => {
            let id = format!("q{}", next.questions.len() + 1);
            next.questions.push(Question {
                id,
                question: String::new(),
                options: Some(vec![String::new()]),
                kind: QuestionKind::SingleChoice,
                is_optional: false,
            });
        }
        EditCommand::RemoveQuestion(index) => {
            if *index < next.questions.len() {
                next.questions.remove(*index);
            }
        }
        EditCommand::SetQuestionText { index, text } => {
            if let Some(q) = next.questions.get_mut(*index) {
                q.question = text.clone();
            }
        }
        EditCommand::SetQuestionKind { index, kind } => {
            if let Some(q) = next.questions.get_mut(*index) {
                q.kind = *kind;
            }
        }
        EditCommand::SetQuestionOptional { index, optional } => {
            if let Some(q) = next.questions.get_mut(*index) {
                q.is_optional = *optional;
            }
        }
        EditCommand::AddOption { index } => {
            if let Some(q) = next.questions.get_mut(*index) {
                q.options.get_or_insert_with(Vec::new).push(String::new());
            }
        }
        EditCommand::SetOption {
            index,
            option,
            value,
        } => {
            if let Some(q) = next.questions.get_mut(*index) {
                if let Some(slot) = q
                    .options
                    .as_mut()
                    .and_then(|options| options.get_mut(*option))
                {
                    *slot = value.clone();
                }
            }
        }
    }
    next
}
