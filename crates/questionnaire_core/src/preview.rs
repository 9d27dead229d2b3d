//! crates/questionnaire_core/src/preview.rs
//!
//! The phone-preview projection: a read-only flattening of a document into
//! the sequence of pages a respondent walks through. Pure, never mutates,
//! and tolerant of half-edited documents (a choice question with no options
//! yet projects an empty option list, not an error).

use crate::domain::{ExitPage, IntroPage, Question, QuestionKind, Questionnaire};

/// One screen of the respondent-facing flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewPage<'a> {
    Intro(&'a IntroPage),
    Question {
        /// 1-based position shown next to the prompt.
        position: usize,
        question: &'a Question,
    },
    Exit(&'a ExitPage),
}

impl PreviewPage<'_> {
    /// The options a choice question lists on this page; empty for entry
    /// kinds and for the intro/exit pages.
    pub fn options(&self) -> &[String] {
        match self {
            PreviewPage::Question { question, .. } => question.rendered_options(),
            _ => &[],
        }
    }
}

/// Projects a document into its page flow: intro, each question in array
/// order, exit.
pub fn render(doc: &Questionnaire) -> Vec<PreviewPage<'_>> {
    let mut pages = Vec::with_capacity(doc.questions.len() + 2);
    pages.push(PreviewPage::Intro(&doc.init_page));
    for (i, question) in doc.questions.iter().enumerate() {
        pages.push(PreviewPage::Question {
            position: i + 1,
            question,
        });
    }
    pages.push(PreviewPage::Exit(&doc.exit_page));
    pages
}

/// How the preview labels a question, mirroring the phone mock-up:
/// `"<position>. <prompt>"` plus an optional-marker suffix.
pub fn question_heading(position: usize, question: &Question) -> String {
    if question.is_optional {
        format!("{}. {} (Optional)", position, question.question)
    } else {
        format!("{}. {}", position, question.question)
    }
}

/// The input widget a question kind projects to.
pub fn input_hint(kind: QuestionKind) -> &'static str {
    match kind {
        QuestionKind::SingleChoice => "radio-group",
        QuestionKind::MultiChoice => "checkbox-list",
        QuestionKind::TextEntry => "text-input",
        QuestionKind::NumberEntry => "number-input",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit::{apply, EditCommand};
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_document_renders_intro_and_exit_only() {
        let doc = Questionnaire::new();
        let pages = render(&doc);

        assert_eq!(pages.len(), 2);
        assert!(matches!(pages[0], PreviewPage::Intro(_)));
        assert!(matches!(pages[1], PreviewPage::Exit(_)));
    }

    #[test]
    fn questions_are_positioned_one_based_in_array_order() {
        let mut doc = Questionnaire::new();
        doc = apply(&doc, &EditCommand::AddQuestion);
        doc = apply(&doc, &EditCommand::AddQuestion);
        let pages = render(&doc);

        assert_eq!(pages.len(), 4);
        match &pages[1] {
            PreviewPage::Question { position, question } => {
                assert_eq!(*position, 1);
                assert_eq!(question.id, "q1");
            }
            other => panic!("expected question page, got {other:?}"),
        }
        match &pages[2] {
            PreviewPage::Question { position, question } => {
                assert_eq!(*position, 2);
                assert_eq!(question.id, "q2");
            }
            other => panic!("expected question page, got {other:?}"),
        }
    }

    #[test]
    fn choice_question_without_options_lists_nothing() {
        let mut doc = Questionnaire::new();
        doc = apply(&doc, &EditCommand::AddQuestion);
        doc.questions[0].options = None;
        let pages = render(&doc);

        assert!(pages[1].options().is_empty());
    }

    #[test]
    fn each_kind_projects_to_its_input_widget() {
        assert_eq!(input_hint(QuestionKind::SingleChoice), "radio-group");
        assert_eq!(input_hint(QuestionKind::MultiChoice), "checkbox-list");
        assert_eq!(input_hint(QuestionKind::TextEntry), "text-input");
        assert_eq!(input_hint(QuestionKind::NumberEntry), "number-input");
    }

    #[test]
    fn heading_marks_optional_questions() {
        let mut doc = Questionnaire::new();
        doc = apply(&doc, &EditCommand::AddQuestion);
        doc = apply(
            &doc,
            &EditCommand::SetQuestionText {
                index: 0,
                text: "How often?".to_string(),
            },
        );

        assert_eq!(question_heading(1, &doc.questions[0]), "1. How often?");

        let doc = apply(
            &doc,
            &EditCommand::SetQuestionOptional {
                index: 0,
                optional: true,
            },
        );
        assert_eq!(
            question_heading(1, &doc.questions[0]),
            "1. How often? (Optional)"
        );
    }
}
