//! Review question generation and validation
//!
//! Each question is produced by two backend calls: one prompted to
//! generate a question from the material, one prompted to answer it.
//! Generated pairs then pass through keyword-free structural validation
//! before display.

use serde::Serialize;
use tracing::warn;

use crate::inference::{InferenceError, QuestionBackend};
use crate::text::word_count;

/// Default number of questions to generate per summary
pub const DEFAULT_NUM_QUESTIONS: usize = 3;

/// Token caps for the generation prompts
const QUESTION_MAX_TOKENS: usize = 50;
const ANSWER_MAX_TOKENS: usize = 100;

/// A generated question together with its answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionAnswer {
    pub question: String,
    pub answer: String,
}

/// Drives question generation against a text-generation backend
pub struct QuestionEngine<B> {
    backend: B,
}

impl<B: QuestionBackend> QuestionEngine<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Generate `num_questions` question/answer pairs from `text`.
    ///
    /// Fail-soft like summary generation: a backend error yields an empty
    /// list and a log line, never an error to the caller.
    pub fn generate(&self, text: &str, num_questions: usize) -> Vec<QuestionAnswer> {
        match self.run(text, num_questions) {
            Ok(questions) => questions,
            Err(e) => {
                warn!(error = %e, "question generation failed");
                Vec::new()
            }
        }
    }

    fn run(&self, text: &str, num_questions: usize) -> Result<Vec<QuestionAnswer>, InferenceError> {
        let mut questions = Vec::with_capacity(num_questions);

        for _ in 0..num_questions {
            let question = self
                .backend
                .generate(&format!("generate question: {}", text), QUESTION_MAX_TOKENS)?
                .trim()
                .to_string();

            let answer = self
                .backend
                .generate(
                    &format!(
                        "answer this question based on the text: {} {}",
                        question, text
                    ),
                    ANSWER_MAX_TOKENS,
                )?
                .trim()
                .to_string();

            questions.push(QuestionAnswer { question, answer });
        }

        Ok(questions)
    }
}

/// Keep only structurally plausible question/answer pairs: the question
/// must be at least 3 words and contain a question mark, the answer at
/// least 5 words.
pub fn validate(questions: Vec<QuestionAnswer>) -> Vec<QuestionAnswer> {
    questions
        .into_iter()
        .filter(|qa| {
            word_count(&qa.question) >= 3
                && qa.question.contains('?')
                && word_count(&qa.answer) >= 5
        })
        .collect()
}

/// Format question/answer pairs for display
pub fn format_questions(questions: &[QuestionAnswer]) -> String {
    let mut formatted = String::from("Review Questions:\n\n");

    for (i, qa) in questions.iter().enumerate() {
        formatted.push_str(&format!("Q{}. {}\n", i + 1, qa.question));
        formatted.push_str(&format!("A{}. {}\n\n", i + 1, qa.answer));
    }

    formatted
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use super::*;

    struct ScriptedBackend {
        replies: RefCell<Vec<String>>,
        calls: Cell<usize>,
        prompts: RefCell<Vec<String>>,
    }

    impl ScriptedBackend {
        fn new(replies: &[&str]) -> Self {
            Self {
                replies: RefCell::new(replies.iter().map(|s| s.to_string()).collect()),
                calls: Cell::new(0),
                prompts: RefCell::new(Vec::new()),
            }
        }
    }

    impl QuestionBackend for ScriptedBackend {
        fn generate(&self, prompt: &str, _max: usize) -> Result<String, InferenceError> {
            let call = self.calls.get();
            self.calls.set(call + 1);
            self.prompts.borrow_mut().push(prompt.to_string());
            let replies = self.replies.borrow();
            Ok(replies[call.min(replies.len() - 1)].clone())
        }
    }

    struct FailingBackend;

    impl QuestionBackend for FailingBackend {
        fn generate(&self, _prompt: &str, _max: usize) -> Result<String, InferenceError> {
            Err(InferenceError::Transport("connection refused".to_string()))
        }
    }

    fn qa(question: &str, answer: &str) -> QuestionAnswer {
        QuestionAnswer {
            question: question.to_string(),
            answer: answer.to_string(),
        }
    }

    #[test]
    fn test_generate_pairs_prompts() {
        let backend = ScriptedBackend::new(&[
            "What is chunking?",
            "Chunking splits text into bounded pieces.",
        ]);
        let engine = QuestionEngine::new(&backend);

        let questions = engine.generate("chunking splits text", 1);

        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].question, "What is chunking?");
        assert_eq!(backend.calls.get(), 2);

        let prompts = backend.prompts.borrow();
        assert!(prompts[0].starts_with("generate question: "));
        assert!(prompts[1].starts_with("answer this question based on the text: What is chunking?"));
    }

    #[test]
    fn test_generate_two_calls_per_question() {
        let backend = ScriptedBackend::new(&["Why? Why? Why?", "Because of five whole words."]);
        let engine = QuestionEngine::new(&backend);

        let questions = engine.generate("some material", 3);

        assert_eq!(questions.len(), 3);
        assert_eq!(backend.calls.get(), 6);
    }

    #[test]
    fn test_generate_fail_soft_on_backend_error() {
        let engine = QuestionEngine::new(FailingBackend);
        assert!(engine.generate("some material", 3).is_empty());
    }

    #[test]
    fn test_validate_keeps_well_formed_pairs() {
        let questions = vec![qa(
            "What does the chunker do?",
            "It splits text into bounded word chunks.",
        )];
        assert_eq!(validate(questions).len(), 1);
    }

    #[test]
    fn test_validate_drops_short_question() {
        let questions = vec![qa("Why?", "Because the answer has enough words here.")];
        assert!(validate(questions).is_empty());
    }

    #[test]
    fn test_validate_drops_missing_question_mark() {
        let questions = vec![qa(
            "Explain the chunker please",
            "It splits text into bounded word chunks.",
        )];
        assert!(validate(questions).is_empty());
    }

    #[test]
    fn test_validate_drops_short_answer() {
        let questions = vec![qa("What does the chunker do?", "Splits text.")];
        assert!(validate(questions).is_empty());
    }

    #[test]
    fn test_format_numbers_pairs() {
        let questions = vec![
            qa("First question?", "First answer."),
            qa("Second question?", "Second answer."),
        ];
        let formatted = format_questions(&questions);
        assert!(formatted.starts_with("Review Questions:\n\n"));
        assert!(formatted.contains("Q1. First question?"));
        assert!(formatted.contains("A2. Second answer."));
    }
}
