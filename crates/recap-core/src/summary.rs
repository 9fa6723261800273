//! Summary generation with length negotiation
//!
//! Long material is chunked, each chunk is summarized with a per-chunk
//! length target, and the joined result gets at most one tightening pass
//! when it overshoots the word budget. The effort is bounded: for an input
//! of N chunks the backend is called at most N + 1 times, and an
//! over-budget result after the tightening pass is reported as-is via the
//! `within_budget` flag rather than looped on.

use tracing::{debug, warn};

use crate::inference::{InferenceError, SummaryBackend};
use crate::text::{split_into_chunks, word_count, DEFAULT_CHUNK_SIZE};

/// Inputs shorter than this many words are refused with [`TOO_SHORT_MESSAGE`]
pub const MIN_INPUT_WORDS: usize = 10;

/// Default word budget for a generated summary
pub const DEFAULT_MAX_WORDS: usize = 200;

/// Floor for the per-chunk requested summary length, in words
const CHUNK_TARGET_FLOOR: usize = 30;

/// Sentinel returned for degenerate input instead of calling the backend
pub const TOO_SHORT_MESSAGE: &str =
    "Input text is too short for summarization. Please provide more content.";

/// A generated summary together with its length verdict
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryResult {
    /// The summary text (empty when the backend failed)
    pub text: String,
    /// True iff the summary's word count is within the requested budget
    pub within_budget: bool,
}

impl SummaryResult {
    /// Word count of the summary text
    pub fn word_count(&self) -> usize {
        word_count(&self.text)
    }
}

/// Drives chunking and length negotiation against a summarization backend
pub struct SummaryEngine<B> {
    backend: B,
    chunk_size: usize,
}

impl<B: SummaryBackend> SummaryEngine<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Override the chunk size budget (characters per chunk)
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Generate a summary of `text` targeting at most `max_words` words.
    ///
    /// Fail-soft: backend errors are logged and reported as an empty
    /// summary with `within_budget = false`. Callers check the flag, not
    /// an error value.
    pub fn generate(&self, text: &str, max_words: usize) -> SummaryResult {
        if word_count(text) < MIN_INPUT_WORDS {
            return SummaryResult {
                text: TOO_SHORT_MESSAGE.to_string(),
                within_budget: false,
            };
        }

        match self.negotiate(text, max_words) {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, "summary generation failed");
                SummaryResult {
                    text: String::new(),
                    within_budget: false,
                }
            }
        }
    }

    fn negotiate(&self, text: &str, max_words: usize) -> Result<SummaryResult, InferenceError> {
        let chunks = split_into_chunks(text, self.chunk_size);
        debug!(chunk_count = chunks.len(), max_words, "summarizing");

        let mut parts = Vec::with_capacity(chunks.len());
        for chunk in &chunks {
            let chunk_words = word_count(chunk);
            // Target roughly a third of the chunk, floored at 30 words, and
            // never more than the budget's even share across chunks.
            let target = (max_words / chunks.len()).min((chunk_words / 3).max(CHUNK_TARGET_FLOOR));
            let min_length = (target / 2).min(CHUNK_TARGET_FLOOR);
            parts.push(self.backend.summarize(chunk, target, min_length)?);
        }

        let mut summary = parts.join(" ");

        // One tightening pass over the joined text; no further iteration
        // even if the result is still over budget.
        if word_count(&summary) > max_words {
            debug!(
                joined_words = word_count(&summary),
                "joined summary over budget, re-summarizing"
            );
            summary = self.backend.summarize(&summary, max_words, max_words / 2)?;
        }

        let within_budget = word_count(&summary) <= max_words;
        Ok(SummaryResult {
            text: summary,
            within_budget,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use super::*;

    /// Scripted backend that records every request it receives
    struct ScriptedBackend {
        /// Reply to produce for each call, cycled in order
        replies: RefCell<Vec<String>>,
        calls: Cell<usize>,
        requests: RefCell<Vec<(usize, usize)>>,
    }

    impl ScriptedBackend {
        fn repeating(reply: &str) -> Self {
            Self {
                replies: RefCell::new(vec![reply.to_string()]),
                calls: Cell::new(0),
                requests: RefCell::new(Vec::new()),
            }
        }

        fn with_replies(replies: &[&str]) -> Self {
            Self {
                replies: RefCell::new(replies.iter().map(|s| s.to_string()).collect()),
                calls: Cell::new(0),
                requests: RefCell::new(Vec::new()),
            }
        }
    }

    impl SummaryBackend for ScriptedBackend {
        fn summarize(
            &self,
            _text: &str,
            max_new_tokens: usize,
            min_length: usize,
        ) -> Result<String, InferenceError> {
            let call = self.calls.get();
            self.calls.set(call + 1);
            self.requests.borrow_mut().push((max_new_tokens, min_length));
            let replies = self.replies.borrow();
            Ok(replies[call.min(replies.len() - 1)].clone())
        }
    }

    struct FailingBackend;

    impl SummaryBackend for FailingBackend {
        fn summarize(
            &self,
            _text: &str,
            _max: usize,
            _min: usize,
        ) -> Result<String, InferenceError> {
            Err(InferenceError::Transport("connection refused".to_string()))
        }
    }

    fn words(n: usize) -> String {
        (0..n).map(|i| format!("w{}", i)).collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn test_short_input_returns_sentinel_without_backend_call() {
        let backend = ScriptedBackend::repeating("should never be used");
        let engine = SummaryEngine::new(&backend);

        let result = engine.generate(&words(9), DEFAULT_MAX_WORDS);

        assert_eq!(result.text, TOO_SHORT_MESSAGE);
        assert!(!result.within_budget);
        assert_eq!(backend.calls.get(), 0);
    }

    #[test]
    fn test_exactly_ten_words_is_summarized() {
        let backend = ScriptedBackend::repeating("short enough");
        let engine = SummaryEngine::new(&backend);

        let result = engine.generate(&words(10), DEFAULT_MAX_WORDS);

        assert_eq!(result.text, "short enough");
        assert!(result.within_budget);
        assert_eq!(backend.calls.get(), 1);
    }

    #[test]
    fn test_single_chunk_target_is_third_of_input() {
        // Large chunk budget forces a single chunk for the 500-word input
        let backend = ScriptedBackend::repeating("a compact result");
        let engine = SummaryEngine::new(&backend).with_chunk_size(10_000);

        let result = engine.generate(&words(500), 200);

        assert!(result.within_budget);
        assert_eq!(backend.calls.get(), 1);
        // target = min(200 / 1, max(30, 500 / 3)) = 166, min = min(30, 83) = 30
        assert_eq!(backend.requests.borrow()[0], (166, 30));
    }

    #[test]
    fn test_small_chunk_floors_target_at_thirty() {
        let backend = ScriptedBackend::repeating("tiny");
        let engine = SummaryEngine::new(&backend).with_chunk_size(10_000);

        engine.generate(&words(12), 200);

        // max(30, 12 / 3) = 30, min = min(30, 15) = 15
        assert_eq!(backend.requests.borrow()[0], (30, 15));
    }

    #[test]
    fn test_call_count_bounded_by_chunks_plus_one() {
        // Long per-chunk replies force the tightening pass.
        let long_reply = words(150);
        let backend = ScriptedBackend::repeating(&long_reply);
        let engine = SummaryEngine::new(&backend).with_chunk_size(50);

        let input = words(100);
        let chunk_count = split_into_chunks(&input, 50).len();
        engine.generate(&input, 40);

        assert_eq!(backend.calls.get(), chunk_count + 1);
    }

    #[test]
    fn test_tightening_pass_requests_budget_and_half() {
        let backend = ScriptedBackend::with_replies(&[&words(80), "now within budget"]);
        let engine = SummaryEngine::new(&backend).with_chunk_size(10_000);

        let result = engine.generate(&words(60), 40);

        assert_eq!(result.text, "now within budget");
        assert!(result.within_budget);
        assert_eq!(backend.calls.get(), 2);
        assert_eq!(*backend.requests.borrow().last().unwrap(), (40, 20));
    }

    #[test]
    fn test_no_second_tightening_even_if_still_over() {
        // Backend keeps answering with 80 words; after one tightening pass
        // the over-budget result is returned with the flag false.
        let long_reply = words(80);
        let backend = ScriptedBackend::repeating(&long_reply);
        let engine = SummaryEngine::new(&backend).with_chunk_size(10_000);

        let result = engine.generate(&words(60), 40);

        assert_eq!(backend.calls.get(), 2);
        assert!(!result.within_budget);
        assert_eq!(result.word_count(), 80);
    }

    #[test]
    fn test_within_budget_flag_matches_word_count() {
        for (reply_words, max_words, expected) in [(10, 40, true), (40, 40, true), (41, 40, false)]
        {
            let reply = words(reply_words);
            let backend = ScriptedBackend::repeating(&reply);
            let engine = SummaryEngine::new(&backend).with_chunk_size(10_000);

            let result = engine.generate(&words(30), max_words);
            assert_eq!(result.within_budget, expected, "reply of {} words", reply_words);
        }
    }

    #[test]
    fn test_backend_failure_is_fail_soft() {
        let engine = SummaryEngine::new(FailingBackend);

        let result = engine.generate(&words(50), DEFAULT_MAX_WORDS);

        assert_eq!(result.text, "");
        assert!(!result.within_budget);
    }

    #[test]
    fn test_multi_chunk_summaries_joined_in_order() {
        let backend = ScriptedBackend::with_replies(&["first part", "second part", "third part"]);
        let engine = SummaryEngine::new(&backend).with_chunk_size(60);

        // ~90 chars per 15 words, enough for three chunks at budget 60
        let result = engine.generate(&words(40), 200);

        assert!(result.text.starts_with("first part"));
        assert!(result.text.contains("second part"));
        assert!(result.within_budget);
    }
}
