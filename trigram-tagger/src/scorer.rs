//! Scoring of candidate tags in trigram contexts.

pub mod hmm;
pub mod most_frequent;

use crate::counter::Counter;
use crate::errors::{Result, TaggerError};
use crate::sentence::PaddedSeq;

/// A position in a sentence together with the two preceding tags.
///
/// The word sequence is carried as a padded view, so the current word at the
/// two trailing positions resolves to the stop marker.
#[derive(Clone, Copy, Debug)]
pub struct LocalTrigramContext<'a> {
    words: PaddedSeq<'a>,
    position: usize,
    prev_prev_tag: &'a str,
    prev_tag: &'a str,
}

impl<'a> LocalTrigramContext<'a> {
    /// Creates a context at `position` within the padded sentence.
    ///
    /// # Errors
    ///
    /// [`TaggerError::InvalidContext`] is returned if `position` lies beyond
    /// the padded range `0 ..= words.len() + 1`.
    pub fn new(
        words: PaddedSeq<'a>,
        position: usize,
        prev_prev_tag: &'a str,
        prev_tag: &'a str,
    ) -> Result<Self> {
        if position > words.len() + 1 {
            return Err(TaggerError::invalid_context(format!(
                "position {} lies outside the padded sentence of {} words",
                position,
                words.len()
            )));
        }
        Ok(Self {
            words,
            position,
            prev_prev_tag,
            prev_tag,
        })
    }

    /// The word at this context's position.
    pub fn current_word(&self) -> &'a str {
        self.words.get(self.position as isize)
    }

    /// Position within the sentence.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Tag two positions back.
    pub fn prev_prev_tag(&self) -> &'a str {
        self.prev_prev_tag
    }

    /// Tag one position back.
    pub fn prev_tag(&self) -> &'a str {
        self.prev_tag
    }

    /// The padded word sequence.
    pub fn words(&self) -> PaddedSeq<'a> {
        self.words
    }
}

/// A [`LocalTrigramContext`] carrying the gold tag observed at its position.
#[derive(Clone, Copy, Debug)]
pub struct LabeledLocalTrigramContext<'a> {
    context: LocalTrigramContext<'a>,
    current_tag: &'a str,
}

impl<'a> LabeledLocalTrigramContext<'a> {
    /// Attaches a gold tag to a context.
    pub fn new(context: LocalTrigramContext<'a>, current_tag: &'a str) -> Self {
        Self {
            context,
            current_tag,
        }
    }

    /// The unlabeled context.
    pub fn context(&self) -> &LocalTrigramContext<'a> {
        &self.context
    }

    /// The gold tag at this position.
    pub fn current_tag(&self) -> &'a str {
        self.current_tag
    }

    /// The word at this context's position.
    pub fn current_word(&self) -> &'a str {
        self.context.current_word()
    }

    /// Position within the sentence.
    pub fn position(&self) -> usize {
        self.context.position()
    }

    /// Tag two positions back.
    pub fn prev_prev_tag(&self) -> &'a str {
        self.context.prev_prev_tag()
    }

    /// Tag one position back.
    pub fn prev_tag(&self) -> &'a str {
        self.context.prev_tag()
    }
}

/// Strategy producing a sparse log-probability distribution over the tags
/// that may follow a trigram context.
///
/// Absence from the returned counter means the model assigns that tag
/// probability zero in this context; callers must not fill in defaults for
/// missing tags.
pub trait LocalTrigramScorer {
    /// Log score of every candidate tag for this context.
    fn log_score_counter(&self, context: &LocalTrigramContext<'_>) -> Counter<String>;

    /// Accumulates sufficient statistics from gold-labeled contexts.
    fn train(&mut self, contexts: &[LabeledLocalTrigramContext<'_>]);

    /// Hook for tuning against held-out contexts; the bundled scorers leave
    /// it a no-op.
    fn validate(&mut self, _contexts: &[LabeledLocalTrigramContext<'_>]) {}
}
