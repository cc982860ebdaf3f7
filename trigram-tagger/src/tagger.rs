//! The tagging pipeline tying scorer, trellis and decoder together.

use hashbrown::HashSet;

use crate::decoder::TrellisDecoder;
use crate::errors::{Result, TaggerError};
use crate::scorer::{LabeledLocalTrigramContext, LocalTrigramContext, LocalTrigramScorer};
use crate::sentence::{PaddedSeq, TaggedSentence};
use crate::state::{StateId, StateSpace};
use crate::trellis::Trellis;

/// Slices labeled sentences into the per-position trigram contexts the
/// scorers train on. Each sentence contributes one context per word plus two
/// trailing stop contexts, so transitions into the sentence boundary are
/// learned as well.
pub(crate) fn extract_labeled_contexts(
    sentences: &[TaggedSentence],
) -> Result<Vec<LabeledLocalTrigramContext<'_>>> {
    let mut contexts = Vec::new();
    for sentence in sentences {
        extract_sentence_contexts(sentence, &mut contexts)?;
    }
    Ok(contexts)
}

fn extract_sentence_contexts<'a>(
    sentence: &'a TaggedSentence,
    contexts: &mut Vec<LabeledLocalTrigramContext<'a>>,
) -> Result<()> {
    let words = PaddedSeq::words(sentence.words());
    let tags = PaddedSeq::tags(sentence.tags());
    for position in 0..=sentence.len() + 1 {
        let index = position as isize;
        let context =
            LocalTrigramContext::new(words, position, tags.get(index - 2), tags.get(index - 1))?;
        contexts.push(LabeledLocalTrigramContext::new(context, tags.get(index)));
    }
    Ok(())
}

/// A part-of-speech tagger pairing a scoring model with a decoding strategy.
///
/// The tagger trains its scorer on labeled sentences, then tags raw word
/// sequences by unrolling a [`Trellis`](crate::trellis::Trellis) of tag
/// history states and letting its decoder search for the best path.
pub struct Tagger {
    scorer: Box<dyn LocalTrigramScorer>,
    decoder: Box<dyn TrellisDecoder<StateId>>,
}

impl Tagger {
    /// Creates a new tagger.
    ///
    /// # Arguments
    ///
    /// * `scorer` - A model assigning log-probabilities to candidate tags.
    /// * `decoder` - A search strategy over the tag trellis.
    pub fn new(
        scorer: Box<dyn LocalTrigramScorer>,
        decoder: Box<dyn TrellisDecoder<StateId>>,
    ) -> Self {
        Self { scorer, decoder }
    }

    /// Trains the underlying scorer on labeled sentences.
    pub fn train(&mut self, sentences: &[TaggedSentence]) -> Result<()> {
        let contexts = extract_labeled_contexts(sentences)?;
        self.scorer.train(&contexts);
        Ok(())
    }

    /// Passes held-out labeled sentences to the scorer's validation hook.
    pub fn validate(&mut self, sentences: &[TaggedSentence]) -> Result<()> {
        let contexts = extract_labeled_contexts(sentences)?;
        self.scorer.validate(&contexts);
        Ok(())
    }

    /// Tags a sentence.
    ///
    /// # Arguments
    ///
    /// * `words` - The words of the sentence, without boundary markers.
    ///
    /// # Returns
    ///
    /// One tag per word, with the boundary tags already stripped.
    ///
    /// # Errors
    ///
    /// [`TaggerError::NoPath`] when the model admits no tag sequence for the
    /// sentence, which happens when every candidate distribution at some
    /// position comes back empty.
    pub fn tag(&self, words: &[String]) -> Result<Vec<String>> {
        let mut states = StateSpace::new();
        let trellis = self.build_trellis(&mut states, words)?;
        let path = self.decoder.best_path(&trellis);
        if path.states.last() != Some(&trellis.end()) {
            return Err(TaggerError::no_path(format!(
                "no tag path reaches the end of the sentence ({} words)",
                words.len()
            )));
        }
        let mut tags = states.tag_sequence(&path.states);
        tags.drain(..2);
        tags.truncate(tags.len() - 2);
        Ok(tags)
    }

    /// Scores a gold tagging under the trained model.
    ///
    /// Sums the scorer's log-probability of the gold tag over every position.
    /// A position whose gold tag falls outside the scorer's candidate set
    /// contributes negative infinity, marking the whole tagging impossible
    /// under the model. Comparing this score against the score of a decoded
    /// tagging exposes decoder suboptimalities.
    pub fn score_tagging(&self, sentence: &TaggedSentence) -> Result<f64> {
        let mut contexts = Vec::new();
        extract_sentence_contexts(sentence, &mut contexts)?;
        let mut log_score = 0.0;
        for context in &contexts {
            let log_scores = self.scorer.log_score_counter(context.context());
            match log_scores.get(context.current_tag()) {
                Some(score) => log_score += score,
                None => log_score += f64::NEG_INFINITY,
            }
        }
        Ok(log_score)
    }

    /// Unrolls the trellis for a sentence, one frontier of live states per
    /// position. Every live state asks the scorer for its candidate tags and
    /// installs one edge per candidate; states whose candidate set is empty
    /// simply spawn no successors.
    fn build_trellis(&self, states: &mut StateSpace, words: &[String]) -> Result<Trellis<StateId>> {
        let padded = PaddedSeq::words(words);
        let start = states.start();
        let stop = states.stop(words.len() + 2);
        let mut trellis = Trellis::new(start, stop);

        let mut frontier = vec![start];
        for position in 0..=words.len() + 1 {
            let mut next_frontier = HashSet::new();
            for &state in &frontier {
                if state == stop {
                    continue;
                }
                let data = states.get(state);
                let (prev_prev_tag, prev_tag) =
                    (data.prev_prev_tag().to_string(), data.prev_tag().to_string());
                let context =
                    LocalTrigramContext::new(padded, position, &prev_prev_tag, &prev_tag)?;
                let log_scores = self.scorer.log_score_counter(&context);
                for (tag, log_score) in log_scores.iter() {
                    let next = states.next(state, tag);
                    trellis.set_transition_weight(state, next, log_score);
                    next_frontier.insert(next);
                }
            }
            frontier = next_frontier.into_iter().collect();
        }
        Ok(trellis)
    }
}
