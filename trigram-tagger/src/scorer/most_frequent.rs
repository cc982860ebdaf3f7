//! Emission-only baseline scorer.

use hashbrown::HashSet;

use crate::counter::{Counter, CounterMap};
use crate::scorer::{LabeledLocalTrigramContext, LocalTrigramContext, LocalTrigramScorer};

/// Scores candidate tags by their empirical frequency for the word alone,
/// ignoring the tag history.
///
/// Known words use the conditional distribution `P(tag | word)`; unknown
/// words fall back to a distribution collected over word *types*: each tag is
/// counted once per distinct word it was first seen with, not once per token.
/// With trigram restriction enabled, candidates are additionally filtered to
/// tags completing a trigram observed in training. If the filter would remove
/// every candidate, it is waived for that call.
#[derive(Debug, Default)]
pub struct MostFrequentTagScorer {
    restrict_trigrams: bool,
    words_to_tags: CounterMap<String, String>,
    unknown_word_tags: Counter<String>,
    seen_tag_trigrams: HashSet<(String, String, String)>,
}

impl MostFrequentTagScorer {
    /// Creates a scorer; `restrict_trigrams` enables the observed-trigram
    /// candidate filter.
    pub fn new(restrict_trigrams: bool) -> Self {
        Self {
            restrict_trigrams,
            words_to_tags: CounterMap::new(),
            unknown_word_tags: Counter::new(),
            seen_tag_trigrams: HashSet::new(),
        }
    }
}

impl LocalTrigramScorer for MostFrequentTagScorer {
    fn log_score_counter(&self, context: &LocalTrigramContext<'_>) -> Counter<String> {
        let word = context.current_word();
        let tag_counter = if self.words_to_tags.contains_key(word) {
            self.words_to_tags.counter(word)
        } else {
            &self.unknown_word_tags
        };

        let allowed: HashSet<&String> = tag_counter
            .keys()
            .filter(|tag| {
                self.seen_tag_trigrams.contains(&(
                    context.prev_prev_tag().to_string(),
                    context.prev_tag().to_string(),
                    (*tag).clone(),
                ))
            })
            .collect();

        let mut log_scores = Counter::new();
        for (tag, probability) in tag_counter.iter() {
            if !self.restrict_trigrams || allowed.is_empty() || allowed.contains(tag) {
                log_scores.set(tag.clone(), probability.ln());
            }
        }
        log_scores
    }

    fn train(&mut self, contexts: &[LabeledLocalTrigramContext<'_>]) {
        for context in contexts {
            let word = context.current_word();
            let tag = context.current_tag();
            if !self.words_to_tags.contains_key(word) {
                // First sighting of this word type.
                self.unknown_word_tags.increment(tag.to_string(), 1.0);
            }
            self.words_to_tags
                .increment(word.to_string(), tag.to_string(), 1.0);
            self.seen_tag_trigrams.insert((
                context.prev_prev_tag().to_string(),
                context.prev_tag().to_string(),
                tag.to_string(),
            ));
        }
        self.words_to_tags.conditional_normalize();
        self.unknown_word_tags.normalize();
    }
}
