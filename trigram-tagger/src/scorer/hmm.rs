//! Smoothed trigram hidden Markov model scorer.

use hashbrown::HashSet;

use crate::counter::{Counter, CounterMap};
use crate::scorer::{LabeledLocalTrigramContext, LocalTrigramContext, LocalTrigramScorer};
use crate::shape::WordShape;

/// Default interpolation weight of the trigram transition estimate.
pub const DEFAULT_TRIGRAM_LAMBDA: f64 = 0.6;

/// Default interpolation weight of the bigram transition estimate.
pub const DEFAULT_BIGRAM_LAMBDA: f64 = 0.25;

/// Default interpolation weight of the unigram transition estimate.
pub const DEFAULT_UNIGRAM_LAMBDA: f64 = 0.15;

/// Default training frequency below which a word also feeds its shape bucket.
pub const DEFAULT_RARE_WORD_CUTOFF: u32 = 5;

/// Scores candidate tags with a trigram hidden Markov model.
///
/// The probability of a tag is the product of an interpolated transition
/// estimate and an emission estimate,
///
/// ```text
/// P(tag | ctx) = (l3 * tri/bi + l2 * bi/uni + l1 * uni/N) * emission/N
/// ```
///
/// where `l3`, `l2` and `l1` are the trigram, bigram and unigram
/// interpolation weights, `tri`, `bi` and `uni` are the training counts of
/// `(prev_prev_tag, prev_tag, tag)`, `(prev_tag, tag)` and `tag`, `N` is the
/// total number of tag tokens seen, and `emission` is the count of the tag on
/// the current word. A term whose denominator is zero contributes nothing
/// instead of dividing. The returned score is the natural logarithm of the
/// product, so an impossible tag comes out as negative infinity.
///
/// Words never seen in training are looked up through a [`WordShape`] bucket
/// instead of the word table. The buckets are populated during training by
/// every occurrence of a word still below the rare-word cutoff, so rare-word
/// statistics stand in for unseen words of the same shape.
#[derive(Debug)]
pub struct HmmTagScorer {
    trigram_lambda: f64,
    bigram_lambda: f64,
    unigram_lambda: f64,
    rare_word_cutoff: u32,
    words_to_tags: CounterMap<String, String>,
    shape_tags: CounterMap<WordShape, String>,
    trigram_tags: Counter<(String, String, String)>,
    bigram_tags: Counter<(String, String)>,
    unigram_tags: Counter<String>,
    rare_word_counts: Counter<String>,
    seen_words: HashSet<String>,
    total_tags: f64,
}

impl HmmTagScorer {
    /// Creates a scorer with the given interpolation weights and rare-word
    /// cutoff.
    pub fn new(
        trigram_lambda: f64,
        bigram_lambda: f64,
        unigram_lambda: f64,
        rare_word_cutoff: u32,
    ) -> Self {
        Self {
            trigram_lambda,
            bigram_lambda,
            unigram_lambda,
            rare_word_cutoff,
            words_to_tags: CounterMap::new(),
            shape_tags: CounterMap::new(),
            trigram_tags: Counter::new(),
            bigram_tags: Counter::new(),
            unigram_tags: Counter::new(),
            rare_word_counts: Counter::new(),
            seen_words: HashSet::new(),
            total_tags: 0.0,
        }
    }

    /// The tag distribution to score a word against: the word's own training
    /// counts if it was ever seen, otherwise the counts of its shape bucket.
    fn tag_counter_for(&self, word: &str, position: usize) -> &Counter<String> {
        if self.seen_words.contains(word) {
            self.words_to_tags.counter(word)
        } else {
            self.shape_tags.counter(&WordShape::classify(word, position))
        }
    }
}

impl Default for HmmTagScorer {
    fn default() -> Self {
        Self::new(
            DEFAULT_TRIGRAM_LAMBDA,
            DEFAULT_BIGRAM_LAMBDA,
            DEFAULT_UNIGRAM_LAMBDA,
            DEFAULT_RARE_WORD_CUTOFF,
        )
    }
}

impl LocalTrigramScorer for HmmTagScorer {
    fn log_score_counter(&self, context: &LocalTrigramContext<'_>) -> Counter<String> {
        let word = context.current_word();
        let tag_counter = self.tag_counter_for(word, context.position());

        let mut log_scores = Counter::new();
        for (tag, emission_count) in tag_counter.iter() {
            let trigram_count = self.trigram_tags.count(&(
                context.prev_prev_tag().to_string(),
                context.prev_tag().to_string(),
                tag.clone(),
            ));
            let bigram_count = self
                .bigram_tags
                .count(&(context.prev_tag().to_string(), tag.clone()));
            let unigram_count = self.unigram_tags.count(tag);

            let mut transition = self.unigram_lambda * unigram_count / self.total_tags;
            if bigram_count != 0.0 {
                transition += self.trigram_lambda * trigram_count / bigram_count;
            }
            if unigram_count != 0.0 {
                transition += self.bigram_lambda * bigram_count / unigram_count;
            }
            let emission = emission_count / self.total_tags;

            log_scores.set(tag.clone(), (transition * emission).ln());
        }
        log_scores
    }

    fn train(&mut self, contexts: &[LabeledLocalTrigramContext<'_>]) {
        for context in contexts {
            let word = context.current_word();
            let tag = context.current_tag();

            let rare = !self.seen_words.contains(word)
                || self.rare_word_counts.count(word) < f64::from(self.rare_word_cutoff);
            if rare {
                let shape = WordShape::classify(word, context.position());
                self.shape_tags.increment(shape, tag.to_string(), 1.0);
                self.rare_word_counts.increment(word.to_string(), 1.0);
            }

            self.words_to_tags
                .increment(word.to_string(), tag.to_string(), 1.0);
            self.trigram_tags.increment(
                (
                    context.prev_prev_tag().to_string(),
                    context.prev_tag().to_string(),
                    tag.to_string(),
                ),
                1.0,
            );
            self.bigram_tags
                .increment((context.prev_tag().to_string(), tag.to_string()), 1.0);
            self.unigram_tags.increment(tag.to_string(), 1.0);
            self.seen_words.insert(word.to_string());
            self.total_tags += 1.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentence::{PaddedSeq, TaggedSentence, START_TAG};
    use crate::tagger::extract_labeled_contexts;

    fn owned(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn trained(scorer: &mut HmmTagScorer, data: &[(&[&str], &[&str])]) {
        let sentences: Vec<TaggedSentence> = data
            .iter()
            .map(|(words, tags)| TaggedSentence::new(owned(words), owned(tags)).unwrap())
            .collect();
        let contexts = extract_labeled_contexts(&sentences).unwrap();
        scorer.train(&contexts);
    }

    #[test]
    fn test_known_word_with_observed_history() {
        let mut scorer = HmmTagScorer::default();
        trained(&mut scorer, &[(&["a"], &["A"])]);
        // Three tag tokens in total: A once, the stop tag twice.
        let words = owned(&["a"]);
        let padded = PaddedSeq::words(&words);
        let context = LocalTrigramContext::new(padded, 0, START_TAG, START_TAG).unwrap();

        let log_scores = scorer.log_score_counter(&context);

        // transition = 0.6*(1/1) + 0.25*(1/1) + 0.15*(1/3) = 0.9,
        // emission = 1/3, so the score is ln(0.3).
        assert_eq!(1, log_scores.len());
        assert!((log_scores.count("A") - 0.3f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn test_unobserved_history_drops_zero_denominator_terms() {
        let mut scorer = HmmTagScorer::default();
        trained(&mut scorer, &[(&["a"], &["A"])]);
        let words = owned(&["a"]);
        let padded = PaddedSeq::words(&words);
        let context = LocalTrigramContext::new(padded, 0, "X", "Y").unwrap();

        let log_scores = scorer.log_score_counter(&context);

        // The (Y, A) bigram was never seen, so only the unigram term is left:
        // transition = 0.15*(1/3), emission = 1/3.
        assert!((log_scores.count("A") - (0.05f64 / 3.0).ln()).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_word_scored_through_shape_bucket() {
        let mut scorer = HmmTagScorer::default();
        trained(&mut scorer, &[(&["a"], &["A"])]);
        // "b" was never seen; at position 0 it borrows the first-word bucket,
        // which was fed by the training occurrence of "a".
        let words = owned(&["b"]);
        let padded = PaddedSeq::words(&words);
        let context = LocalTrigramContext::new(padded, 0, START_TAG, START_TAG).unwrap();

        let log_scores = scorer.log_score_counter(&context);

        assert_eq!(1, log_scores.len());
        assert!((log_scores.count("A") - 0.3f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_word_with_empty_bucket_has_no_candidates() {
        let mut scorer = HmmTagScorer::default();
        trained(&mut scorer, &[(&["a"], &["A"])]);
        // "zzz" at a non-initial position classifies as lowercase, a bucket
        // nothing in training fed.
        let words = owned(&["a", "zzz"]);
        let padded = PaddedSeq::words(&words);
        let context = LocalTrigramContext::new(padded, 1, START_TAG, "A").unwrap();

        let log_scores = scorer.log_score_counter(&context);

        assert!(log_scores.is_empty());
    }

    #[test]
    fn test_scores_multiply_two_probabilities_and_do_not_normalize() {
        let mut scorer = HmmTagScorer::default();
        trained(&mut scorer, &[(&["a"], &["A"]), (&["a"], &["B"])]);
        let words = owned(&["a"]);
        let padded = PaddedSeq::words(&words);
        let context = LocalTrigramContext::new(padded, 0, START_TAG, START_TAG).unwrap();

        let log_scores = scorer.log_score_counter(&context);

        let sum: f64 = log_scores.iter().map(|(_, score)| score.exp()).sum();
        assert!(sum <= 1.0 + 1e-9);
        assert!((sum - 1.0).abs() > 1e-6);
    }

    #[test]
    fn test_rare_word_cutoff_controls_bucket_feeding() {
        // With a cutoff of one, the second occurrence of "x" no longer feeds
        // its shape bucket; with a cutoff of two it still does.
        let words_tags: &[(&[&str], &[&str])] = &[(&["x", "x"], &["N", "V"])];

        let mut strict = HmmTagScorer::new(0.6, 0.25, 0.15, 1);
        trained(&mut strict, words_tags);
        let mut lenient = HmmTagScorer::new(0.6, 0.25, 0.15, 2);
        trained(&mut lenient, words_tags);

        // "q" at position 1 classifies as lowercase, the bucket the second
        // occurrence of "x" would feed.
        let words = owned(&["x", "q"]);
        let padded = PaddedSeq::words(&words);
        let context = LocalTrigramContext::new(padded, 1, START_TAG, "N").unwrap();

        assert!(strict.log_score_counter(&context).is_empty());
        assert!(lenient.log_score_counter(&context).contains("V"));
    }

    #[test]
    fn test_seen_word_never_routed_through_buckets() {
        let mut scorer = HmmTagScorer::default();
        trained(&mut scorer, &[(&["a"], &["A"])]);
        // "a" classifies as lowercase away from position 0, and that bucket
        // is empty. The word was seen, so it must answer from its own tag
        // counts anyway.
        let words = owned(&["b", "a"]);
        let padded = PaddedSeq::words(&words);
        let context = LocalTrigramContext::new(padded, 1, START_TAG, "A").unwrap();

        let log_scores = scorer.log_score_counter(&context);

        assert!((log_scores.count("A") - (0.05f64 / 3.0).ln()).abs() < 1e-12);
    }
}
