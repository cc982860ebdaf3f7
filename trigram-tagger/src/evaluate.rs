//! Tagger evaluation against gold-tagged corpora.

use hashbrown::HashSet;

use crate::errors::Result;
use crate::sentence::TaggedSentence;
use crate::tagger::Tagger;

/// Aggregate counters produced by [`evaluate_tagger`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Evaluation {
    n_tags: usize,
    n_correct: usize,
    n_unknown: usize,
    n_unknown_correct: usize,
    n_suboptimal: usize,
}

impl Evaluation {
    /// Fraction of all positions tagged correctly.
    pub fn accuracy(&self) -> f64 {
        self.n_correct as f64 / self.n_tags as f64
    }

    /// Fraction of out-of-vocabulary positions tagged correctly.
    pub fn unknown_accuracy(&self) -> f64 {
        self.n_unknown_correct as f64 / self.n_unknown as f64
    }

    /// Number of positions evaluated.
    pub fn n_tags(&self) -> usize {
        self.n_tags
    }

    /// Number of out-of-vocabulary positions evaluated.
    pub fn n_unknown(&self) -> usize {
        self.n_unknown
    }

    /// Number of sentences where the gold tagging outscored the decoded one.
    pub fn suboptimalities(&self) -> usize {
        self.n_suboptimal
    }
}

/// Collects the distinct words of a corpus.
///
/// Evaluation classifies a test word as unknown when it is absent from the
/// training vocabulary; the scorers themselves never consult this set.
pub fn extract_vocabulary(sentences: &[TaggedSentence]) -> HashSet<String> {
    let mut vocabulary = HashSet::new();
    for sentence in sentences {
        for word in sentence.words() {
            vocabulary.insert(word.clone());
        }
    }
    vocabulary
}

/// Tags every sentence and accumulates accuracy counters.
///
/// Decoded tags are compared position by position against the gold tags,
/// with words outside `vocabulary` tallied separately. Each sentence's gold
/// tagging is also scored under the model and compared against the score of
/// the decoded tagging; a gold tagging scoring strictly higher means the
/// decoder settled for a suboptimal path, which is counted and logged but is
/// not an error.
///
/// The `inspect` callback receives every gold sentence together with its
/// decoded tags and whether the decoder was suboptimal on it, so drivers can
/// print per-sentence diagnostics.
///
/// # Errors
///
/// Propagates tagging failures, including [`TaggerError::NoPath`] when the
/// model admits no tag sequence for a sentence.
///
/// [`TaggerError::NoPath`]: crate::errors::TaggerError::NoPath
pub fn evaluate_tagger<F>(
    tagger: &Tagger,
    sentences: &[TaggedSentence],
    vocabulary: &HashSet<String>,
    mut inspect: F,
) -> Result<Evaluation>
where
    F: FnMut(&TaggedSentence, &[String], bool),
{
    let mut evaluation = Evaluation::default();
    for sentence in sentences {
        let guessed_tags = tagger.tag(sentence.words())?;
        for (position, word) in sentence.words().iter().enumerate() {
            let correct = guessed_tags[position] == sentence.tags()[position];
            if correct {
                evaluation.n_correct += 1;
            }
            evaluation.n_tags += 1;
            if !vocabulary.contains(word) {
                if correct {
                    evaluation.n_unknown_correct += 1;
                }
                evaluation.n_unknown += 1;
            }
        }

        let gold_score = tagger.score_tagging(sentence)?;
        let guessed = TaggedSentence::new(sentence.words().to_vec(), guessed_tags)?;
        let guessed_score = tagger.score_tagging(&guessed)?;
        let suboptimal = gold_score > guessed_score;
        if suboptimal {
            evaluation.n_suboptimal += 1;
            log::warn!(
                "decoder suboptimality: gold tagging scores {}, guessed tagging scores {}",
                gold_score,
                guessed_score
            );
        }
        inspect(sentence, guessed.tags(), suboptimal);
    }
    Ok(evaluation)
}
