//! # trigram-tagger
//!
//! A second-order hidden Markov model part-of-speech tagger with Viterbi
//! decoding.
//!
//! ## Examples
//!
//! ```
//! use trigram_tagger::{HmmTagScorer, TaggedSentence, Tagger, ViterbiDecoder};
//!
//! let corpus = vec![
//!     TaggedSentence::new(
//!         vec!["The".into(), "dog".into(), "runs".into()],
//!         vec!["DT".into(), "NN".into(), "VBZ".into()],
//!     )
//!     .unwrap(),
//!     TaggedSentence::new(
//!         vec!["The".into(), "cat".into(), "runs".into()],
//!         vec!["DT".into(), "NN".into(), "VBZ".into()],
//!     )
//!     .unwrap(),
//! ];
//!
//! let mut tagger = Tagger::new(Box::new(HmmTagScorer::default()), Box::new(ViterbiDecoder));
//! tagger.train(&corpus).unwrap();
//!
//! let words = vec!["The".to_string(), "dog".to_string(), "runs".to_string()];
//! let tags = tagger.tag(&words).unwrap();
//! assert_eq!(vec!["DT", "NN", "VBZ"], tags);
//! ```

mod counter;
mod decoder;
pub mod errors;
mod evaluate;
mod scorer;
mod sentence;
mod shape;
mod state;
mod tagger;
mod treebank;
mod trellis;

pub use counter::{Counter, CounterMap};
pub use decoder::{BestPath, GreedyDecoder, TrellisDecoder, ViterbiDecoder};
pub use errors::{Result, TaggerError};
pub use evaluate::{evaluate_tagger, extract_vocabulary, Evaluation};
pub use scorer::hmm::{
    HmmTagScorer, DEFAULT_BIGRAM_LAMBDA, DEFAULT_RARE_WORD_CUTOFF, DEFAULT_TRIGRAM_LAMBDA,
    DEFAULT_UNIGRAM_LAMBDA,
};
pub use scorer::most_frequent::MostFrequentTagScorer;
pub use scorer::{LabeledLocalTrigramContext, LocalTrigramContext, LocalTrigramScorer};
pub use sentence::{PaddedSeq, TaggedSentence, START_TAG, START_WORD, STOP_TAG, STOP_WORD};
pub use shape::WordShape;
pub use state::{StateData, StateId, StateSpace};
pub use tagger::Tagger;
pub use treebank::{parse_trees, read_tagged_sentences, Tree};
pub use trellis::Trellis;
