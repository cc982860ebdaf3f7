//! Sentences and their boundary-padded views.

use crate::errors::{Result, TaggerError};

/// Virtual word prepended to every sentence.
pub const START_WORD: &str = "<S>";
/// Virtual word appended to every sentence.
pub const STOP_WORD: &str = "</S>";
/// Tag of the virtual start words.
pub const START_TAG: &str = "<S>";
/// Tag of the virtual stop words.
pub const STOP_TAG: &str = "</S>";

/// A view of a word or tag sequence padded with virtual boundary items.
///
/// Indices are signed: negative indices resolve to the leading boundary
/// marker and indices past the end to the trailing one, so a two-tag history
/// is defined even at the first real position.
#[derive(Clone, Copy, Debug)]
pub struct PaddedSeq<'a> {
    items: &'a [String],
    before: &'a str,
    after: &'a str,
}

impl<'a> PaddedSeq<'a> {
    /// Creates a view of `words` padded with the word boundary markers.
    pub fn words(words: &'a [String]) -> Self {
        Self {
            items: words,
            before: START_WORD,
            after: STOP_WORD,
        }
    }

    /// Creates a view of `tags` padded with the tag boundary markers.
    pub fn tags(tags: &'a [String]) -> Self {
        Self {
            items: tags,
            before: START_TAG,
            after: STOP_TAG,
        }
    }

    /// Number of real items, padding excluded.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the view contains no real items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the item at `index`, resolving out-of-range indices to the
    /// boundary markers.
    pub fn get(&self, index: isize) -> &'a str {
        if index < 0 {
            self.before
        } else if index as usize >= self.items.len() {
            self.after
        } else {
            &self.items[index as usize]
        }
    }
}

/// A sentence whose words carry gold tags.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaggedSentence {
    words: Vec<String>,
    tags: Vec<String>,
}

impl TaggedSentence {
    /// Creates a tagged sentence.
    ///
    /// # Errors
    ///
    /// [`TaggerError::InvalidArgument`] is returned if `words` and `tags`
    /// have different lengths.
    pub fn new(words: Vec<String>, tags: Vec<String>) -> Result<Self> {
        if words.len() != tags.len() {
            return Err(TaggerError::invalid_argument(
                "tags",
                format!(
                    "must have one tag per word ({} words, {} tags)",
                    words.len(),
                    tags.len()
                ),
            ));
        }
        Ok(Self { words, tags })
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` if the sentence has no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// The words, without boundary markers.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// The gold tags, aligned with [`Self::words`].
    pub fn tags(&self) -> &[String] {
        &self.tags
    }
}
