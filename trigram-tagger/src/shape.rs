//! Word-shape classification for rare and unseen words.

use std::sync::LazyLock;

use regex::Regex;

/// Surface-form class of a word, used to pool tag statistics for words too
/// rare to estimate on their own.
///
/// Classification is deterministic and total: position 0 always maps to
/// [`WordShape::FirstWord`], otherwise the first matching rule of an ordered
/// pattern ladder wins, so every word lands in exactly one bucket. The ladder
/// order is part of the model definition. Several patterns overlap, so
/// reordering them changes which bucket ambiguous shapes fall into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WordShape {
    /// Sentence-initial position, regardless of surface form.
    FirstWord,
    /// No letters or digits at all.
    Punctuation,
    /// Leading apostrophe followed by letters, e.g. `'s`.
    ApostrophePrefix,
    /// Single letter, apostrophe, single letter, e.g. `n't`.
    NegationContraction,
    ApostropheInfix,
    InitCap,
    /// One capital letter and a period.
    CapPeriod,
    /// Short letter runs separated by periods, e.g. `U.S.`.
    Abbreviation,
    AllCaps,
    Lowercase,
    MixedLetters,
    LettersDash,
    LettersAmpersand,
    DecimalNumber,
    CommaNumber,
    CommaDecimalNumber,
    TwoDigitNumber,
    FourDigitNumber,
    LongNumber,
    DigitsDash,
    /// Digits and literal backslashes.
    DigitsBackslash,
    DigitsSlash,
    Alphanumeric,
    AlphanumericDash,
    /// Letters and digits mixed with periods, apostrophes or dashes.
    AlphanumericSymbols,
    NoDigits,
    NoLetters,
    /// Fallback when no pattern matches.
    Other,
}

static SHAPE_LADDER: LazyLock<Vec<(Regex, WordShape)>> = LazyLock::new(|| {
    [
        (r"^[^a-zA-Z0-9]+$", WordShape::Punctuation),
        (r"^'[a-zA-Z]+$", WordShape::ApostrophePrefix),
        (r"^[a-zA-Z]'[a-zA-Z]$", WordShape::NegationContraction),
        (r"^[a-zA-Z]+'[a-zA-Z]+$", WordShape::ApostropheInfix),
        (r"^[A-Z][a-z]+$", WordShape::InitCap),
        (r"^[A-Z]\.$", WordShape::CapPeriod),
        (
            r"^[a-zA-Z]{1,5}\.([a-zA-Z](\.([a-zA-Z](\.([a-zA-Z](\.([a-zA-Z](\.)?)?)?)?)?)?)?)?$",
            WordShape::Abbreviation,
        ),
        (r"^[A-Z]+$", WordShape::AllCaps),
        (r"^[a-z]+$", WordShape::Lowercase),
        (r"^[a-zA-Z]+$", WordShape::MixedLetters),
        (r"^[a-zA-Z\-]+$", WordShape::LettersDash),
        (r"^[a-zA-Z&]+$", WordShape::LettersAmpersand),
        (r"^[0-9]*\.[0-9]+$", WordShape::DecimalNumber),
        (r"^[0-9]*,[0-9]+$", WordShape::CommaNumber),
        (r"^[0-9]+,[0-9]+\.[0-9]+$", WordShape::CommaDecimalNumber),
        (r"^[0-9]{1,2}$", WordShape::TwoDigitNumber),
        (r"^[0-9]{1,4}$", WordShape::FourDigitNumber),
        (r"^[0-9]+$", WordShape::LongNumber),
        (r"^[0-9\-]+$", WordShape::DigitsDash),
        (r"^[0-9\\]+$", WordShape::DigitsBackslash),
        (r"^[0-9/]+$", WordShape::DigitsSlash),
        (r"^[a-zA-Z0-9]+$", WordShape::Alphanumeric),
        (r"^[a-zA-Z0-9\-]+$", WordShape::AlphanumericDash),
        (r"^[a-zA-Z0-9.'\-]+$", WordShape::AlphanumericSymbols),
        (r"^[^0-9]+$", WordShape::NoDigits),
        (r"^[^a-zA-Z]+$", WordShape::NoLetters),
    ]
    .into_iter()
    .map(|(pattern, shape)| (Regex::new(pattern).unwrap(), shape))
    .collect()
});

impl WordShape {
    /// Classifies a word into its shape bucket.
    ///
    /// `position` is the word's index within its sentence; index 0
    /// short-circuits to [`WordShape::FirstWord`] before any pattern is
    /// tried.
    pub fn classify(word: &str, position: usize) -> Self {
        if position == 0 {
            return Self::FirstWord;
        }
        for (pattern, shape) in SHAPE_LADDER.iter() {
            if pattern.is_match(word) {
                return *shape;
            }
        }
        Self::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_zero_wins_over_every_pattern() {
        assert_eq!(WordShape::FirstWord, WordShape::classify("The", 0));
        assert_eq!(WordShape::FirstWord, WordShape::classify("1984", 0));
        assert_eq!(WordShape::FirstWord, WordShape::classify(",", 0));
        assert_ne!(WordShape::FirstWord, WordShape::classify("The", 1));
    }

    #[test]
    fn test_ladder_examples() {
        #[rustfmt::skip]
        let expected = [
            (",",             WordShape::Punctuation),
            ("--",            WordShape::Punctuation),
            ("'s",            WordShape::ApostrophePrefix),
            ("n't",           WordShape::NegationContraction),
            ("don't",         WordShape::ApostropheInfix),
            ("The",           WordShape::InitCap),
            ("B.",            WordShape::CapPeriod),
            ("U.S.",          WordShape::Abbreviation),
            ("Corp.",         WordShape::Abbreviation),
            ("IBM",           WordShape::AllCaps),
            ("dog",           WordShape::Lowercase),
            ("iPhone",        WordShape::MixedLetters),
            ("mother-in-law", WordShape::LettersDash),
            ("AT&T",          WordShape::LettersAmpersand),
            ("3.14",          WordShape::DecimalNumber),
            (".5",            WordShape::DecimalNumber),
            ("1,000",         WordShape::CommaNumber),
            ("1,234.56",      WordShape::CommaDecimalNumber),
            ("7",             WordShape::TwoDigitNumber),
            ("42",            WordShape::TwoDigitNumber),
            ("1984",          WordShape::FourDigitNumber),
            ("123456",        WordShape::LongNumber),
            ("555-1212",      WordShape::DigitsDash),
            (r"3\4",          WordShape::DigitsBackslash),
            ("3/4",           WordShape::DigitsSlash),
            ("R2D2",          WordShape::Alphanumeric),
            ("F-16",          WordShape::AlphanumericDash),
            ("U.S.-based",    WordShape::AlphanumericSymbols),
            ("a+b",           WordShape::NoDigits),
            ("1+2",           WordShape::NoLetters),
            ("a+1",           WordShape::Other),
        ];
        for (word, shape) in expected {
            assert_eq!(shape, WordShape::classify(word, 1), "word: {:?}", word);
        }
    }

    #[test]
    fn test_overlapping_patterns_resolve_by_order() {
        // All-letter words never reach the dash or ampersand rules.
        assert_eq!(WordShape::Lowercase, WordShape::classify("cat", 3));
        assert_eq!(WordShape::AllCaps, WordShape::classify("NATO", 3));
        // A dash keeps letters out of the pure-letter rules.
        assert_eq!(WordShape::LettersDash, WordShape::classify("one-way", 3));
    }

    #[test]
    fn test_classification_is_stable_across_calls() {
        for word in ["The", "1,234.56", "x'y", "</S>"] {
            assert_eq!(
                WordShape::classify(word, 2),
                WordShape::classify(word, 5),
            );
        }
    }

    #[test]
    fn test_boundary_marker_lands_in_no_digits() {
        assert_eq!(WordShape::NoDigits, WordShape::classify("</S>", 4));
    }
}
