//! Penn Treebank reading: bracketed parse trees and tagged sentence
//! extraction.

use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{Result, TaggerError};
use crate::sentence::TaggedSentence;

const EMPTY_NODE_LABEL: &str = "-NONE-";

/// A node in a bracketed parse tree.
///
/// Leaves carry words, their parents carry part-of-speech tags, and interior
/// nodes carry phrase labels. The treebank wraps every sentence in a root
/// node with an empty label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tree {
    label: String,
    children: Vec<Tree>,
}

impl Tree {
    fn new(label: String, children: Vec<Tree>) -> Self {
        Self { label, children }
    }

    /// The label of this node.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The direct children of this node.
    pub fn children(&self) -> &[Tree] {
        &self.children
    }

    /// Returns `true` if this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns `true` if this node's only child is a leaf.
    pub fn is_preterminal(&self) -> bool {
        self.children.len() == 1 && self.children[0].is_leaf()
    }

    /// The words of the sentence this tree spans, left to right.
    pub fn word_yield(&self) -> Vec<String> {
        let mut words = Vec::new();
        self.collect_word_yield(&mut words);
        words
    }

    fn collect_word_yield(&self, words: &mut Vec<String>) {
        if self.is_leaf() {
            words.push(self.label.clone());
            return;
        }
        for child in &self.children {
            child.collect_word_yield(words);
        }
    }

    /// The part-of-speech tags of the sentence this tree spans, left to
    /// right.
    pub fn preterminal_yield(&self) -> Vec<String> {
        let mut tags = Vec::new();
        self.collect_preterminal_yield(&mut tags);
        tags
    }

    fn collect_preterminal_yield(&self, tags: &mut Vec<String>) {
        if self.is_preterminal() {
            tags.push(self.label.clone());
            return;
        }
        for child in &self.children {
            child.collect_preterminal_yield(tags);
        }
    }

    /// Removes `-NONE-` trace subtrees, pruning any interior node left
    /// without children. Returns `None` when the whole tree vanishes.
    pub fn strip_empty_nodes(self) -> Option<Self> {
        if self.label == EMPTY_NODE_LABEL {
            return None;
        }
        if self.is_leaf() {
            return Some(self);
        }
        let label = self.label;
        let children: Vec<Tree> = self
            .children
            .into_iter()
            .filter_map(Tree::strip_empty_nodes)
            .collect();
        if children.is_empty() {
            return None;
        }
        Some(Self { label, children })
    }
}

/// Parses every bracketed tree in a text.
///
/// # Errors
///
/// [`TaggerError::Corpus`] when the text is not a sequence of balanced
/// bracketed trees.
pub fn parse_trees(text: &str) -> Result<Vec<Tree>> {
    TreeParser::new(text).parse_all()
}

/// A cursor over bracketed tree text. Only ASCII bytes are structural, so
/// byte-wise scanning never splits a multi-byte character.
struct TreeParser<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> TreeParser<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    fn parse_all(&mut self) -> Result<Vec<Tree>> {
        let mut trees = Vec::new();
        loop {
            self.skip_whitespace();
            if self.peek().is_none() {
                return Ok(trees);
            }
            trees.push(self.parse_tree()?);
        }
    }

    fn parse_tree(&mut self) -> Result<Tree> {
        self.expect(b'(')?;
        self.skip_whitespace();
        let label = self.parse_token().to_string();
        let mut children = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some(b'(') => children.push(self.parse_tree()?),
                Some(b')') => {
                    self.pos += 1;
                    return Ok(Tree::new(label, children));
                }
                Some(_) => {
                    let word = self.parse_token().to_string();
                    children.push(Tree::new(word, Vec::new()));
                }
                None => {
                    return Err(TaggerError::corpus(
                        "unbalanced parentheses in bracketed tree text",
                    ));
                }
            }
        }
    }

    fn parse_token(&mut self) -> &'a str {
        let from = self.pos;
        while let Some(b) = self.peek() {
            if b == b'(' || b == b')' || b.is_ascii_whitespace() {
                break;
            }
            self.pos += 1;
        }
        &self.text[from..self.pos]
    }

    fn expect(&mut self, expected: u8) -> Result<()> {
        if self.peek() == Some(expected) {
            self.pos += 1;
            Ok(())
        } else {
            Err(TaggerError::corpus(format!(
                "expected '{}' at byte {} of bracketed tree text",
                expected as char, self.pos
            )))
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(b) = self.peek() {
            if !b.is_ascii_whitespace() {
                break;
            }
            self.pos += 1;
        }
    }

    fn peek(&self) -> Option<u8> {
        self.text.as_bytes().get(self.pos).copied()
    }
}

/// Reads the tagged sentences of every treebank file numbered within
/// `[low, high]` under `path`.
///
/// Directories are searched recursively, and a file belongs to the range if
/// its name ends in a number within it, as in `wsj_0200.mrg`. Files are read
/// in increasing numeric order. Trace subtrees are stripped from every tree
/// before its word and tag yields are paired into a [`TaggedSentence`].
///
/// # Errors
///
/// [`TaggerError::IOError`] when a directory or file cannot be read, and
/// [`TaggerError::Corpus`] when a file does not contain well-formed trees.
pub fn read_tagged_sentences<P: AsRef<Path>>(
    path: P,
    low: u32,
    high: u32,
) -> Result<Vec<TaggedSentence>> {
    let mut files = Vec::new();
    collect_numbered_files(path.as_ref(), low, high, &mut files)?;
    // Lexicographic path order would put e.g. `sec10.mrg` before `sec9.mrg`.
    files.sort_by_cached_key(|path| (file_number(path), path.clone()));

    let mut sentences = Vec::new();
    for file in &files {
        let text = fs::read_to_string(file)?;
        let trees = parse_trees(&text).map_err(|e| match e {
            TaggerError::Corpus(e) => {
                TaggerError::corpus(format!("{}: {}", file.display(), e.msg))
            }
            e => e,
        })?;
        for tree in trees {
            if let Some(tree) = tree.strip_empty_nodes() {
                let sentence = TaggedSentence::new(tree.word_yield(), tree.preterminal_yield())
                    .map_err(|e| TaggerError::corpus(format!("{}: {}", file.display(), e)))?;
                sentences.push(sentence);
            }
        }
    }
    log::info!(
        "read {} tagged sentences from {} treebank files",
        sentences.len(),
        files.len()
    );
    Ok(sentences)
}

fn collect_numbered_files(
    dir: &Path,
    low: u32,
    high: u32,
    files: &mut Vec<PathBuf>,
) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_numbered_files(&path, low, high, files)?;
        } else if let Some(number) = file_number(&path) {
            if (low..=high).contains(&number) {
                files.push(path);
            }
        }
    }
    Ok(())
}

/// The number a file name ends in, e.g. 200 for `wsj_0200.mrg`.
fn file_number(path: &Path) -> Option<u32> {
    let stem = path.file_stem()?.to_str()?;
    let start = stem
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(i, _)| i)?;
    stem[start..].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_tree_and_yields() {
        let trees = parse_trees("( (S (NP (DT The) (NN dog)) (VP (VBZ runs))) )").unwrap();

        assert_eq!(1, trees.len());
        assert_eq!("", trees[0].label());
        assert_eq!(owned(&["The", "dog", "runs"]), trees[0].word_yield());
        assert_eq!(owned(&["DT", "NN", "VBZ"]), trees[0].preterminal_yield());
    }

    #[test]
    fn test_parse_multiple_trees() {
        let trees = parse_trees("(A (B b))\n(C (D d)) ").unwrap();

        assert_eq!(2, trees.len());
        assert_eq!("A", trees[0].label());
        assert_eq!("C", trees[1].label());
    }

    #[test]
    fn test_unbalanced_text_is_a_corpus_error() {
        let result = parse_trees("(A (B b)");

        match result {
            Err(TaggerError::Corpus(e)) => {
                assert_eq!(
                    "CorpusError: unbalanced parentheses in bracketed tree text",
                    e.to_string()
                );
            }
            r => panic!("unexpected result: {:?}", r),
        }
    }

    #[test]
    fn test_stray_token_is_a_corpus_error() {
        assert!(matches!(
            parse_trees("dangling (A (B b))"),
            Err(TaggerError::Corpus(_))
        ));
    }

    #[test]
    fn test_strip_empty_nodes_prunes_traces_and_empty_parents() {
        let trees = parse_trees("( (S (NP-SBJ (-NONE- *T*-1)) (VP (VBZ runs))) )").unwrap();

        let tree = trees.into_iter().next().unwrap().strip_empty_nodes().unwrap();

        assert_eq!(owned(&["runs"]), tree.word_yield());
        assert_eq!(owned(&["VBZ"]), tree.preterminal_yield());
    }

    #[test]
    fn test_strip_empty_nodes_can_remove_the_whole_tree() {
        let trees = parse_trees("(NP-SBJ (-NONE- *))").unwrap();

        assert_eq!(None, trees.into_iter().next().unwrap().strip_empty_nodes());
    }

    #[test]
    fn test_file_number() {
        assert_eq!(Some(200), file_number(Path::new("wsj/02/wsj_0200.mrg")));
        assert_eq!(Some(22), file_number(Path::new("sec22.mrg")));
        assert_eq!(None, file_number(Path::new("wsj/README")));
    }

    #[test]
    fn test_read_tagged_sentences_walks_numbered_files() {
        let dir = std::env::temp_dir().join(format!("treebank-test-{}", std::process::id()));
        let section = dir.join("02");
        fs::create_dir_all(&section).unwrap();
        fs::write(
            section.join("wsj_0200.mrg"),
            "( (S (DT The) (NN dog)) )\n( (S (VBZ Runs)) )\n",
        )
        .unwrap();
        fs::write(section.join("wsj_0300.mrg"), "( (S (NN out)) )\n").unwrap();
        fs::write(dir.join("README"), "not a treebank file\n").unwrap();

        let sentences = read_tagged_sentences(&dir, 200, 299).unwrap();
        fs::remove_dir_all(&dir).unwrap();

        assert_eq!(2, sentences.len());
        assert_eq!(owned(&["The", "dog"]), sentences[0].words().to_vec());
        assert_eq!(owned(&["DT", "NN"]), sentences[0].tags().to_vec());
        assert_eq!(owned(&["Runs"]), sentences[1].words().to_vec());
    }

    #[test]
    fn test_read_tagged_sentences_orders_files_by_number() {
        let dir = std::env::temp_dir().join(format!("treebank-order-test-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("sec9.mrg"), "( (S (CD nine)) )\n").unwrap();
        fs::write(dir.join("sec10.mrg"), "( (S (CD ten)) )\n").unwrap();

        let sentences = read_tagged_sentences(&dir, 9, 10).unwrap();
        fs::remove_dir_all(&dir).unwrap();

        assert_eq!(2, sentences.len());
        assert_eq!(owned(&["nine"]), sentences[0].words().to_vec());
        assert_eq!(owned(&["ten"]), sentences[1].words().to_vec());
    }
}
