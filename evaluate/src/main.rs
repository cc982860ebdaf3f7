use std::path::PathBuf;

use clap::Parser;
use trigram_tagger::{
    evaluate_tagger, extract_vocabulary, read_tagged_sentences, GreedyDecoder, HmmTagScorer,
    LocalTrigramScorer, MostFrequentTagScorer, StateId, Tagger, TrellisDecoder, ViterbiDecoder,
};

const TRAIN_RANGE: (u32, u32) = (200, 2199);
const VALIDATION_RANGE: (u32, u32) = (2200, 2299);
const TEST_RANGE: (u32, u32) = (2300, 2399);

#[derive(Parser, Debug)]
#[command(
    name = "evaluate",
    about = "A program to evaluate part-of-speech tagging accuracy on a treebank."
)]
struct Opt {
    /// The base path of the treebank sections
    #[arg(long)]
    path: PathBuf,

    /// Evaluate on the test split instead of the validation split
    #[arg(long)]
    test: bool,

    /// Print every tagging, with the mistakes aligned under their words
    #[arg(long)]
    verbose: bool,

    /// Use the most-frequent-tag baseline scorer instead of the HMM
    #[arg(long)]
    baseline: bool,

    /// Use the greedy decoder instead of Viterbi
    #[arg(long)]
    greedy: bool,

    /// HMM hyperparameters as "trigram;bigram;unigram;cutoff",
    /// e.g. "0.6;0.25;0.15;5"
    #[arg(long)]
    hmm_params: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let opt = Opt::parse();

    eprintln!("Loading training sentences...");
    let train_sentences = read_tagged_sentences(&opt.path, TRAIN_RANGE.0, TRAIN_RANGE.1)?;
    let vocabulary = extract_vocabulary(&train_sentences);
    eprintln!("Loading validation sentences...");
    let validation_sentences =
        read_tagged_sentences(&opt.path, VALIDATION_RANGE.0, VALIDATION_RANGE.1)?;
    let test_sentences = if opt.test {
        eprintln!("Loading test sentences...");
        read_tagged_sentences(&opt.path, TEST_RANGE.0, TEST_RANGE.1)?
    } else {
        Vec::new()
    };

    let scorer: Box<dyn LocalTrigramScorer> = if opt.baseline {
        Box::new(MostFrequentTagScorer::new(true))
    } else {
        Box::new(hmm_scorer(opt.hmm_params.as_deref()))
    };
    let decoder: Box<dyn TrellisDecoder<StateId>> = if opt.greedy {
        Box::new(GreedyDecoder)
    } else {
        Box::new(ViterbiDecoder)
    };

    let mut tagger = Tagger::new(scorer, decoder);
    eprintln!("Training on {} sentences...", train_sentences.len());
    tagger.train(&train_sentences)?;
    tagger.validate(&validation_sentences)?;

    let eval_sentences = if opt.test {
        &test_sentences
    } else {
        &validation_sentences
    };
    eprintln!("Evaluating on {} sentences...", eval_sentences.len());
    let evaluation = evaluate_tagger(
        &tagger,
        eval_sentences,
        &vocabulary,
        |sentence, guessed, suboptimal| {
            if opt.verbose {
                if suboptimal {
                    println!("WARNING: the gold tagging scores higher than the guessed tagging.");
                }
                println!(
                    "{}\n",
                    aligned_taggings(sentence.words(), sentence.tags(), guessed)
                );
            }
        },
    )?;

    println!("Tag accuracy: {}", evaluation.accuracy());
    println!("Unknown-word accuracy: {}", evaluation.unknown_accuracy());
    println!(
        "Decoder suboptimalities detected: {}",
        evaluation.suboptimalities()
    );

    Ok(())
}

/// Builds the HMM scorer from `--hmm-params`, falling back to the defaults
/// with a warning when the value does not hold three weights and a cutoff.
fn hmm_scorer(params: Option<&str>) -> HmmTagScorer {
    if let Some(params) = params {
        if let Some((trigram, bigram, unigram, cutoff)) = parse_hmm_params(params) {
            return HmmTagScorer::new(trigram, bigram, unigram, cutoff);
        }
        eprintln!("Malformed --hmm-params {:?}, using the default parameters.", params);
    }
    HmmTagScorer::default()
}

fn parse_hmm_params(params: &str) -> Option<(f64, f64, f64, u32)> {
    let mut parts = params.split(';');
    let trigram = parts.next()?.trim().parse().ok()?;
    let bigram = parts.next()?.trim().parse().ok()?;
    let unigram = parts.next()?.trim().parse().ok()?;
    let cutoff = parts.next()?.trim().parse().ok()?;
    Some((trigram, bigram, unigram, cutoff))
}

/// Lays gold and guessed tags out in columns under their words, leaving
/// correctly guessed tags blank.
fn aligned_taggings(words: &[String], gold_tags: &[String], guessed_tags: &[String]) -> String {
    let mut word_line = String::from("Words: ");
    let mut gold_line = String::from("Gold tags: ");
    let mut guessed_line = String::from("Guessed tags: ");
    for position in 0..words.len() {
        equalize_lengths(&mut word_line, &mut gold_line, &mut guessed_line);
        let gold = &gold_tags[position];
        let guessed = &guessed_tags[position];
        word_line.push_str(&words[position]);
        word_line.push(' ');
        if gold != guessed {
            gold_line.push_str(gold);
            guessed_line.push_str(guessed);
        }
        gold_line.push(' ');
        guessed_line.push(' ');
    }
    format!("{}\n{}\n{}", gold_line, guessed_line, word_line)
}

fn equalize_lengths(a: &mut String, b: &mut String, c: &mut String) {
    let target = a.len().max(b.len()).max(c.len());
    for line in [a, b, c] {
        while line.len() < target {
            line.push(' ');
        }
    }
}
