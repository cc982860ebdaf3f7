use std::io::{prelude::*, stdin};
use std::path::PathBuf;

use clap::Parser;
use trigram_tagger::{read_tagged_sentences, HmmTagScorer, Tagger, ViterbiDecoder};

const TRAIN_RANGE: (u32, u32) = (200, 2199);

#[derive(Parser, Debug)]
#[command(
    name = "tag",
    about = "A program to tag whitespace-separated sentences read from stdin."
)]
struct Opt {
    /// The base path of the treebank sections to train on
    #[arg(long)]
    path: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let opt = Opt::parse();

    eprintln!("Loading training sentences...");
    let train_sentences = read_tagged_sentences(&opt.path, TRAIN_RANGE.0, TRAIN_RANGE.1)?;
    let mut tagger = Tagger::new(Box::new(HmmTagScorer::default()), Box::new(ViterbiDecoder));
    eprintln!("Training on {} sentences...", train_sentences.len());
    tagger.train(&train_sentences)?;

    eprintln!("Enter one sentence per line.");
    for line in stdin().lock().lines() {
        let line = line?;
        let words: Vec<String> = line
            .split_whitespace()
            .map(|word| word.to_string())
            .collect();
        if words.is_empty() {
            continue;
        }
        match tagger.tag(&words) {
            Ok(tags) => {
                let tagged: Vec<String> = words
                    .iter()
                    .zip(&tags)
                    .map(|(word, tag)| format!("{}_{}", word, tag))
                    .collect();
                println!("{}", tagged.join(" "));
            }
            Err(e) => eprintln!("cannot tag line: {}", e),
        }
    }

    Ok(())
}
