use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use hmmtag::{
    cross_validate, crossval::DEFAULT_SHUFFLE_SEED, train, Dataset, Evaluation, HmmModel, Viterbi,
    DEFAULT_UNSEEN_PENALTY,
};

#[derive(Debug, Parser)]
#[command(version)]
#[command(propagate_version = true)]
struct Argv {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Debug, Subcommand)]
enum Cmd {
    /// Train a model on a sentence file and its parallel tag file
    Train {
        /// one sentence per line, whitespace-delimited tokens
        #[arg(short, long)]
        sentences: PathBuf,
        /// parallel tag file, one tag line per sentence line
        #[arg(short, long)]
        tags: PathBuf,
        /// write the trained model to a file (MODEL)
        #[arg(short, long, value_name = "MODEL")]
        model: PathBuf,
        /// print the learned probability tables
        #[arg(long)]
        dump: bool,
    },
    /// Tag sentences from a file, or interactively from stdin
    Tag {
        /// read a model from a file (MODEL)
        #[arg(short, long, required = true, value_name = "MODEL")]
        model: PathBuf,
        /// log score substituted for emissions never seen in training
        #[arg(long, default_value_t = DEFAULT_UNSEEN_PENALTY)]
        unseen_penalty: f64,
        /// sentences to tag, one per line; stdin when omitted
        input: Option<PathBuf>,
    },
    /// Report the performance of a model on a labeled corpus
    Eval {
        /// read a model from a file (MODEL)
        #[arg(short, long, required = true, value_name = "MODEL")]
        model: PathBuf,
        #[arg(short, long)]
        sentences: PathBuf,
        #[arg(short, long)]
        tags: PathBuf,
        #[arg(long, default_value_t = DEFAULT_UNSEEN_PENALTY)]
        unseen_penalty: f64,
    },
    /// K-fold cross-validation over a labeled corpus
    Crossval {
        #[arg(short, long)]
        sentences: PathBuf,
        #[arg(short, long)]
        tags: PathBuf,
        #[arg(short = 'k', long, default_value_t = 5)]
        folds: usize,
        #[arg(long, default_value_t = DEFAULT_SHUFFLE_SEED)]
        seed: u64,
        #[arg(long, default_value_t = DEFAULT_UNSEEN_PENALTY)]
        unseen_penalty: f64,
    },
}

fn main() {
    env_logger::init();
    let argv = Argv::parse();
    log::info!("argv: {:?}", argv);

    match argv.cmd {
        Cmd::Train {
            sentences,
            tags,
            model,
            dump,
        } => {
            let ds = Dataset::from_files(&sentences, &tags).expect("failed to load corpus");
            log::info!(
                "training on {} sequences, {} tokens",
                ds.len(),
                ds.total_tokens()
            );
            let trained = train(&ds.seqs);
            if dump {
                print!("{}", trained);
            }
            trained.save(&model).expect("failed to write model");
            log::info!("write model to {}", model.display());
        }
        Cmd::Tag {
            model,
            unseen_penalty,
            input,
        } => {
            let model = HmmModel::from_path(&model).expect("failed to load model");
            let decoder = Viterbi::new(unseen_penalty);
            match input {
                Some(path) => {
                    let content = std::fs::read_to_string(&path).expect("failed to read input");
                    for line in content.lines().filter(|s| !s.trim().is_empty()) {
                        tag_line(line, &decoder, &model);
                    }
                }
                None => console_loop(&decoder, &model),
            }
        }
        Cmd::Eval {
            model,
            sentences,
            tags,
            unseen_penalty,
        } => {
            let model = HmmModel::from_path(&model).expect("failed to load model");
            let ds = Dataset::from_files(&sentences, &tags).expect("failed to load corpus");
            let decoder = Viterbi::new(unseen_penalty);
            let mut evaluation = Evaluation::default();
            for seq in &ds.seqs {
                let prediction = decoder.decode(&seq.tokens, &model);
                evaluation.accumulate(&seq.labels, &prediction);
            }
            evaluation.evaluate();
            println!("{}", evaluation);
        }
        Cmd::Crossval {
            sentences,
            tags,
            folds,
            seed,
            unseen_penalty,
        } => {
            let ds = Dataset::from_files(&sentences, &tags).expect("failed to load corpus");
            let report = cross_validate(&ds, folds, seed, &Viterbi::new(unseen_penalty))
                .expect("cross-validation failed");
            for score in &report.folds {
                println!("Fold {} accuracy: {:.4}", score.fold + 1, score.accuracy);
            }
            println!("Average cross-validation accuracy: {:.4}", report.mean_accuracy);
        }
    }
}

fn tag_line(line: &str, decoder: &Viterbi, model: &HmmModel) {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let tags = decoder.decode(&tokens, model);
    if tags.is_empty() {
        println!("(no viable path)");
    } else {
        println!("{}", tags.join(" "));
    }
}

/// Reads sentences from stdin until "stop" or an empty line.
fn console_loop(decoder: &Viterbi, model: &HmmModel) {
    println!("Type a sentence and press enter; 'stop' or an empty line finishes.");
    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush().expect("failed to flush stdout");
        let mut line = String::new();
        if stdin
            .lock()
            .read_line(&mut line)
            .expect("failed to read stdin")
            == 0
        {
            break;
        }
        let line = line.trim();
        if line.is_empty() || line.eq_ignore_ascii_case("stop") {
            break;
        }
        tag_line(line, decoder, model);
    }
}
