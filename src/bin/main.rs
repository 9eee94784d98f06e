//! gibberish: train, calibrate and query a gibberish classifier.
//!
//! Usage:
//!   gibberish --classifier <model> --train <file>... [--config <json>]
//!   gibberish --classifier <model> --good <file> --bad <file>
//!   gibberish --classifier <model> --check <text> [--json]
//!   gibberish --classifier <model> --repl
//!
//! `--train` may be combined with `--good`/`--bad` to calibrate the freshly
//! trained model before it is saved. Set RUST_LOG to change log verbosity.

use crossterm::style::Stylize;
use gibberish_core::persistence::{load_from_disk, save_to_disk};
use gibberish_core::{Analysis, Classifier, ClassifierConfig};
use std::error::Error;
use std::fs::{self, File};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

const USAGE: &str = "Usage: gibberish --classifier <model> \
[--train <file>...] [--config <json>] [--good <file> --bad <file>] \
[--check <text>] [--json] [--repl]";

#[derive(Default)]
struct Options {
    classifier: Option<PathBuf>,
    train: Vec<PathBuf>,
    config: Option<PathBuf>,
    good: Option<PathBuf>,
    bad: Option<PathBuf>,
    check: Option<String>,
    json: bool,
    repl: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = match parse_args(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{message}\n{USAGE}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(options) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn parse_args<I: Iterator<Item = String>>(mut args: I) -> Result<Options, String> {
    let mut options = Options::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--classifier" => options.classifier = Some(take_value(&mut args, &arg)?.into()),
            "--train" => options.train.push(take_value(&mut args, &arg)?.into()),
            "--config" => options.config = Some(take_value(&mut args, &arg)?.into()),
            "--good" => options.good = Some(take_value(&mut args, &arg)?.into()),
            "--bad" => options.bad = Some(take_value(&mut args, &arg)?.into()),
            "--check" => options.check = Some(take_value(&mut args, &arg)?),
            "--json" => options.json = true,
            "--repl" => options.repl = true,
            "--help" | "-h" => return Err("gibberish classifier".to_string()),
            // Extra paths after --train, e.g. from a shell glob.
            other if !other.starts_with("--") && !options.train.is_empty() => {
                options.train.push(other.into())
            }
            other => return Err(format!("unknown argument: {other}")),
        }
    }

    if options.classifier.is_none() {
        return Err("--classifier is required".to_string());
    }
    if options.good.is_some() != options.bad.is_some() {
        return Err("--good and --bad must be given together".to_string());
    }
    Ok(options)
}

fn take_value<I: Iterator<Item = String>>(args: &mut I, flag: &str) -> Result<String, String> {
    args.next().ok_or_else(|| format!("{flag} needs a value"))
}

fn run(options: Options) -> Result<(), Box<dyn Error>> {
    let model_path = options.classifier.clone().ok_or("--classifier is required")?;
    let mut dirty = false;

    let mut classifier = if options.train.is_empty() {
        load_from_disk(&model_path)?
    } else {
        dirty = true;
        train(&options)?
    };

    if let (Some(good), Some(bad)) = (&options.good, &options.bad) {
        let report = classifier.calibrate(File::open(good)?, File::open(bad)?)?;
        println!(
            "Threshold: {:.5} (max bad {:.5}, {} bad / {} good examples)",
            report.threshold, report.max_bad, report.bad_lines, report.good_lines
        );
        dirty = true;
    }

    if dirty {
        save_to_disk(&classifier, &model_path)?;
    }

    if let Some(text) = &options.check {
        let analysis = classifier.analyze(text);
        if options.json {
            println!("{}", serde_json::to_string(&analysis)?);
        } else {
            println!("Gibberish? {} ({:.5})", analysis.is_gibberish, analysis.probability);
        }
    }

    if options.repl {
        repl(&classifier)?;
    }

    Ok(())
}

fn train(options: &Options) -> Result<Classifier, Box<dyn Error>> {
    let config = match &options.config {
        Some(path) => serde_json::from_str::<ClassifierConfig>(&fs::read_to_string(path)?)?,
        None => ClassifierConfig::default(),
    };
    let mut classifier = Classifier::with_config(config)?;

    for path in &options.train {
        log::info!("training on {}", path.display());
        classifier.train(File::open(path)?)?;
    }
    classifier.finalize();
    Ok(classifier)
}

fn repl(classifier: &Classifier) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    write!(stdout, "> Write some text to check...\n\n")?;
    stdout.flush()?;

    for line in stdin.lock().lines() {
        let text = line?;
        if text == "quit" || text == "exit" {
            break;
        }
        writeln!(stdout, "\n => {}", verdict(&classifier.analyze(&text)))?;
        write!(stdout, "\n> Write some text to check...\n\n")?;
        stdout.flush()?;
    }
    Ok(())
}

fn verdict(analysis: &Analysis) -> String {
    let scores = format!("({:.5} / {:.5})", analysis.probability, analysis.threshold);
    if analysis.is_gibberish {
        format!("{} {}", "Gibberish".red().bold(), scores)
    } else {
        format!("{} {}", "Good".green().bold(), scores)
    }
}
