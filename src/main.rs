//! Era Words entry point
//!
//! Native runner for the puzzle core: loads catalogs and the save file, then
//! plays through the current era by tracing each word's answer path.

use std::path::PathBuf;

use clap::Parser;

use era_words::{GameConfig, GuessOutcome, HintLevel, Language, PuzzleCatalog, Session};

#[derive(Parser, Debug)]
#[command(version, about = "Play word-search rounds from the command line")]
struct Args {
    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory with <language>.json catalogs (bundled sample if omitted)
    #[arg(long)]
    catalog_dir: Option<PathBuf>,

    /// Save file
    #[arg(short, long)]
    save: Option<PathBuf>,

    /// Language code (en, es, fr, de, it, pt)
    #[arg(short, long)]
    language: Option<String>,

    /// Era to play
    #[arg(short, long)]
    era: Option<String>,

    /// Grid edge length
    #[arg(short, long)]
    grid_size: Option<usize>,

    /// RNG seed for reproducible grids
    #[arg(long)]
    seed: Option<u64>,

    /// Number of words to solve
    #[arg(short = 'n', long, default_value_t = 3)]
    words: usize,

    /// Buy a first-level hint before each word
    #[arg(long)]
    hints: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    log::info!("Era Words starting...");

    let mut config = args
        .config
        .as_deref()
        .map(GameConfig::load)
        .unwrap_or_default();
    if let Some(code) = &args.language {
        match Language::from_code(code) {
            Some(language) => config.language = language,
            None => log::warn!("Unknown language {}, using {}", code, config.language.code()),
        }
    }
    if let Some(era) = args.era {
        config.era = era;
    }
    if let Some(size) = args.grid_size.filter(|&s| s > 0) {
        config.grid_size = size;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.save.is_some() {
        config.save_path = args.save;
    }
    if args.catalog_dir.is_some() {
        config.catalog_dir = args.catalog_dir;
    }

    let catalog = match &config.catalog_dir {
        Some(dir) => PuzzleCatalog::load_dir(dir, &Language::ALL),
        None => era_words::sample_catalog(),
    };

    let mut session = Session::new(config, catalog);
    println!(
        "{} / {}: {} points",
        session.language().code(),
        session.era(),
        session.progress().points()
    );

    for _ in 0..args.words {
        let Some(word) = session.next_unsolved_word().map(str::to_string) else {
            println!("Era complete!");
            break;
        };
        let Some(placement) = session.puzzle(&word).cloned() else {
            continue;
        };

        println!("\n{}\n", placement.grid);
        if let Some(sentence) = session.sentences(&word).first() {
            println!("Example: {}", sentence);
        }
        if args.hints {
            if let Some(cells) = session.use_hint(&word, HintLevel::First) {
                println!("Hint: starts at {:?}", cells.first());
            }
        }

        match session.submit_guess(&word, &placement.path) {
            GuessOutcome::Solved { reward } => println!("{} solved (+{})", word, reward),
            other => println!("{}: {:?}", word, other),
        }
    }

    let total = session.current_words().len();
    println!(
        "\n{} points, {:.0}% of {} complete",
        session.progress().points(),
        session.progress().era_completion(session.era(), total) * 100.0,
        session.era()
    );
    session.suspend();
}
