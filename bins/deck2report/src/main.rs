extern crate serde_json;
#[macro_use]
extern crate log;
extern crate decklens;

use clap::Parser;
use decklens::deck::{Deck, DeckCard};
use decklens::report::{DeckReport, ReportError};
use decklens::simulation::{SimulationConfig, DEFAULT_RUN_COUNT};
use std::fs::File;
use std::io::prelude::*;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "deck2report")]
#[command(about = "Simulates opening hands and detects synergies for a JSON deck list")]
struct Args {
    /// Path to a JSON array of {"card": {...}, "count": N} entries
    deck: PathBuf,

    /// Number of simulated hands
    #[arg(long, default_value_t = DEFAULT_RUN_COUNT)]
    runs: usize,

    /// Seed for a reproducible simulation
    #[arg(long)]
    seed: Option<u64>,

    /// Card to compute draw rates for (repeatable)
    #[arg(long = "key-card")]
    key_cards: Vec<String>,

    /// Pretty print the JSON report
    #[arg(long)]
    pretty: bool,
}

#[derive(Debug)]
enum Error {
    Json(serde_json::Error),
    Io(std::io::Error),
    Report(ReportError),
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error)
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Json(error)
    }
}

impl From<ReportError> for Error {
    fn from(error: ReportError) -> Self {
        Self::Report(error)
    }
}

fn main() -> Result<(), Error> {
    let _ = env_logger::try_init();
    let args = Args::parse();

    info!("Loading deck @ {}", args.deck.display());
    let mut contents = String::new();
    File::open(&args.deck)?.read_to_string(&mut contents)?;
    let entries: Vec<DeckCard> = serde_json::from_str(&contents)?;
    let deck = Deck::from_entries(entries);
    info!(
        "Deck has {} cards, {} distinct, {} lands",
        deck.len(),
        deck.cards.len(),
        deck.land_count()
    );

    let mut config = SimulationConfig::new(args.runs);
    config.seed = args.seed;
    let report = DeckReport::from_deck(&deck, &config, &args.key_cards)?;
    let json = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{}", json);
    Ok(())
}
