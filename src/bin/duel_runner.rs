//! Headless Duel Runner
//!
//! Plays seeded AI vs AI duels and prints aggregate results.

use clap::Parser;
use lowlife_duel::core::{load_config, CombatantId, DuelConfig, SessionKey};
use lowlife_duel::duel::{Combatant, DuelEnd, DuelState, DuelStatus};
use lowlife_duel::provider::{
    BaseAttributes, Collaborators, CombatKit, Roster, WeaponClass, WeaponProfile, WeaponSlot,
};
use rayon::prelude::*;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

const FIGHTER_A: CombatantId = CombatantId(1);
const FIGHTER_B: CombatantId = CombatantId(2);

/// Headless Duel Runner - AI vs AI duels for balance checks
#[derive(Parser, Debug)]
#[command(name = "duel_runner")]
#[command(about = "Run seeded AI vs AI duels and summarize the results")]
struct Args {
    /// Number of duels to play
    #[arg(long, default_value_t = 100)]
    count: u64,

    /// Base seed; duel i uses seed + i
    #[arg(long)]
    seed: Option<u64>,

    /// Duel config TOML (defaults built in)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Turn cap before a duel is timed out
    #[arg(long, default_value_t = 500)]
    max_turns: u32,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,

    /// Include one record per duel in the output
    #[arg(long)]
    per_duel: bool,

    /// Print the event log of every duel to stderr
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// Result of a single duel
#[derive(Debug, Serialize)]
struct DuelRecord {
    seed: u64,
    outcome: String,
    winner: Option<String>,
    summary: Option<String>,
    rounds: u32,
    turns: u32,
}

/// JSON output structure
#[derive(Debug, Default, Serialize)]
struct RunSummary {
    seed: u64,
    duels: u64,
    a_wins: u64,
    b_wins: u64,
    draws: u64,
    timeouts: u64,
    avg_rounds: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    records: Vec<DuelRecord>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lowlife_duel=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let base_seed = args.seed.unwrap_or_else(rand::random);

    let config = match &args.config {
        Some(path) => load_config(path).unwrap_or_else(|e| {
            eprintln!("Warning: Failed to load config '{}': {}", path.display(), e);
            eprintln!("Using default config");
            DuelConfig::default()
        }),
        None => DuelConfig::default(),
    }
    .with_env_overrides();

    let collaborators = Collaborators::from_roster(Arc::new(sample_roster()));

    let records: Vec<DuelRecord> = (0..args.count)
        .into_par_iter()
        .map(|i| {
            play_one(
                base_seed.wrapping_add(i),
                &config,
                &collaborators,
                args.max_turns,
                args.verbose,
            )
        })
        .collect();

    let mut summary = summarize(&records);
    summary.seed = base_seed;
    if args.per_duel {
        summary.records = records;
    }

    if args.format == "json" {
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Failed to serialize summary: {}", e),
        }
    } else {
        println!("=== Duel Results (seed {}) ===", base_seed);
        println!("Duels:      {}", summary.duels);
        println!("Rook wins:  {}", summary.a_wins);
        println!("Vex wins:   {}", summary.b_wins);
        println!("Draws:      {}", summary.draws);
        println!("Timeouts:   {}", summary.timeouts);
        println!("Avg rounds: {:.1}", summary.avg_rounds);
        for record in &summary.records {
            println!(
                "  seed {:>20}  {:<8} {:>3} rounds  {}",
                record.seed,
                record.outcome,
                record.rounds,
                record.summary.as_deref().unwrap_or("-")
            );
        }
    }
}

/// A pistol brawler against a rifleman
fn sample_roster() -> Roster {
    let brawler = CombatKit {
        primary: Some(WeaponProfile::from_class("Snub Revolver", WeaponClass::Pistol)),
        secondary: Some(WeaponProfile::from_class("Machete", WeaponClass::Melee)),
        preferred_slot: WeaponSlot::Primary,
        ..CombatKit::default()
    };
    let rifleman = CombatKit {
        primary: Some(WeaponProfile::from_class("Hunting Rifle", WeaponClass::Rifle)),
        ..CombatKit::default()
    };
    Roster::new()
        .with_fighter(
            FIGHTER_A,
            BaseAttributes {
                fitness: 14.0,
                armor: 5.0,
                ..BaseAttributes::default()
            },
            brawler,
        )
        .with_fighter(
            FIGHTER_B,
            BaseAttributes {
                combat: 13.0,
                ..BaseAttributes::default()
            },
            rifleman,
        )
}

fn play_one(
    seed: u64,
    config: &DuelConfig,
    collaborators: &Collaborators,
    max_turns: u32,
    verbose: bool,
) -> DuelRecord {
    let session = SessionKey::new(0, seed);
    let a = Combatant::ai(FIGHTER_A, "Rook");
    let b = Combatant::ai(FIGHTER_B, "Vex");

    let mut state = match DuelState::new(session, a, b, config.clone(), collaborators.clone(), seed) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("Failed to start duel {}: {}", seed, e);
            return DuelRecord {
                seed,
                outcome: "error".into(),
                winner: None,
                summary: None,
                rounds: 0,
                turns: 0,
            };
        }
    };

    let mut turns = 0;
    while state.is_active() && turns < max_turns {
        if let Err(e) = state.take_ai_turn() {
            tracing::warn!("Duel {} stopped: {}", state.id, e);
            break;
        }
        turns += 1;
    }
    state.time_out();

    if verbose {
        eprintln!("=== Duel {} (seed {}) ===", state.id, seed);
        for line in state.log.lines() {
            eprintln!("  {}", line);
        }
    }

    let (outcome, winner, summary) = match state.status() {
        DuelStatus::Ended(DuelEnd::Victory { winner, summary }) => {
            let name = state
                .side_of(winner)
                .map(|side| state.fighter(side).name.clone());
            ("victory".to_string(), name, Some(summary))
        }
        DuelStatus::Ended(DuelEnd::Draw) => ("draw".to_string(), None, None),
        _ => ("timeout".to_string(), None, None),
    };

    DuelRecord {
        seed,
        outcome,
        winner,
        summary,
        rounds: state.round,
        turns,
    }
}

fn summarize(records: &[DuelRecord]) -> RunSummary {
    let mut summary = RunSummary {
        duels: records.len() as u64,
        ..RunSummary::default()
    };
    let mut rounds = 0u64;
    for record in records {
        rounds += record.rounds as u64;
        match (record.outcome.as_str(), record.winner.as_deref()) {
            ("victory", Some("Rook")) => summary.a_wins += 1,
            ("victory", Some(_)) => summary.b_wins += 1,
            ("draw", _) => summary.draws += 1,
            _ => summary.timeouts += 1,
        }
    }
    if !records.is_empty() {
        summary.avg_rounds = rounds as f64 / records.len() as f64;
    }
    summary
}

