use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use blastfield_core::{CellCount, Difficulty, GameConfig, GameEngine, Report, Snapshot};
use clap::Parser;
use serde::Serialize;

use command::{Command, HELP};
use config::FileConfig;

mod command;
mod config;
mod render;

#[derive(Parser, Debug)]
#[command(version, about = "Clear a field of mines with a limited number of moves", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Board preset: easy, medium, hard or difficult
    #[arg(short, long, value_parser = parse_difficulty)]
    difficulty: Option<Difficulty>,

    /// Override the preset's mine count
    #[arg(short, long)]
    mines: Option<CellCount>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// TOML file with game settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print one JSON object per command instead of the text board
    #[arg(long)]
    json: bool,
}

fn parse_difficulty(name: &str) -> Result<Difficulty, String> {
    Difficulty::from_name(name).ok_or_else(|| format!("unknown difficulty `{name}`"))
}

fn random_seed() -> u64 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    now.as_secs() ^ u64::from(now.subsec_nanos()).rotate_left(32)
}

#[derive(Serialize)]
struct Frame<'a> {
    report: Option<&'a Report>,
    snapshot: Snapshot,
}

struct Session {
    engine: GameEngine,
    json: bool,
}

impl Session {
    fn show(&self, out: &mut impl Write, report: Option<&Report>) -> Result<()> {
        let snapshot = self.engine.snapshot();
        if self.json {
            let frame = Frame { report, snapshot };
            writeln!(out, "{}", serde_json::to_string(&frame)?)?;
        } else {
            if let Some(report) = report {
                write!(out, "{}", render::report(report))?;
            }
            write!(out, "{}", render::board(&snapshot))?;
            writeln!(out, "{}", render::status(&snapshot))?;
        }
        Ok(())
    }

    fn message(&self, out: &mut impl Write, text: &str) -> Result<()> {
        if self.json {
            writeln!(out, "{}", serde_json::json!({ "message": text }))?;
        } else {
            writeln!(out, "{text}")?;
        }
        Ok(())
    }

    /// Applies one command. Returns `false` once the player quits.
    fn apply(&mut self, out: &mut impl Write, command: Command) -> Result<bool> {
        let outcome = match command {
            Command::Quit => return Ok(false),
            Command::Help => {
                self.message(out, HELP)?;
                return Ok(true);
            }
            Command::Start => {
                self.engine.start();
                Ok(None)
            }
            Command::Reset => {
                self.engine.reset();
                Ok(None)
            }
            Command::Difficulty(difficulty) => {
                self.engine.configure(difficulty.config()).map(|_| None)
            }
            Command::Mines(mines) => {
                let current = *self.engine.config();
                GameConfig::new(current.size, mines, current.flag_modifier, current.move_budget)
                    .and_then(|config| self.engine.configure(config))
                    .map(|_| None)
            }
            Command::PowerUp => Ok(Some(self.engine.activate_power_up())),
            Command::Reveal(coords) => self.engine.primary_click(coords).map(Some),
            Command::Flag(coords) => self.engine.secondary_click(coords).map(Some),
        };

        match outcome {
            Ok(report) => self.show(out, report.as_ref())?,
            Err(err) => {
                log::debug!("{command:?} rejected: {err}");
                self.message(out, &err.to_string())?;
            }
        }
        Ok(true)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let file = match &args.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };
    let config = file
        .resolve(args.difficulty, args.mines)
        .context("invalid game settings")?;
    let seed = args.seed.or(file.seed).unwrap_or_else(random_seed);
    log::info!("seed: {seed}");

    let mut session = Session {
        engine: GameEngine::new(config, seed)?,
        json: args.json,
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if !session.json {
        writeln!(out, "type `h` for help")?;
    }
    session.show(&mut out, None)?;

    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read input")?;
        match Command::parse(&line) {
            Ok(Some(command)) => {
                if !session.apply(&mut out, command)? {
                    break;
                }
            }
            Ok(None) => {}
            Err(err) => session.message(&mut out, &err.to_string())?,
        }
        out.flush()?;
    }
    Ok(())
}
