mod simulate;

use std::{fs, path::PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};

use melody_chart::Chart;
use melody_engine::Difficulty;

#[derive(Debug, Parser)]
#[command(name = "melody")]
#[command(about = "Melody chart inspector and headless session runner", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate a chart file and print a summary.
    Inspect { input: PathBuf },
    /// Run a full session against a chart without a frontend.
    Simulate {
        input: PathBuf,
        #[arg(short, long, value_enum, default_value_t = DifficultyArg::Normal)]
        difficulty: DifficultyArg,
        /// Tap every note exactly on its target time.
        #[arg(long)]
        autoplay: bool,
        /// JSON file with taps: an array of {"lane": n, "time_ms": t}.
        #[arg(long, conflicts_with = "autoplay")]
        taps: Option<PathBuf>,
        /// Run as a boss battle with this much boss health.
        #[arg(long)]
        boss: Option<u32>,
        /// Print only the final result as JSON.
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DifficultyArg {
    Beginner,
    Easy,
    Normal,
    Hard,
    Expert,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Beginner => Difficulty::Beginner,
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Normal => Difficulty::Normal,
            DifficultyArg::Hard => Difficulty::Hard,
            DifficultyArg::Expert => Difficulty::Expert,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Inspect { input } => {
            let chart = load_chart(&input)?;
            inspect(&chart);
        }
        Command::Simulate {
            input,
            difficulty,
            autoplay,
            taps,
            boss,
            json,
        } => {
            let chart = load_chart(&input)?;
            let taps = match taps {
                Some(path) => Some(simulate::load_taps(&path)?),
                None => None,
            };
            let options = simulate::SimOptions {
                difficulty: difficulty.into(),
                autoplay,
                taps,
                boss_health: boss,
                json_only: json,
            };
            simulate::run_simulation(chart, options)?;
        }
    }

    Ok(())
}

fn load_chart(path: &PathBuf) -> anyhow::Result<Chart> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read: {}", path.display()))?;
    let chart: Chart = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse chart: {}", path.display()))?;
    chart
        .validate()
        .with_context(|| format!("invalid chart: {}", path.display()))?;
    Ok(chart)
}

fn inspect(chart: &Chart) {
    println!("{} ({})", chart.title, chart.id);
    println!("  bpm:      {}", chart.bpm);
    println!("  lanes:    {}", chart.lane_count);
    println!("  notes:    {}", chart.total_notes());
    println!("  duration: {:.1}s", chart.duration_secs());

    let mut per_lane = vec![0usize; chart.lane_count as usize];
    let mut words = 0usize;
    for note in &chart.notes {
        per_lane[note.lane as usize] += 1;
        if note.has_word() {
            words += 1;
        }
    }
    println!("  words:    {}", words);
    for (lane, count) in per_lane.iter().enumerate() {
        println!("  lane {}:   {} notes", lane, count);
    }
}
