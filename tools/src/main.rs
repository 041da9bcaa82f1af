//! sim-runner: headless RTP simulation runner.
//!
//! Usage:
//!   sim-runner --mode lines --data-dir ./data/lines --rounds 1000000 --bet 1
//!   sim-runner --mode ways --seed 7 --workers 8 --json
//!
//! Without --bet the runner prompts for a multiplier and offers to play
//! again after each run.

use anyhow::{Context, Result};
use reelsim_core::{
    config::{GameConfig, ModeKind},
    event::SimEvent,
    paytable::PayoutWarning,
    EngineSettings, SimEngine, SimStats,
};
use std::env;
use std::io::{self, BufRead, Write};
use std::ops::ControlFlow;
use std::path::Path;

const DEFAULT_ROUNDS: u64 = 10_000_000;

#[derive(serde::Serialize)]
struct RunSummary<'a> {
    mode:           &'a str,
    seed:           u64,
    bet_multiplier: u64,
    line_cost:      u64,
    stats:          &'a SimStats,
    rtp:            f64,
    hit_frequency:  f64,
    warnings:       Vec<WarningCount>,
}

#[derive(serde::Serialize)]
struct WarningCount {
    #[serde(flatten)]
    warning: PayoutWarning,
    seen:    u64,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let mode: ModeKind = flag_value(&args, "--mode")
        .unwrap_or("lines")
        .parse()?;
    let mode_dir = match mode {
        ModeKind::Lines => "./data/lines",
        ModeKind::Ways  => "./data/ways",
    };
    let data_dir = flag_value(&args, "--data-dir").unwrap_or(mode_dir);
    let seed = parse_arg(&args, "--seed", 42u64);
    let rounds = parse_arg(&args, "--rounds", DEFAULT_ROUNDS);
    let workers = parse_arg(&args, "--workers", 1usize);
    let json = args.iter().any(|a| a == "--json");

    let settings = EngineSettings {
        seed,
        line_cost: parse_arg(&args, "--line-cost", EngineSettings::default().line_cost),
        initial_balance: parse_arg(&args, "--initial-balance", 0i64),
        wild_symbol: flag_value(&args, "--wild")
            .map(str::to_string)
            .unwrap_or_else(|| EngineSettings::default().wild_symbol),
    };

    let game = load_game(Path::new(data_dir), mode)?;
    let mut engine = game
        .build_engine(mode, settings)
        .with_context(|| format!("Invalid game definition in {data_dir}"))?;

    if !json {
        println!("Slot RTP simulator — sim-runner");
        println!("  mode:      {}", engine.mode_name());
        println!("  seed:      {seed}");
        println!("  rounds:    {rounds}");
        println!("  workers:   {workers}");
        println!("  data_dir:  {data_dir}");
        println!();
    }

    if let Some(bet) = flag_value(&args, "--bet") {
        let bet: u64 = bet
            .parse()
            .with_context(|| format!("Invalid bet multiplier '{bet}'"))?;
        run_once(&mut engine, rounds, bet, workers, json)?;
        return Ok(());
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let bet = loop {
        let Some(answer) = prompt(&mut input, "Choose a bet multiplier:")? else {
            anyhow::bail!("No bet multiplier given");
        };
        match answer.parse::<u64>() {
            Ok(bet) if bet > 0 => break bet,
            _ => println!("Invalid multiplier. Please choose a valid option."),
        }
    };

    loop {
        run_once(&mut engine, rounds, bet, workers, json)?;
        let again = prompt(&mut input, "Play again? (y/n):")?;
        if !again.is_some_and(|a| a.eq_ignore_ascii_case("y")) {
            break;
        }
    }
    Ok(())
}

fn load_game(dir: &Path, mode: ModeKind) -> Result<GameConfig> {
    let reels = read_file(&dir.join("Reels.json"))?;
    let paytable = read_file(&dir.join("Paytable.json"))?;
    let paylines = match mode {
        ModeKind::Lines => Some(read_file(&dir.join("Paylines.json"))?),
        ModeKind::Ways  => None,
    };
    let config = GameConfig::from_json(&reels, &paytable, paylines.as_deref())
        .with_context(|| format!("Cannot parse game definition in {}", dir.display()))?;
    log::info!(
        "loaded {} reels and {} paytable entries from {}",
        config.reels.len(),
        config.paytable.len(),
        dir.display()
    );
    Ok(config)
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| anyhow::anyhow!("Cannot read {}: {e}", path.display()))
}

fn run_once(
    engine: &mut SimEngine,
    rounds: u64,
    bet: u64,
    workers: usize,
    json: bool,
) -> Result<()> {
    if workers > 1 {
        engine.run_parallel(rounds, bet, workers)?;
        if !json {
            println!("{rounds} rounds completed on {workers} workers!");
        }
    } else {
        engine.run_rounds_observed(rounds, bet, |event| {
            if !json {
                report_event(event);
            }
            ControlFlow::Continue(())
        })?;
    }

    if json {
        print_json_summary(engine, bet)
    } else {
        print_summary(engine);
        Ok(())
    }
}

fn report_event(event: &SimEvent) {
    match event {
        SimEvent::Progress { rounds_done, total_rounds } => {
            let percentage = *rounds_done as f64 / *total_rounds as f64 * 100.0;
            print!("\rProgress: {percentage:.2}% completed.");
            let _ = io::stdout().flush();
        }
        SimEvent::RunCompleted { rounds_done, stopped, .. } => {
            println!();
            if *stopped {
                println!("Stopped after {rounds_done} rounds.");
            } else {
                println!("{rounds_done} rounds completed!");
            }
        }
        SimEvent::RunStarted { .. } | SimEvent::PayoutWarningRaised { .. } => {
            log::debug!("event: {}", event.type_name());
        }
    }
}

fn sorted_warnings(engine: &SimEngine) -> Vec<WarningCount> {
    let mut warnings: Vec<WarningCount> = engine
        .warning_tally()
        .iter()
        .map(|(warning, &seen)| WarningCount { warning: warning.clone(), seen })
        .collect();
    warnings.sort_by(|a, b| {
        b.seen
            .cmp(&a.seen)
            .then_with(|| a.warning.to_string().cmp(&b.warning.to_string()))
    });
    warnings
}

fn print_summary(engine: &SimEngine) {
    let stats = engine.stats();
    println!("=== RUN SUMMARY ===");
    println!("  balance:        {}", stats.balance);
    println!("  total wagered:  {}", stats.total_wagered);
    println!("  total won:      {}", stats.total_won);
    println!("  rtp:            {:.2}%", stats.rtp());
    println!("  rounds played:  {}", stats.rounds_played);
    println!("  winning rounds: {}", stats.winning_rounds);
    println!("  hit frequency:  {:.2}%", stats.hit_frequency());

    let warnings = sorted_warnings(engine);
    if !warnings.is_empty() {
        println!();
        println!("=== PAYOUT WARNINGS ({} total) ===", engine.total_warnings());
        for w in warnings.iter().take(10) {
            println!("  {:>10}x  {}", w.seen, w.warning);
        }
        if warnings.len() > 10 {
            println!("  ... and {} more distinct warnings", warnings.len() - 10);
        }
    }
}

fn print_json_summary(engine: &SimEngine, bet: u64) -> Result<()> {
    let stats = engine.stats();
    let summary = RunSummary {
        mode:           engine.mode_name(),
        seed:           engine.seed(),
        bet_multiplier: bet,
        line_cost:      engine.line_cost(),
        stats,
        rtp:            stats.rtp(),
        hit_frequency:  stats.hit_frequency(),
        warnings:       sorted_warnings(engine),
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

/// None once stdin is closed.
fn prompt(input: &mut impl BufRead, message: &str) -> Result<Option<String>> {
    println!("{message}");
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
