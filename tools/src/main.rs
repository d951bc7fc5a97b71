//! trade-runner: terminal driver for the trading game.
//!
//! Usage:
//!   trade-runner --seed 12345 --rounds 5
//!   trade-runner --seed 12345 --ipc-mode
//!   trade-runner --realtime

use anyhow::Result;
use std::env;
use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::Instant;
use tradesim_core::{
    command::PlayerCommand,
    engine::GameEngine,
    event::GameEvent,
    snapshot::{format_price, GameSnapshot},
};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcRequest {
    GetState,
    Tick {
        count: u32,
    },
    Command {
        cmd: PlayerCommand,
    },
    Quit,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", wall_clock_seed());
    let rounds = parse_arg(&args, "--rounds", 1u32);
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let realtime = args.iter().any(|a| a == "--realtime");

    let mut engine = GameEngine::build(seed)?;
    log::info!("engine ready (seed {seed})");

    if ipc_mode {
        run_ipc_loop(&mut engine)?;
    } else if realtime {
        run_realtime(&mut engine)?;
    } else {
        println!("trade-runner");
        println!("  seed:    {seed}");
        println!("  rounds:  {rounds}");
        println!();
        run_headless(&mut engine, rounds)?;
    }

    Ok(())
}

/// Play `rounds` back-to-back, firing the countdown without waiting.
fn run_headless(engine: &mut GameEngine, rounds: u32) -> Result<()> {
    let countdown = engine.config().countdown_seconds;
    for round in 1..=rounds {
        if round > 1 {
            engine.reset()?;
        }
        let opening = engine.snapshot();
        engine.buy()?;
        engine.run_countdown(countdown)?;
        print_round(round, &opening, &engine.snapshot());
    }
    Ok(())
}

fn print_round(round: u32, opening: &GameSnapshot, closing: &GameSnapshot) {
    let outcome = match &closing.result {
        Some(r) if r.is_profit => format!("WIN  {}", r.signed_delta),
        Some(r) => format!("LOSS {}", r.signed_delta),
        None => "unresolved".to_string(),
    };
    println!(
        "  round {round:>3} | {:<5} | bought {} | now {} | {outcome}",
        opening.instrument_symbol,
        format_price(opening.current_price),
        closing.display_price(),
    );
}

fn run_ipc_loop(engine: &mut GameEngine) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let request: IpcRequest = match serde_json::from_str(&buffer) {
            Ok(r) => r,
            Err(e) => {
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(stdout, "{}", err_json)?;
                stdout.flush()?;
                continue;
            }
        };

        match request {
            IpcRequest::Quit => break,
            IpcRequest::GetState => {}
            IpcRequest::Tick { count } => {
                engine.run_countdown(count)?;
            }
            IpcRequest::Command { cmd } => {
                engine.submit(cmd)?;
            }
        }
        writeln!(stdout, "{}", engine.snapshot().to_json()?)?;
        stdout.flush()?;
    }
    Ok(())
}

/// Interactive play on a real one-second cadence.
///
/// A reader thread forwards stdin lines; the engine itself is only ever
/// touched from this loop, which sleeps on the channel until either a
/// line arrives or the armed timer is due.
fn run_realtime(engine: &mut GameEngine) -> Result<()> {
    let (tx, rx) = mpsc::channel::<String>();
    std::thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });

    println!("commands: buy | reset | quit");
    print_state(&engine.snapshot());

    let period = engine.timer().period();
    let mut next_due: Option<Instant> = None;

    loop {
        let wait = match (engine.pending_timer(), next_due) {
            (Some(_), Some(due)) => due.saturating_duration_since(Instant::now()),
            (Some(_), None) => {
                next_due = Some(Instant::now() + period);
                period
            }
            (None, _) => {
                next_due = None;
                period
            }
        };

        match rx.recv_timeout(wait) {
            Ok(line) => {
                let command = match line.trim() {
                    "buy" => PlayerCommand::Buy,
                    "reset" => PlayerCommand::Reset,
                    "quit" | "exit" => break,
                    "" => continue,
                    other => {
                        log::warn!("Unknown command: {other}");
                        continue;
                    }
                };
                let events = engine.submit(command)?;
                if events.iter().any(|e| !matches!(e, GameEvent::BuyIgnored { .. })) {
                    next_due = None;
                    print_state(&engine.snapshot());
                }
            }
            Err(RecvTimeoutError::Timeout) => {
                if let Some(handle) = engine.pending_timer() {
                    engine.fire(handle)?;
                    next_due = Some(Instant::now() + period);
                    print_state(&engine.snapshot());
                }
            }
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
    Ok(())
}

fn print_state(snapshot: &GameSnapshot) {
    let mut line = format!(
        "[{:?}] {} {}",
        snapshot.phase,
        snapshot.instrument_symbol,
        snapshot.display_price()
    );
    if snapshot.timer_armed {
        line.push_str(&format!("  ({}s)", snapshot.countdown_remaining));
    }
    if let Some(result) = &snapshot.result {
        let verdict = if result.is_profit { "profit" } else { "loss" };
        line.push_str(&format!("  {verdict}: {}", result.signed_delta));
    }
    println!("{line}");
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

fn wall_clock_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
