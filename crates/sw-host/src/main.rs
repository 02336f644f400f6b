//! Skywrite host CLI.
//!
//! ```text
//! sw-host --defaults
//! sw-host --replay <file> [--config <file>] [--canvas WxH] [--seed N]
//! sw-host --live [--config <file>] [--canvas WxH]
//! ```
//!
//! `--live` reads detection records from stdin, one JSON object per line,
//! feeds them to the drawing actor, and prints the last published snapshot
//! at end of input.

use std::path::Path;
use sw_core::config::EngineConfig;
use sw_core::geometry::CanvasSize;
use sw_host::{load_recording, parse_line, replay, spawn};
use tokio::io::{AsyncBufReadExt, BufReader};

const DEFAULT_CANVAS: CanvasSize = CanvasSize {
    width: 1080.0,
    height: 1920.0,
};
const DEFAULT_SEED: u64 = 0x5EED;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let mode = args.first().map(|s| s.as_str());

    // ── `sw-host --defaults` ────────────────────────────────────────────
    if mode == Some("--defaults") {
        println!("{}", EngineConfig::default().to_json());
        return;
    }

    let config = match flag(&args, "--config") {
        Some(path) => load_config(Path::new(path)).unwrap_or_else(|e| fail(&e)),
        None => EngineConfig::default(),
    };
    let canvas = match flag(&args, "--canvas") {
        Some(spec) => parse_canvas(spec).unwrap_or_else(|e| fail(&e)),
        None => DEFAULT_CANVAS,
    };

    match mode {
        // ── `sw-host --replay <file>` ───────────────────────────────────
        Some("--replay") => {
            let Some(path) = args.get(1) else {
                fail("--replay needs a recording path");
            };
            let seed = match flag(&args, "--seed") {
                Some(s) => s
                    .parse()
                    .unwrap_or_else(|_| fail(&format!("invalid --seed '{s}'"))),
                None => DEFAULT_SEED,
            };
            let detections = load_recording(Path::new(path)).unwrap_or_else(|e| fail(&e));
            let report = replay(&detections, &config, canvas, seed);
            print_json(&report.snapshot);
        }
        // ── `sw-host --live` ────────────────────────────────────────────
        Some("--live") => {
            let (handle, task) = spawn(config, canvas);
            let snapshots = handle.snapshots();
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            let mut line_no = 0usize;
            loop {
                let line = match lines.next_line().await {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(e) => fail(&format!("failed to read stdin: {e}")),
                };
                line_no += 1;
                match parse_line(&line) {
                    Ok(Some(detection)) => handle.submit(detection),
                    Ok(None) => {}
                    Err(e) => log::warn!("line {line_no}: {e}"),
                }
                tokio::task::yield_now().await;
            }
            drop(handle);
            if let Err(e) = task.await {
                fail(&format!("drawing actor failed: {e}"));
            }
            let last = snapshots.borrow().clone();
            print_json(&*last);
        }
        _ => {
            eprintln!("usage: sw-host --defaults");
            eprintln!("       sw-host --replay <file> [--config <file>] [--canvas WxH] [--seed N]");
            eprintln!("       sw-host --live [--config <file>] [--canvas WxH]");
            std::process::exit(2);
        }
    }
}

fn flag<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == name)
        .and_then(|i| args.get(i + 1))
        .map(|s| s.as_str())
}

fn load_config(path: &Path) -> Result<EngineConfig, String> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    EngineConfig::from_json(&text).map_err(|e| format!("{}: {e}", path.display()))
}

/// Parse `WIDTHxHEIGHT`, e.g. `1080x1920`.
fn parse_canvas(spec: &str) -> Result<CanvasSize, String> {
    let (w, h) = spec
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("invalid --canvas '{spec}', expected WxH"))?;
    let width: f32 = w
        .trim()
        .parse()
        .map_err(|_| format!("invalid canvas width '{w}'"))?;
    let height: f32 = h
        .trim()
        .parse()
        .map_err(|_| format!("invalid canvas height '{h}'"))?;
    Ok(CanvasSize::new(width, height))
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => fail(&format!("failed to encode snapshot: {e}")),
    }
}

fn fail(msg: &str) -> ! {
    eprintln!("sw-host error: {msg}");
    std::process::exit(1);
}
