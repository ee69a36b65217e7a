//! tactus-replay - print the gestures recognized in a touch trace
//!
//! Usage: `tactus-replay <trace.json | ->`
//!
//! One JSON object per recognized gesture is written to stdout. Logs go to
//! stderr, filtered by `RUST_LOG` (default `info`).

use std::io::{self, Read, Write};

use anyhow::{bail, Context, Result};
use tactus_replay::{run_trace, Trace};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let Some(path) = std::env::args().nth(1) else {
        bail!("usage: tactus-replay <trace.json | ->");
    };

    let source = if path == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read trace from stdin")?;
        buf
    } else {
        std::fs::read_to_string(&path).with_context(|| format!("failed to read {path}"))?
    };

    let trace: Trace = serde_json::from_str(&source).context("invalid trace")?;
    let gestures = run_trace(&trace).context("replay failed")?;

    let mut out = io::stdout().lock();
    for gesture in &gestures {
        serde_json::to_writer(&mut out, gesture)?;
        writeln!(out)?;
    }
    Ok(())
}
