use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use ski_path::{CLIArgs, LongestPathEngine};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .with_writer(io::stderr)
        .init();

    let args = CLIArgs::parse();
    let map = ski_path::read_map(&args.input_path).with_context(|| {
        format!(
            "Failed to read elevation map from given file({}).",
            args.input_path.display()
        )
    })?;

    let engine = LongestPathEngine::new(&map);
    let table = if args.progress {
        let mut stderr = io::stderr().lock();
        let table = engine.run_with(|report| {
            // Dots are cosmetic, a failed write to stderr shouldn't stop the search.
            write!(stderr, ".").ok();
            if report.level_no % 80 == 0 {
                writeln!(stderr).ok();
            }
            stderr.flush().ok();
        });
        writeln!(stderr).ok();
        table
    } else {
        engine.run()
    };

    let Some(path) = table.best_path(&map) else {
        eprintln!("There's no cell in the given map.");
        return Ok(());
    };

    for step in path.steps() {
        println!("{}", step);
    }
    println!(
        "The longest ski path visits {} cell(s) with total ascent {}.",
        path.node_n(),
        path.ascent()
    );
    println!("answer {},{}", path.node_n(), path.ascent());

    Ok(())
}
