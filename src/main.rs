use std::io::{self, Write};

use anyhow::{Context, Result};
use env_logger::Env;

use vt::app;
use vt::dispatch::Outcome;
use vt::runner::SystemSpawner;

fn init_logging() {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("warn"));
    builder.format_timestamp(None);
    let _ = builder.try_init();
}

fn main() -> Result<()> {
    init_logging();
    let home = dirs::home_dir();
    let mut stdout = io::stdout().lock();

    let outcome = app::run(
        std::env::args_os(),
        home.as_deref(),
        &mut SystemSpawner,
        &mut stdout,
    )
    .context("Failed to write to stdout")?;

    if let Outcome::Exited(code) = outcome {
        if code != 0 {
            stdout.flush()?;
            std::process::exit(code);
        }
    }
    Ok(())
}
