use std::io;
use std::process::{Command, Stdio};

use crate::invocation::{Invocation, IoMode};

/// Runs an `Invocation` to completion and reports its exit code.
pub trait Spawner {
    fn spawn(&mut self, invocation: &Invocation) -> io::Result<i32>;
}

/// Spawns real processes, blocking until they exit.
#[derive(Debug, Default)]
pub struct SystemSpawner;

impl Spawner for SystemSpawner {
    fn spawn(&mut self, invocation: &Invocation) -> io::Result<i32> {
        let stdin = match invocation.io {
            IoMode::Interactive => Stdio::inherit(),
            IoMode::OutputOnly => Stdio::null(),
        };
        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .stdin(stdin)
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()?;
        // Killed by a signal
        Ok(status.code().unwrap_or(1))
    }
}
