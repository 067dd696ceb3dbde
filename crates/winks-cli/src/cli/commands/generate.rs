//! `winks pin-hash`, `winks completions`, `winks man` – output generators.

use anyhow::Result;
use clap::CommandFactory;
use clap_complete::Shell;
use std::io;
use winks_core::pin::hash_pin;

use crate::cli::Cli;

pub fn run_pin_hash(pin: &str) {
    println!("{}", hash_pin(pin));
}

pub fn run_completions(shell: Shell) {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "winks", &mut io::stdout());
}

pub fn run_man() -> Result<()> {
    clap_mangen::Man::new(Cli::command()).render(&mut io::stdout())?;
    Ok(())
}
