// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::Report;
use camino::Utf8PathBuf;
use clap::Parser;
use color_eyre::{eyre::WrapErr, Result};
use log::{info, LevelFilter};
use qm_min::pla::PlaDescription;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::{io, time::Instant};

/// Minimize a single-output Boolean function read from a PLA file.
#[derive(Debug, Parser)]
#[clap(name = "qm-min")]
pub struct QmMinApp {
    /// Path to the PLA file
    input: Utf8PathBuf,

    /// Only print the minimized function
    #[clap(long, short)]
    quiet: bool,

    /// Log more details to stderr (repeat for more)
    #[clap(long, short, parse(from_occurrences))]
    verbose: usize,
}

impl QmMinApp {
    pub fn exec(self) -> Result<()> {
        TermLogger::init(
            level_filter(self.verbose),
            Config::default(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        )?;

        let description = PlaDescription::from_path(&self.input)
            .wrap_err_with(|| format!("failed to read PLA file `{}`", self.input))?;
        let function = description
            .into_function()
            .wrap_err_with(|| format!("can't minimize the function in `{}`", self.input))?;
        info!(
            "minimizing {} minterms over {} variables",
            function.minterms().len(),
            function.variable_count()
        );

        let start = Instant::now();
        let primes = function.prime_implicants();
        let cover = primes.select_cover(function.minterms());
        let elapsed = start.elapsed();
        info!("{} prime implicants, {} selected", primes.len(), cover.len());

        let report = Report::new(&function, &cover, elapsed);
        let stdout = io::stdout();
        let mut out = stdout.lock();
        if self.quiet {
            report.write_summary(&mut out)?;
        } else {
            report.write_full(&mut out)?;
        }
        Ok(())
    }
}

fn level_filter(verbose: usize) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}
