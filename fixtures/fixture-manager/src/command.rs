// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use clap::Parser;
use color_eyre::Result;
use fixture_details::AllFixtures;
use log::LevelFilter;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

#[derive(Debug, Parser)]
pub struct FixtureManagerApp {
    #[clap(subcommand)]
    command: FixtureManagerCommand,
}

#[derive(Debug, Parser)]
pub enum FixtureManagerCommand {
    /// Generate random PLA fixtures
    GenerateInputs {
        #[clap(long, short, default_value_t = 64)]
        count: usize,
    },
    /// Minimize every fixture and store the expected output
    GenerateOutputs,
    /// Check every fixture against its stored output
    Verify,
}

impl FixtureManagerApp {
    pub fn exec(self) -> Result<()> {
        TermLogger::init(
            LevelFilter::Info,
            Config::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        )?;
        self.command.exec()
    }
}

impl FixtureManagerCommand {
    pub fn exec(self) -> Result<()> {
        let fixtures = AllFixtures::get();
        match self {
            Self::GenerateInputs { count } => fixtures.generate_inputs(count),
            Self::GenerateOutputs => fixtures.generate_outputs(),
            Self::Verify => fixtures.verify(),
        }
    }
}
