// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use clap::Parser;
use color_eyre::Result;
use qm_min_cli::QmMinApp;

fn main() -> Result<()> {
    color_eyre::install()?;
    let app = QmMinApp::parse();
    app.exec()
}
