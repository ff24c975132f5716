// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

mod command;
mod report;

pub use command::*;
pub use report::*;
