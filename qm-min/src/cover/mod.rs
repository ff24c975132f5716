// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

mod caches;
mod cover_impl;
mod display;

pub(crate) use caches::CoverageCache;
pub use caches::CoverageTable;
pub use cover_impl::*;
pub use display::*;
