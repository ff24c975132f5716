// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{Minterm, MAX_VARIABLES};
use std::{error, fmt, io, path::PathBuf};

/// An error returned when a Boolean function can't be minimized.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MinimizeError {
    /// The function has zero variables.
    NoVariables,

    /// The function has no minterms: there's nothing to minimize.
    NoMinterms,

    /// The function has more variables than a [`Minterm`] can hold.
    TooManyVariables {
        /// The requested number of variables.
        variable_count: usize,
    },

    /// A minterm doesn't fit in the declared number of variables.
    MintermOutOfRange {
        /// The offending minterm.
        minterm: Minterm,
        /// The declared number of variables.
        variable_count: usize,
    },
}

impl MinimizeError {
    /// Returns true if this error means the input was absent rather than invalid.
    pub fn is_input_absent(&self) -> bool {
        matches!(self, Self::NoVariables | Self::NoMinterms)
    }
}

impl fmt::Display for MinimizeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::NoVariables => write!(f, "nothing to minimize: function has no variables"),
            Self::NoMinterms => write!(f, "nothing to minimize: function has no minterms"),
            Self::TooManyVariables { variable_count } => write!(
                f,
                "function has {} variables, at most {} are supported",
                variable_count, MAX_VARIABLES
            ),
            Self::MintermOutOfRange {
                minterm,
                variable_count,
            } => write!(
                f,
                "minterm {} is out of range for {} variables",
                minterm, variable_count
            ),
        }
    }
}

impl error::Error for MinimizeError {}

/// An error returned while reading a PLA description.
#[derive(Debug)]
#[non_exhaustive]
pub enum PlaError {
    /// The source couldn't be read.
    Io {
        /// The path being read, if any.
        path: Option<PathBuf>,
        /// The underlying error.
        err: io::Error,
    },

    /// The value of an `.i` directive isn't a number.
    InvalidInputCount {
        /// 1-based line number.
        line: usize,
        /// The value that failed to parse.
        value: String,
    },
}

impl fmt::Display for PlaError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Io {
                path: Some(path), ..
            } => write!(f, "error reading PLA file `{}`", path.display()),
            Self::Io { path: None, .. } => write!(f, "error reading PLA input"),
            Self::InvalidInputCount { line, value } => {
                write!(f, "line {}: invalid .i value `{}`", line, value)
            }
        }
    }
}

impl error::Error for PlaError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Io { err, .. } => Some(err),
            Self::InvalidInputCount { .. } => None,
        }
    }
}
