// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Minimization of single-output Boolean functions into a sum of products, using the
//! Quine-McCluskey method.
//!
//! The pipeline is:
//!
//! 1. [`BooleanFunction`](logic_function::BooleanFunction) validates a variable count and a set of
//!    minterms.
//! 2. [`PrimeImplicantGenerator`](primes::PrimeImplicantGenerator) merges terms until a fixed
//!    point is reached, producing [`PrimeImplicants`](primes::PrimeImplicants).
//! 3. [`PrimeImplicants::select_cover`](primes::PrimeImplicants::select_cover) picks essential
//!    implicants, then greedily covers whatever is left.

pub mod cover;
pub mod errors;
pub mod logic_function;
pub mod pla;
pub mod primes;
#[cfg(any(test, feature = "proptest1"))]
mod proptest_helpers;
pub mod term;

/// An integer encoding one input combination of a Boolean function.
///
/// Bit `variable_count - 1` corresponds to the first variable.
pub type Minterm = u32;

/// The largest number of variables supported.
pub const MAX_VARIABLES: usize = Minterm::BITS as usize;
