// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    errors::MinimizeError,
    primes::{PrimeImplicantGenerator, PrimeImplicants},
    Minterm, MAX_VARIABLES,
};
use std::collections::BTreeSet;

/// A single-output Boolean function, given by its on-set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BooleanFunction {
    variable_count: usize,
    on_set: BTreeSet<Minterm>,
}

impl BooleanFunction {
    /// Creates a function that is true exactly on `minterms`.
    ///
    /// Duplicate minterms are ignored. Returns an error if there is nothing to minimize, or if a
    /// minterm doesn't fit in `variable_count` bits.
    pub fn new(
        variable_count: usize,
        minterms: impl IntoIterator<Item = Minterm>,
    ) -> Result<Self, MinimizeError> {
        if variable_count == 0 {
            return Err(MinimizeError::NoVariables);
        }
        check_variable_count(variable_count)?;

        let on_set: BTreeSet<_> = minterms.into_iter().collect();
        if on_set.is_empty() {
            return Err(MinimizeError::NoMinterms);
        }
        // The set is sorted, so only the largest minterm needs checking.
        if let Some(&minterm) = on_set.iter().next_back() {
            check_minterm(variable_count, minterm)?;
        }

        Ok(Self {
            variable_count,
            on_set,
        })
    }

    #[inline]
    pub fn variable_count(&self) -> usize {
        self.variable_count
    }

    /// The minterms this function is true on, in ascending order.
    #[inline]
    pub fn minterms(&self) -> &BTreeSet<Minterm> {
        &self.on_set
    }

    /// Evaluates the function for an assignment, where `values[0]` is the first variable.
    ///
    /// Panics if `values` doesn't have exactly `variable_count` elements.
    pub fn evaluate(&self, values: &[bool]) -> bool {
        assert_eq!(
            values.len(),
            self.variable_count,
            "expected {} values",
            self.variable_count
        );
        let minterm = values
            .iter()
            .fold(0, |acc: Minterm, &value| (acc << 1) | Minterm::from(value));
        self.on_set.contains(&minterm)
    }

    /// Returns a generator seeded with this function's minterms, for stepping through rounds.
    pub fn generator(&self) -> PrimeImplicantGenerator {
        PrimeImplicantGenerator::new_unchecked(self.variable_count, self.on_set.iter().copied())
    }

    /// Computes all prime implicants of this function.
    pub fn prime_implicants(&self) -> PrimeImplicants {
        self.generator().finish()
    }
}

pub(crate) fn check_variable_count(variable_count: usize) -> Result<(), MinimizeError> {
    if variable_count > MAX_VARIABLES {
        return Err(MinimizeError::TooManyVariables { variable_count });
    }
    Ok(())
}

/// Requires `variable_count <= MAX_VARIABLES`.
pub(crate) fn check_minterm(variable_count: usize, minterm: Minterm) -> Result<(), MinimizeError> {
    if u64::from(minterm) >> variable_count != 0 {
        return Err(MinimizeError::MintermOutOfRange {
            minterm,
            variable_count,
        });
    }
    Ok(())
}
