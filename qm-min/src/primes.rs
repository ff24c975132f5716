// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    cover::{CoverageCache, CoverageTable},
    errors::MinimizeError,
    logic_function::{check_minterm, check_variable_count},
    term::Term,
    Minterm,
};
use bitvec::prelude::*;
use log::{debug, trace};
use std::{collections::BTreeSet, fmt};

/// Whether a [`PrimeImplicantGenerator`] can make further progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GeneratorState {
    /// The last round merged at least one pair, so another round is needed.
    Active,
    /// The last round merged nothing. The prime implicants are final.
    Converged,
}

/// Computes prime implicants by repeatedly merging terms that differ in one bit.
///
/// Terms are kept in groups indexed by the number of `1`s in their pattern. Each round tries to
/// merge every term of group `k` with every term of group `k + 1`. Terms that didn't take part in
/// any merge during a round are prime. The merged terms form the groups of the next round, and
/// every term in round `r` has exactly `r` don't cares, so at most `variable_count + 1` rounds
/// are run.
#[derive(Clone, Debug)]
pub struct PrimeImplicantGenerator {
    variable_count: usize,
    round: usize,
    groups: Vec<Vec<Term>>,
    primes: BTreeSet<Term>,
    state: GeneratorState,
}

impl PrimeImplicantGenerator {
    /// Seeds the generator with one term per minterm. Duplicate minterms are ignored.
    ///
    /// Returns an error if `variable_count` is larger than [`MAX_VARIABLES`](crate::MAX_VARIABLES)
    /// or if a minterm doesn't fit in `variable_count` bits.
    pub fn new(
        variable_count: usize,
        minterms: impl IntoIterator<Item = Minterm>,
    ) -> Result<Self, MinimizeError> {
        check_variable_count(variable_count)?;
        let minterms = minterms
            .into_iter()
            .map(|minterm| check_minterm(variable_count, minterm).map(|()| minterm))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new_unchecked(variable_count, minterms))
    }

    /// Like [`Self::new`], for input that has already been validated.
    pub(crate) fn new_unchecked(
        variable_count: usize,
        minterms: impl IntoIterator<Item = Minterm>,
    ) -> Self {
        let mut groups = vec![BTreeSet::new(); variable_count + 1];
        for minterm in minterms {
            debug_assert!(
                u64::from(minterm)
                    .checked_shr(variable_count as u32)
                    .unwrap_or(0)
                    == 0,
                "minterm {} out of range for {} variables",
                minterm,
                variable_count
            );
            let term = Term::minterm(minterm, variable_count);
            groups[term.ones()].insert(term);
        }

        Self {
            variable_count,
            round: 0,
            groups: collect_groups(groups),
            primes: BTreeSet::new(),
            state: GeneratorState::Active,
        }
    }

    #[inline]
    pub fn variable_count(&self) -> usize {
        self.variable_count
    }

    /// The index of the current round. Terms in [`Self::groups`] have this many don't cares.
    #[inline]
    pub fn round(&self) -> usize {
        self.round
    }

    /// The terms of the current round, indexed by their number of `1`s.
    #[inline]
    pub fn groups(&self) -> &[Vec<Term>] {
        &self.groups
    }

    #[inline]
    pub fn state(&self) -> GeneratorState {
        self.state
    }

    /// Runs a single merge round.
    pub fn step(&mut self) -> GeneratorState {
        if self.state == GeneratorState::Converged {
            return self.state;
        }

        // Per-round flags, one bit per term in the matching group.
        let mut consumed: Vec<BitVec> = self
            .groups
            .iter()
            .map(|group| bitvec![0; group.len()])
            .collect();
        let mut next = vec![BTreeSet::new(); self.variable_count + 1];
        let mut merge_count = 0_usize;

        for ones in 0..self.groups.len().saturating_sub(1) {
            let (lower, upper) = (&self.groups[ones], &self.groups[ones + 1]);
            for (lower_ix, a) in lower.iter().enumerate() {
                for (upper_ix, b) in upper.iter().enumerate() {
                    if let Some(merged) = a.merge(b) {
                        trace!(
                            "round {}: {} + {} -> {}",
                            self.round,
                            a.matrix_display(),
                            b.matrix_display(),
                            merged.matrix_display()
                        );
                        consumed[ones].set(lower_ix, true);
                        consumed[ones + 1].set(upper_ix, true);
                        next[merged.ones()].insert(merged);
                        merge_count += 1;
                    }
                }
            }
        }

        let mut harvested = 0_usize;
        for (group, flags) in self.groups.iter().zip(&consumed) {
            for (ix, term) in group.iter().enumerate() {
                if !flags[ix] && self.primes.insert(term.clone()) {
                    harvested += 1;
                }
            }
        }

        debug!(
            "round {}: {} terms, {} merges, {} new prime implicants",
            self.round,
            self.groups.iter().map(Vec::len).sum::<usize>(),
            merge_count,
            harvested
        );

        if merge_count == 0 {
            self.state = GeneratorState::Converged;
        } else {
            self.groups = collect_groups(next);
            self.round += 1;
        }
        self.state
    }

    /// Runs rounds until no more merges are possible, returning the prime implicants.
    pub fn finish(mut self) -> PrimeImplicants {
        while self.step() == GeneratorState::Active {}
        PrimeImplicants::from_terms(self.variable_count, self.primes)
    }
}

fn collect_groups(groups: Vec<BTreeSet<Term>>) -> Vec<Vec<Term>> {
    groups
        .into_iter()
        .map(|group| group.into_iter().collect())
        .collect()
}

/// The prime implicants of a function, sorted by pattern and deduplicated.
#[derive(Clone, Default)]
pub struct PrimeImplicants {
    variable_count: usize,
    terms: Vec<Term>,
    cache: CoverageCache,
}

impl PrimeImplicants {
    /// Computes the prime implicants of the given minterms.
    ///
    /// Fails under the same conditions as [`PrimeImplicantGenerator::new`].
    pub fn generate(
        variable_count: usize,
        minterms: impl IntoIterator<Item = Minterm>,
    ) -> Result<Self, MinimizeError> {
        Ok(PrimeImplicantGenerator::new(variable_count, minterms)?.finish())
    }

    /// Builds a prime implicant list directly from terms, sorting and deduplicating them.
    pub fn from_terms(variable_count: usize, terms: impl IntoIterator<Item = Term>) -> Self {
        let terms: BTreeSet<_> = terms.into_iter().collect();
        debug_assert!(
            terms.iter().all(|t| t.variable_count() == variable_count),
            "all terms have {} variables",
            variable_count
        );
        Self {
            variable_count,
            terms: terms.into_iter().collect(),
            cache: CoverageCache::default(),
        }
    }

    #[inline]
    pub fn variable_count(&self) -> usize {
        self.variable_count
    }

    #[inline]
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Returns the mapping from each minterm to the indexes of the implicants covering it.
    #[inline]
    pub fn coverage_table(&self) -> &CoverageTable {
        self.cache.get_or_init_table(&self.terms)
    }
}

impl PartialEq for PrimeImplicants {
    fn eq(&self, other: &Self) -> bool {
        // The cache is derived from the terms, so skip it.
        self.variable_count == other.variable_count && self.terms == other.terms
    }
}

impl Eq for PrimeImplicants {}

impl fmt::Debug for PrimeImplicants {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(&self.terms).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic_function::BooleanFunction;
    use proptest::prelude::*;
    use test_log::test;

    fn patterns(primes: &PrimeImplicants) -> Vec<String> {
        primes
            .terms()
            .iter()
            .map(|t| t.matrix_display().to_string())
            .collect()
    }

    #[test]
    fn test_tautology() {
        let primes = PrimeImplicants::generate(3, 0..8).unwrap();
        assert_eq!(patterns(&primes), vec!["---"]);
        assert_eq!(primes.terms()[0].minterms().len(), 8);
    }

    #[test]
    fn test_two_variables() {
        let primes = PrimeImplicants::generate(2, [0, 1, 2]).unwrap();
        assert_eq!(patterns(&primes), vec!["-0", "0-"]);
        assert_eq!(
            primes.terms()[0].minterms().iter().copied().collect::<Vec<_>>(),
            vec![0, 2]
        );
        assert_eq!(
            primes.terms()[1].minterms().iter().copied().collect::<Vec<_>>(),
            vec![0, 1]
        );
    }

    #[test]
    fn test_duplicates_tolerated() {
        let primes = PrimeImplicants::generate(2, [2, 0, 1, 2, 0]).unwrap();
        assert_eq!(primes, PrimeImplicants::generate(2, [0, 1, 2]).unwrap());
    }

    #[test]
    fn test_classic_four_variables() {
        let primes = PrimeImplicants::generate(4, [4, 8, 10, 11, 12, 15]).unwrap();
        assert_eq!(
            patterns(&primes),
            vec!["-100", "1-00", "1-11", "10-0", "101-"]
        );
    }

    #[test]
    fn test_lone_minterm_is_prime() {
        let primes = PrimeImplicants::generate(3, [0, 7]).unwrap();
        assert_eq!(patterns(&primes), vec!["000", "111"]);
    }

    #[test]
    fn test_empty() {
        let mut generator = PrimeImplicantGenerator::new(3, []).unwrap();
        assert_eq!(generator.step(), GeneratorState::Converged);
        assert_eq!(generator.step(), GeneratorState::Converged, "converged is terminal");
        assert!(generator.finish().is_empty());
    }

    #[test]
    fn test_round_states() {
        let mut generator = PrimeImplicantGenerator::new(2, [0, 1, 2, 3]).unwrap();
        assert_eq!(generator.state(), GeneratorState::Active);
        assert_eq!(generator.step(), GeneratorState::Active);
        assert_eq!(generator.round(), 1);
        assert_eq!(generator.step(), GeneratorState::Active);
        assert_eq!(generator.round(), 2);
        assert_eq!(generator.step(), GeneratorState::Converged);
        assert_eq!(generator.round(), 2, "no new round after convergence");
        assert_eq!(
            generator.groups().iter().flatten().collect::<Vec<_>>(),
            vec![&Term::from_pattern("--").unwrap()]
        );
    }

    #[test]
    fn test_rejects_invalid_input() {
        assert_eq!(
            PrimeImplicants::generate(33, [0]),
            Err(MinimizeError::TooManyVariables { variable_count: 33 })
        );
        assert_eq!(
            PrimeImplicants::generate(2, [0, 7]),
            Err(MinimizeError::MintermOutOfRange {
                minterm: 7,
                variable_count: 2
            })
        );
        assert!(matches!(
            PrimeImplicantGenerator::new(64, [1]),
            Err(MinimizeError::TooManyVariables { variable_count: 64 })
        ));

        let primes = PrimeImplicants::generate(32, [u32::MAX]).expect("32 variables fit");
        assert_eq!(primes.len(), 1);
        assert!(primes.terms()[0].contains_minterm(u32::MAX));
    }

    #[test]
    fn test_coverage_table() {
        let primes = PrimeImplicants::generate(2, [0, 1, 2]).unwrap();
        let table = primes.coverage_table();
        assert_eq!(table.implicants_for(0), &[0, 1]);
        assert_eq!(table.implicants_for(1), &[1]);
        assert_eq!(table.implicants_for(2), &[0]);
        assert_eq!(table.implicants_for(3), &[] as &[usize]);
    }

    proptest! {
        #[test]
        fn proptest_generator_idempotent(function: BooleanFunction) {
            let minterms = function.minterms();
            let forward =
                PrimeImplicants::generate(function.variable_count(), minterms.iter().copied()).unwrap();
            let backward =
                PrimeImplicants::generate(function.variable_count(), minterms.iter().rev().copied())
                    .unwrap();
            prop_assert_eq!(forward, backward);
        }

        #[test]
        fn proptest_rounds_add_dont_cares(function: BooleanFunction) {
            let mut generator = function.generator();
            loop {
                for term in generator.groups().iter().flatten() {
                    prop_assert_eq!(term.dont_care_count(), generator.round());
                }
                if generator.step() == GeneratorState::Converged {
                    break;
                }
            }
            prop_assert!(generator.round() <= function.variable_count());
        }

        #[test]
        fn proptest_primes_are_sound_and_maximal(function: BooleanFunction) {
            let primes = function.prime_implicants();
            let minterms = function.minterms();

            let mut covered = BTreeSet::new();
            for term in primes.terms() {
                for &m in term.minterms() {
                    prop_assert!(term.contains_minterm(m));
                    prop_assert!(minterms.contains(&m), "{:?} only covers on-set minterms", term);
                }
                covered.extend(term.minterms().iter().copied());
                for other in primes.terms() {
                    prop_assert!(term.merge(other).is_none(), "{:?} is prime", term);
                }
            }
            prop_assert_eq!(&covered, minterms);
        }
    }
}
