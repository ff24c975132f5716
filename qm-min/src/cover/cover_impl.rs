// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{cover::CoverAlgebraicDisplay, primes::PrimeImplicants, term::Term, Minterm};
use bitvec::prelude::*;
use log::{debug, warn};
use std::{collections::BTreeSet, fmt};

/// A selection of prime implicants covering a set of minterms.
///
/// Terms are in selection order: essential implicants first, in ascending order of the minterm
/// that made them essential, followed by greedy picks.
#[derive(Clone)]
pub struct Cover<'a> {
    primes: &'a PrimeImplicants,
    picks: Vec<usize>,
    essential_count: usize,
    uncovered: BTreeSet<Minterm>,
}

impl PrimeImplicants {
    /// Selects a subset of these prime implicants covering `minterms`.
    ///
    /// Implicants that are the only cover for some minterm are selected first. After that, the
    /// implicant covering the most remaining minterms is picked until everything is covered. Ties
    /// go to the implicant that comes first in pattern order. This is a heuristic: the result is
    /// not guaranteed to be a minimum cover.
    ///
    /// If the remaining minterms can't be covered by any implicant, selection stops early and the
    /// returned cover reports them through [`Cover::uncovered`].
    pub fn select_cover(&self, minterms: &BTreeSet<Minterm>) -> Cover<'_> {
        let terms = self.terms();
        let mut used = bitvec![0; terms.len()];
        let mut picks = Vec::new();
        let mut covered = BTreeSet::new();

        for (minterm, implicants) in self.coverage_table().iter() {
            if let &[ix] = implicants {
                if !used[ix] {
                    debug!(
                        "essential implicant {} (only cover for minterm {})",
                        terms[ix].matrix_display(),
                        minterm
                    );
                    used.set(ix, true);
                    picks.push(ix);
                    covered.extend(terms[ix].minterms().iter().copied());
                }
            }
        }
        let essential_count = picks.len();

        let mut uncovered: BTreeSet<_> = minterms.difference(&covered).copied().collect();
        while !uncovered.is_empty() {
            let mut best: Option<(usize, usize)> = None;
            for (ix, term) in terms.iter().enumerate() {
                if used[ix] {
                    continue;
                }
                let count = term.minterms().intersection(&uncovered).count();
                // Strictly greater, so the leftmost implicant wins ties.
                if count > best.map_or(0, |(_, best_count)| best_count) {
                    best = Some((ix, count));
                }
            }

            match best {
                Some((ix, count)) => {
                    debug!(
                        "greedy pick {} (covers {} of {} remaining minterms)",
                        terms[ix].matrix_display(),
                        count,
                        uncovered.len()
                    );
                    used.set(ix, true);
                    picks.push(ix);
                    for minterm in terms[ix].minterms() {
                        uncovered.remove(minterm);
                    }
                }
                None => {
                    warn!(
                        "could not cover all minterms: {} left uncovered",
                        uncovered.len()
                    );
                    break;
                }
            }
        }

        Cover {
            primes: self,
            picks,
            essential_count,
            uncovered,
        }
    }
}

impl<'a> Cover<'a> {
    /// The prime implicants this cover was selected from.
    #[inline]
    pub fn prime_implicants(&self) -> &'a PrimeImplicants {
        self.primes
    }

    /// Indexes into [`Self::prime_implicants`], in selection order.
    #[inline]
    pub fn picks(&self) -> &[usize] {
        &self.picks
    }

    /// The selected terms, in selection order.
    pub fn terms(&self) -> impl ExactSizeIterator<Item = &'a Term> + '_ {
        let terms = self.primes.terms();
        self.picks.iter().map(move |&ix| &terms[ix])
    }

    /// The terms selected because they were the only cover for some minterm.
    pub fn essential_terms(&self) -> impl Iterator<Item = &'a Term> + '_ {
        self.terms().take(self.essential_count)
    }

    /// The terms selected by the greedy pass.
    pub fn greedy_terms(&self) -> impl Iterator<Item = &'a Term> + '_ {
        self.terms().skip(self.essential_count)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.picks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.picks.is_empty()
    }

    /// Returns false if selection ran out of implicants before every minterm was covered.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.uncovered.is_empty()
    }

    /// Minterms that no selected term covers.
    #[inline]
    pub fn uncovered(&self) -> &BTreeSet<Minterm> {
        &self.uncovered
    }

    /// The union of the minterms covered by the selected terms.
    pub fn covered_minterms(&self) -> BTreeSet<Minterm> {
        self.terms()
            .flat_map(|term| term.minterms().iter().copied())
            .collect()
    }

    /// Evaluates the sum of products for a minterm.
    pub fn evaluate(&self, minterm: Minterm) -> bool {
        self.terms().any(|term| term.contains_minterm(minterm))
    }

    #[inline]
    pub fn algebraic_display(&self) -> CoverAlgebraicDisplay<'_, 'a> {
        CoverAlgebraicDisplay::new(self)
    }
}

impl<'a> fmt::Debug for Cover<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut debug_struct = f.debug_struct("Cover");
        debug_struct.field("function", &format_args!("{}", self.algebraic_display()));
        if !self.is_complete() {
            debug_struct.field("uncovered", &self.uncovered);
        }
        debug_struct.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic_function::BooleanFunction;
    use proptest::prelude::*;
    use test_log::test;

    fn patterns<'a>(terms: impl Iterator<Item = &'a Term>) -> Vec<String> {
        terms.map(|t| t.matrix_display().to_string()).collect()
    }

    fn minimize(
        variable_count: usize,
        minterms: &[Minterm],
    ) -> (PrimeImplicants, BTreeSet<Minterm>) {
        let function = BooleanFunction::new(variable_count, minterms.iter().copied())
            .expect("valid function");
        (function.prime_implicants(), function.minterms().clone())
    }

    #[test]
    fn test_tautology() {
        let (primes, minterms) = minimize(3, &[0, 1, 2, 3, 4, 5, 6, 7]);
        let cover = primes.select_cover(&minterms);
        assert_eq!(patterns(cover.terms()), vec!["---"]);
        assert!(cover.is_complete());
        assert_eq!(cover.algebraic_display().to_string(), "F = 1");
    }

    #[test]
    fn test_essentials_only() {
        let (primes, minterms) = minimize(2, &[0, 1, 2]);
        let cover = primes.select_cover(&minterms);

        // Minterm 1 is only covered by `0-`, minterm 2 only by `-0`.
        assert_eq!(patterns(cover.essential_terms()), vec!["0-", "-0"]);
        assert_eq!(cover.greedy_terms().count(), 0);
        assert_eq!(cover.picks(), &[1, 0]);
        assert!(cover.is_complete());
        assert_eq!(cover.covered_minterms(), minterms);
        assert_eq!(cover.algebraic_display().to_string(), "F = (!v1) + (!v2)");
    }

    #[test]
    fn test_greedy_cyclic() {
        // Every minterm is covered by exactly two prime implicants, so nothing is essential.
        let (primes, minterms) = minimize(3, &[0, 1, 2, 5, 6, 7]);
        assert_eq!(
            patterns(primes.terms().iter()),
            vec!["-01", "-10", "0-0", "00-", "1-1", "11-"]
        );
        assert!(primes
            .coverage_table()
            .iter()
            .all(|(_, implicants)| implicants.len() == 2));

        let cover = primes.select_cover(&minterms);
        assert_eq!(cover.essential_terms().count(), 0);

        // Step 1: all six cover 2, `-01` is leftmost.
        // Step 2: `-10`, `0-0` and `11-` cover 2 of {0, 2, 6, 7}, `-10` is leftmost.
        // Step 3: every candidate covers 1 of {0, 7}, `0-0` is leftmost.
        // Step 4: only `1-1` and `11-` cover 7, `1-1` is leftmost.
        assert_eq!(patterns(cover.greedy_terms()), vec!["-01", "-10", "0-0", "1-1"]);
        assert!(cover.is_complete());
        assert_eq!(cover.covered_minterms(), minterms);
    }

    #[test]
    fn test_essential_then_greedy() {
        // The three-variable cycle embedded under !v1, plus minterm 15 which only `-111` covers.
        let (primes, minterms) = minimize(4, &[0, 1, 2, 5, 6, 7, 15]);
        assert_eq!(
            patterns(primes.terms().iter()),
            vec!["-111", "0-01", "0-10", "00-0", "000-", "01-1", "011-"]
        );

        let cover = primes.select_cover(&minterms);
        assert_eq!(patterns(cover.essential_terms()), vec!["-111"]);
        // `-111` also covers 7, so `01-1` and `011-` only score 1 each afterwards.
        assert_eq!(
            patterns(cover.greedy_terms()),
            vec!["0-01", "0-10", "00-0"]
        );
        assert!(cover.is_complete());
        assert_eq!(
            cover.algebraic_display().to_string(),
            "F = (v2 v3 v4) + (!v1 !v3 v4) + (!v1 v3 !v4) + (!v1 !v2 !v4)"
        );
    }

    #[test]
    fn test_incomplete_cover() {
        let primes = PrimeImplicants::from_terms(2, [Term::from_pattern("0-").unwrap()]);
        let minterms = [0, 1, 2].into_iter().collect();
        let cover = primes.select_cover(&minterms);

        assert!(!cover.is_complete());
        assert_eq!(cover.uncovered().iter().copied().collect::<Vec<_>>(), vec![2]);
        assert_eq!(patterns(cover.terms()), vec!["0-"], "partial cover is kept");
        assert_eq!(cover.algebraic_display().to_string(), "F = (!v1)");
    }

    #[test]
    fn test_empty_primes() {
        let primes = PrimeImplicants::from_terms(2, []);
        let minterms = [3].into_iter().collect();
        let cover = primes.select_cover(&minterms);
        assert!(cover.is_empty());
        assert!(!cover.is_complete());
        assert_eq!(cover.algebraic_display().to_string(), "F = 0");
    }

    proptest! {
        #[test]
        fn proptest_cover_sound_and_complete(function: BooleanFunction) {
            let primes = function.prime_implicants();
            let cover = primes.select_cover(function.minterms());

            prop_assert!(cover.is_complete());
            prop_assert_eq!(&cover.covered_minterms(), function.minterms());
            for term in cover.terms() {
                for &m in term.minterms() {
                    prop_assert!(term.contains_minterm(m), "{:?} contains {}", term, m);
                }
            }
            for minterm in 0..(1 << function.variable_count()) {
                prop_assert_eq!(
                    cover.evaluate(minterm),
                    function.minterms().contains(&minterm),
                    "cover agrees with the function on {}", minterm,
                );
            }
        }

        #[test]
        fn proptest_cover_no_repeats(function: BooleanFunction) {
            let primes = function.prime_implicants();
            let cover = primes.select_cover(function.minterms());
            let unique: BTreeSet<_> = cover.picks().iter().collect();
            prop_assert_eq!(unique.len(), cover.len());
        }
    }
}
