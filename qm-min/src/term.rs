// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{Minterm, MAX_VARIABLES};
use itertools::Itertools;
use std::{collections::BTreeSet, fmt};

/// A product term: a partially specified input pattern plus the minterms it covers.
///
/// Each pattern position is `Some(true)` (`1`), `Some(false)` (`0`) or `None` (`-`, don't care).
/// Position 0 is the most significant bit of a minterm.
///
/// Equality and ordering are structural over `(pattern, minterms)`. Since `None < Some(false) <
/// Some(true)`, sorting terms sorts them by their textual pattern with `'-' < '0' < '1'`.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Term {
    pattern: Vec<Option<bool>>,
    minterms: BTreeSet<Minterm>,
}

impl Term {
    /// Creates a term from a pattern and the minterms it covers.
    ///
    /// Minterms may be given in any order and may contain duplicates.
    pub fn new(pattern: Vec<Option<bool>>, minterms: impl IntoIterator<Item = Minterm>) -> Self {
        Self {
            pattern,
            minterms: minterms.into_iter().collect(),
        }
    }

    /// Creates the fully specified term for a single minterm.
    ///
    /// `value` must fit in `variable_count` bits, and `variable_count` must be at most
    /// [`MAX_VARIABLES`].
    pub(crate) fn minterm(value: Minterm, variable_count: usize) -> Self {
        let pattern = (0..variable_count)
            .rev()
            .map(|bit| Some((value >> bit) & 1 == 1))
            .collect();
        Self::new(pattern, [value])
    }

    /// Parses a pattern such as `1-0`. Minterms are derived by expanding every don't care.
    ///
    /// Returns `None` if the pattern contains anything other than `0`, `1` and `-`, or if it is
    /// longer than [`MAX_VARIABLES`].
    pub fn from_pattern(pattern: &str) -> Option<Self> {
        if pattern.len() > MAX_VARIABLES {
            return None;
        }
        let pattern: Vec<_> = pattern
            .chars()
            .map(|ch| match ch {
                '0' => Some(Some(false)),
                '1' => Some(Some(true)),
                '-' => Some(None),
                _ => None,
            })
            .collect::<Option<_>>()?;

        let mut minterms = vec![0];
        for &value in &pattern {
            minterms = match value {
                Some(bit) => minterms
                    .into_iter()
                    .map(|m: Minterm| (m << 1) | Minterm::from(bit))
                    .collect(),
                None => minterms
                    .into_iter()
                    .flat_map(|m: Minterm| [m << 1, (m << 1) | 1])
                    .collect(),
            };
        }
        Some(Self::new(pattern, minterms))
    }

    #[inline]
    pub fn pattern(&self) -> &[Option<bool>] {
        &self.pattern
    }

    #[inline]
    pub fn minterms(&self) -> &BTreeSet<Minterm> {
        &self.minterms
    }

    #[inline]
    pub fn variable_count(&self) -> usize {
        self.pattern.len()
    }

    /// Number of `1` symbols in the pattern.
    pub fn ones(&self) -> usize {
        self.pattern.iter().filter(|&&c| c == Some(true)).count()
    }

    /// Number of `-` symbols in the pattern.
    pub fn dont_care_count(&self) -> usize {
        self.pattern.iter().filter(|c| c.is_none()).count()
    }

    /// Returns true if every position is a don't care, i.e. the term is the constant 1.
    pub fn is_universe(&self) -> bool {
        self.pattern.iter().all(|c| c.is_none())
    }

    /// Merges two terms whose patterns differ in exactly one position.
    ///
    /// The position must hold `0` on one side and `1` on the other; a `-` facing a `0` or `1`
    /// counts as a difference but blocks the merge. The merged term has `-` at that position and
    /// covers the union of both minterm sets.
    pub fn merge(&self, other: &Term) -> Option<Term> {
        debug_assert_eq!(
            self.variable_count(),
            other.variable_count(),
            "merged terms must have the same length"
        );

        let mut differences = self
            .pattern
            .iter()
            .zip(&other.pattern)
            .enumerate()
            .filter(|(_, (c, d))| c != d);

        let (diff_ix, (c, d)) = differences.next()?;
        if differences.next().is_some() || c.is_none() || d.is_none() {
            return None;
        }

        let mut pattern = self.pattern.clone();
        pattern[diff_ix] = None;
        let minterms = self.minterms.union(&other.minterms).copied().collect();

        Some(Term { pattern, minterms })
    }

    /// Evaluates this term as a conjunction against the bits of `minterm`.
    pub fn contains_minterm(&self, minterm: Minterm) -> bool {
        let len = self.variable_count();
        self.pattern.iter().enumerate().all(|(ix, &c)| match c {
            Some(value) => ((minterm >> (len - 1 - ix)) & 1 == 1) == value,
            None => true,
        })
    }

    /// Iterates over the literals of this term, skipping don't cares.
    pub fn literals(&self) -> impl Iterator<Item = Literal> + '_ {
        self.pattern
            .iter()
            .enumerate()
            .filter_map(|(index, &c)| c.map(|positive| Literal { index, positive }))
    }

    #[inline]
    pub fn matrix_display(&self) -> TermMatrixDisplay<'_> {
        TermMatrixDisplay::new(self)
    }

    #[inline]
    pub fn algebraic_display(&self) -> TermAlgebraicDisplay<'_> {
        TermAlgebraicDisplay::new(self)
    }
}

impl fmt::Debug for Term {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Term")
            .field(&format_args!("{}", self.matrix_display()))
            .field(&self.minterms)
            .finish()
    }
}

/// A single non-don't-care position of a [`Term`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Literal {
    /// 0-based pattern position.
    pub index: usize,
    /// False if the variable appears negated.
    pub positive: bool,
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if !self.positive {
            write!(f, "!")?;
        }
        write!(f, "v{}", self.index + 1)
    }
}

/// Displays the pattern of a term, e.g. `1-0`.
pub struct TermMatrixDisplay<'a> {
    term: &'a Term,
}

impl<'a> TermMatrixDisplay<'a> {
    pub fn new(term: &'a Term) -> Self {
        Self { term }
    }
}

impl<'a> fmt::Display for TermMatrixDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for &c in &self.term.pattern {
            let ch = match c {
                Some(true) => '1',
                Some(false) => '0',
                None => '-',
            };
            write!(f, "{}", ch)?;
        }
        Ok(())
    }
}

/// Displays a term as a conjunction of literals, e.g. `(v1 !v3)`.
///
/// A term without literals is the constant `1`.
pub struct TermAlgebraicDisplay<'a> {
    term: &'a Term,
}

impl<'a> TermAlgebraicDisplay<'a> {
    pub fn new(term: &'a Term) -> Self {
        Self { term }
    }
}

impl<'a> fmt::Display for TermAlgebraicDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.term.is_universe() {
            return write!(f, "1");
        }
        write!(f, "({})", self.term.literals().format(" "))
    }
}
