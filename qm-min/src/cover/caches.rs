// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{term::Term, Minterm};
use once_cell::sync::OnceCell;
use std::collections::BTreeMap;

/// Cache for data derived from a finalized prime implicant list.
#[derive(Clone, Debug, Default)]
pub(crate) struct CoverageCache {
    table: OnceCell<CoverageTable>,
}

impl CoverageCache {
    pub(crate) fn get_or_init_table(&self, terms: &[Term]) -> &CoverageTable {
        self.table.get_or_init(|| CoverageTable::new(terms))
    }
}

/// Maps each minterm to the indexes of the prime implicants that cover it.
///
/// Minterms are iterated in ascending order, and indexes within an entry are ascending too.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoverageTable {
    entries: BTreeMap<Minterm, Vec<usize>>,
}

impl CoverageTable {
    fn new(terms: &[Term]) -> Self {
        let mut entries: BTreeMap<Minterm, Vec<usize>> = BTreeMap::new();
        for (ix, term) in terms.iter().enumerate() {
            for &minterm in term.minterms() {
                entries.entry(minterm).or_default().push(ix);
            }
        }
        Self { entries }
    }

    /// Returns the indexes of the implicants covering `minterm`, or an empty slice.
    pub fn implicants_for(&self, minterm: Minterm) -> &[usize] {
        self.entries.get(&minterm).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (Minterm, &[usize])> + '_ {
        self.entries
            .iter()
            .map(|(&minterm, implicants)| (minterm, implicants.as_slice()))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
