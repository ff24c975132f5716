// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use itertools::join;
use qm_min::{cover::Cover, logic_function::BooleanFunction};
use std::{io, time::Duration};

/// The printed result of a minimization run.
pub struct Report<'a, 'p> {
    function: &'a BooleanFunction,
    cover: &'a Cover<'p>,
    elapsed: Duration,
}

impl<'a, 'p> Report<'a, 'p> {
    pub fn new(function: &'a BooleanFunction, cover: &'a Cover<'p>, elapsed: Duration) -> Self {
        Self {
            function,
            cover,
            elapsed,
        }
    }

    /// Writes the minimized function and, if selection was incomplete, the uncovered minterms.
    pub fn write_summary(&self, out: &mut impl io::Write) -> io::Result<()> {
        self.write_uncovered(out)?;
        writeln!(out, "{}", self.cover.algebraic_display())
    }

    /// Writes every stage of the minimization.
    pub fn write_full(&self, out: &mut impl io::Write) -> io::Result<()> {
        writeln!(out, "Variables: {}", self.function.variable_count())?;
        writeln!(out, "Minterms: {}", join(self.function.minterms(), " "))?;
        writeln!(out, "---")?;

        writeln!(out, "Prime implicants:")?;
        for term in self.cover.prime_implicants().terms() {
            writeln!(
                out,
                "  {} ({}) covers m{}",
                term.algebraic_display(),
                term.matrix_display(),
                join(term.minterms(), ",")
            )?;
        }
        writeln!(out, "---")?;

        writeln!(out, "Essential implicants:")?;
        for term in self.cover.essential_terms() {
            writeln!(out, "  {}", term.algebraic_display())?;
        }
        writeln!(out, "---")?;

        writeln!(out, "Minimized function:")?;
        self.write_summary(out)?;
        writeln!(
            out,
            "Minimization time: {:.3} ms",
            self.elapsed.as_secs_f64() * 1000.0
        )
    }

    fn write_uncovered(&self, out: &mut impl io::Write) -> io::Result<()> {
        if !self.cover.is_complete() {
            writeln!(
                out,
                "could not cover all minterms: {}",
                join(self.cover.uncovered(), ", ")
            )?;
        }
        Ok(())
    }
}
