// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use camino::{Utf8Path, Utf8PathBuf};
use color_eyre::{
    eyre::{bail, ensure, WrapErr},
    Result,
};
use qm_min::{logic_function::BooleanFunction, pla::PlaDescription};
use std::fs;

/// Fixtures with more variables than this aren't checked exhaustively.
const EXHAUSTIVE_CHECK_LIMIT: usize = 16;

/// A single PLA fixture and its expected output.
#[derive(Clone, Debug)]
pub struct FixtureDetails {
    name: String,
    pla_path: Utf8PathBuf,
    function: BooleanFunction,
}

impl FixtureDetails {
    pub fn load(pla_path: impl Into<Utf8PathBuf>) -> Result<Self> {
        let pla_path = pla_path.into();
        let name = pla_path
            .file_stem()
            .map(str::to_owned)
            .unwrap_or_else(|| pla_path.to_string());
        let function = PlaDescription::from_path(&pla_path)?
            .into_function()
            .wrap_err_with(|| format!("fixture `{}` has no function to minimize", name))?;
        Ok(Self {
            name,
            pla_path,
            function,
        })
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn pla_path(&self) -> &Utf8Path {
        &self.pla_path
    }

    #[inline]
    pub fn function(&self) -> &BooleanFunction {
        &self.function
    }

    /// Where the expected minimized function is stored.
    pub fn output_path(&self) -> Utf8PathBuf {
        self.pla_path.with_extension("out")
    }

    /// Minimizes the fixture and renders the result.
    pub fn minimized(&self) -> String {
        let primes = self.function.prime_implicants();
        let cover = primes.select_cover(self.function.minterms());
        cover.algebraic_display().to_string()
    }

    pub fn write_output(&self) -> Result<()> {
        let output_path = self.output_path();
        fs::write(&output_path, format!("{}\n", self.minimized()))
            .wrap_err_with(|| format!("failed to write `{}`", output_path))
    }

    /// Checks that the minimized cover is complete and equivalent to the fixture, and that it
    /// matches the stored output if there is one.
    pub fn verify(&self) -> Result<()> {
        let primes = self.function.prime_implicants();
        let cover = primes.select_cover(self.function.minterms());
        ensure!(
            cover.is_complete(),
            "{}: minterms left uncovered: {:?}",
            self.name,
            cover.uncovered()
        );
        ensure!(
            &cover.covered_minterms() == self.function.minterms(),
            "{}: cover includes minterms outside the on-set",
            self.name
        );

        let variable_count = self.function.variable_count();
        if variable_count <= EXHAUSTIVE_CHECK_LIMIT {
            for minterm in 0..(1 << variable_count) {
                let expected = self.function.minterms().contains(&minterm);
                if cover.evaluate(minterm) != expected {
                    bail!(
                        "{}: cover evaluates to {} on minterm {}",
                        self.name,
                        !expected,
                        minterm
                    );
                }
            }
        }

        let output_path = self.output_path();
        if output_path.exists() {
            let stored = fs::read_to_string(&output_path)
                .wrap_err_with(|| format!("failed to read `{}`", output_path))?;
            let actual = cover.algebraic_display().to_string();
            ensure!(
                stored.trim() == actual,
                "{}: expected `{}`, got `{}`",
                self.name,
                stored.trim(),
                actual
            );
        }

        Ok(())
    }
}
