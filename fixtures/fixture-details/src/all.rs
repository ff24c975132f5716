// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{FixtureDetails, ValueGenerator};
use camino::{Utf8Path, Utf8PathBuf};
use color_eyre::{eyre::WrapErr, Result};
use log::info;
use once_cell::sync::Lazy;
use proptest::prelude::*;
use qm_min::{logic_function::BooleanFunction, pla::write_pla};
use std::{fs, io::BufWriter};

pub struct AllFixtures {
    dir: Utf8PathBuf,
}

static ALL_FIXTURES_STATIC: Lazy<AllFixtures> = Lazy::new(AllFixtures::init);

impl AllFixtures {
    pub fn get() -> &'static Self {
        &*ALL_FIXTURES_STATIC
    }

    fn init() -> Self {
        let dir: Utf8PathBuf = env!("CARGO_MANIFEST_DIR").into();
        let dir = dir
            .parent()
            .expect("fixture-details lives in the fixtures directory")
            .join("data");
        Self { dir }
    }

    #[inline]
    pub fn dir(&self) -> &Utf8Path {
        &self.dir
    }

    /// Loads every `.pla` file in the data directory, sorted by path.
    pub fn fixtures(&self) -> Result<Vec<FixtureDetails>> {
        let mut paths = Vec::new();
        for entry in self
            .dir
            .read_dir_utf8()
            .wrap_err_with(|| format!("failed to read `{}`", self.dir))?
        {
            let path = entry?.into_path();
            if path.extension() == Some("pla") {
                paths.push(path);
            }
        }
        paths.sort();
        paths.into_iter().map(FixtureDetails::load).collect()
    }

    /// Writes `count` randomly generated functions as `random-<n>.pla`.
    pub fn generate_inputs(&self, count: usize) -> Result<()> {
        let mut value_gen = ValueGenerator::from_seed("qm-min-fixtures");

        for n in 0..count {
            let mut gen = value_gen.partial_clone();
            let function = gen.generate(any_with::<BooleanFunction>(Some((2, 8))));
            let path = self.dir.join(format!("random-{}.pla", n));
            let file =
                fs::File::create(&path).wrap_err_with(|| format!("failed to create `{}`", path))?;
            write_pla(&function, BufWriter::new(file))
                .wrap_err_with(|| format!("failed to write `{}`", path))?;
        }

        info!("wrote {} fixtures to {}", count, self.dir);
        Ok(())
    }

    /// Minimizes every fixture and stores the result next to it.
    pub fn generate_outputs(&self) -> Result<()> {
        let fixtures = self.fixtures()?;
        for fixture in &fixtures {
            fixture.write_output()?;
        }
        info!("wrote {} outputs to {}", fixtures.len(), self.dir);
        Ok(())
    }

    /// Verifies every fixture.
    pub fn verify(&self) -> Result<()> {
        let fixtures = self.fixtures()?;
        for fixture in &fixtures {
            fixture.verify()?;
        }
        info!("verified {} fixtures", fixtures.len());
        Ok(())
    }
}
