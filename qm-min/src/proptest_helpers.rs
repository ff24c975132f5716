// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{logic_function::BooleanFunction, Minterm};
use proptest::prelude::*;

impl Arbitrary for BooleanFunction {
    /// Inclusive range of variable counts to generate. Defaults to `1..=6`; the upper bound
    /// should stay small since the whole truth table is generated.
    type Parameters = Option<(usize, usize)>;
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(params: Self::Parameters) -> Self::Strategy {
        let (min_vars, max_vars) = params.unwrap_or((1, 6));
        (min_vars..=max_vars)
            .prop_flat_map(|variable_count| {
                // One output bit per row of the truth table.
                let rows = prop::collection::vec(any::<bool>(), 1_usize << variable_count)
                    .prop_filter("at least one minterm", |rows| rows.contains(&true));
                (Just(variable_count), rows)
            })
            .prop_map(|(variable_count, rows)| {
                let minterms = rows
                    .into_iter()
                    .enumerate()
                    .filter_map(|(minterm, value)| value.then(|| minterm as Minterm));
                BooleanFunction::new(variable_count, minterms)
                    .expect("generated minterms are in range and non-empty")
            })
            .boxed()
    }
}
