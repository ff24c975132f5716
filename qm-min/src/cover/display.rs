// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::cover::Cover;
use itertools::{Itertools, Position};
use std::{borrow::Cow, fmt};

/// Displays a cover as a sum of products, e.g. `F = (v1 !v2) + (v3)`.
///
/// An empty cover is displayed as the constant `0`.
#[derive(Clone, Debug)]
pub struct CoverAlgebraicDisplay<'c, 'a> {
    cover: &'c Cover<'a>,
    name: Option<Cow<'c, str>>,
    separator: Cow<'c, str>,
}

impl<'c, 'a> CoverAlgebraicDisplay<'c, 'a> {
    pub fn new(cover: &'c Cover<'a>) -> Self {
        Self {
            cover,
            name: Some(Cow::Borrowed("F")),
            separator: Cow::Borrowed(" + "),
        }
    }

    /// Sets the function name printed before ` = `. `None` prints the expression alone.
    pub fn with_name(mut self, name: Option<impl Into<Cow<'c, str>>>) -> Self {
        self.name = name.map(Into::into);
        self
    }

    pub fn with_separator(mut self, separator: impl Into<Cow<'c, str>>) -> Self {
        self.separator = separator.into();
        self
    }
}

impl<'c, 'a> fmt::Display for CoverAlgebraicDisplay<'c, 'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(name) = &self.name {
            write!(f, "{} = ", name)?;
        }
        if self.cover.is_empty() {
            return write!(f, "0");
        }
        for term in self.cover.terms().with_position() {
            match term {
                Position::First(term) | Position::Middle(term) => {
                    write!(f, "{}{}", term.algebraic_display(), self.separator)?;
                }
                Position::Last(term) | Position::Only(term) => {
                    write!(f, "{}", term.algebraic_display())?;
                }
            }
        }
        Ok(())
    }
}
