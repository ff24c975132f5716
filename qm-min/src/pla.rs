// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reading and writing single-output truth tables in Berkeley PLA format.
//!
//! Only the subset needed to describe an on-set is understood: `.i` declares the number of
//! inputs, `.e` ends the data, and each data row is an input pattern followed by an output value.
//! Rows are only kept if the output is `1` and the pattern is a plain binary number.

use crate::{
    errors::{MinimizeError, PlaError},
    logic_function::BooleanFunction,
    Minterm,
};
use log::debug;
use std::{
    collections::BTreeSet,
    fs,
    io::{self, Write},
    path::Path,
};

/// Directives that carry no information for a single-output on-set.
const IGNORED_DIRECTIVES: &[&str] = &[".o", ".p", ".ilb", ".ob"];

/// The contents of a PLA description.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlaDescription {
    /// The value of the `.i` directive, or 0 if there was none.
    pub variable_count: usize,
    /// Decoded on-set rows, deduplicated and sorted.
    pub minterms: BTreeSet<Minterm>,
}

impl PlaDescription {
    /// Reads a PLA description from a file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, PlaError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|err| PlaError::Io {
            path: Some(path.to_owned()),
            err,
        })?;
        Self::parse(&contents)
    }

    /// Reads a PLA description from a reader.
    pub fn from_reader(mut reader: impl io::Read) -> Result<Self, PlaError> {
        let mut contents = String::new();
        reader
            .read_to_string(&mut contents)
            .map_err(|err| PlaError::Io { path: None, err })?;
        Self::parse(&contents)
    }

    /// Parses a PLA description.
    pub fn parse(contents: &str) -> Result<Self, PlaError> {
        let mut description = Self::default();

        for (line_ix, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut tokens = line.split_whitespace();
            let first = match tokens.next() {
                Some(first) => first,
                None => continue,
            };

            match first {
                ".i" => {
                    let value = tokens.next().unwrap_or_default();
                    description.variable_count =
                        value.parse().map_err(|_| PlaError::InvalidInputCount {
                            line: line_ix + 1,
                            value: value.to_owned(),
                        })?;
                }
                ".e" => break,
                directive if IGNORED_DIRECTIVES.contains(&directive) => {}
                bits => {
                    // Anything else, including unknown directives, is a data row.
                    if tokens.next() != Some("1") {
                        continue;
                    }
                    match Minterm::from_str_radix(bits, 2) {
                        Ok(minterm) => {
                            description.minterms.insert(minterm);
                        }
                        Err(err) => {
                            debug!("line {}: skipping row `{}`: {}", line_ix + 1, bits, err);
                        }
                    }
                }
            }
        }

        Ok(description)
    }

    /// Validates this description as a Boolean function.
    pub fn into_function(self) -> Result<BooleanFunction, MinimizeError> {
        BooleanFunction::new(self.variable_count, self.minterms)
    }
}

/// Writes the on-set of `function` as a PLA description that [`PlaDescription::parse`] reads back.
pub fn write_pla(function: &BooleanFunction, mut writer: impl Write) -> io::Result<()> {
    let width = function.variable_count();
    writeln!(writer, ".i {}", width)?;
    writeln!(writer, ".o 1")?;
    writeln!(writer, ".p {}", function.minterms().len())?;
    for minterm in function.minterms() {
        writeln!(writer, "{:0width$b} 1", minterm, width = width)?;
    }
    writeln!(writer, ".e")
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_parse_basic() {
        let input = "\
# majority of three
.i 3
.o 1
.ilb a b c
.ob f
.p 5
011 1
101 1
110 1
111 1
000 0
.e
";
        let description = PlaDescription::parse(input).unwrap();
        assert_eq!(description.variable_count, 3);
        assert_eq!(
            description.minterms.iter().copied().collect::<Vec<_>>(),
            vec![3, 5, 6, 7]
        );
    }

    #[test]
    fn test_parse_dedup_and_end() {
        let input = ".i 2\n10 1\n01 1\n10 1\n.e\n11 1\n";
        let description = PlaDescription::parse(input).unwrap();
        assert_eq!(
            description.minterms.iter().copied().collect::<Vec<_>>(),
            vec![1, 2],
            "duplicates removed and rows after .e ignored"
        );
    }

    #[test]
    fn test_parse_skips_rows() {
        let input = "\
.i 3
.type fr
1-0 1
0x1 1
001 -
010 1
100
";
        let description = PlaDescription::parse(input).unwrap();
        assert_eq!(
            description.minterms.iter().copied().collect::<Vec<_>>(),
            vec![2],
            "unknown directives, don't care rows and non-1 outputs are skipped"
        );
    }

    #[test]
    fn test_parse_missing_inputs() {
        let description = PlaDescription::parse("01 1\n").unwrap();
        assert_eq!(description.variable_count, 0);
        assert_eq!(
            description.into_function(),
            Err(MinimizeError::NoVariables),
            "missing .i is input-absent"
        );

        let description = PlaDescription::parse(".i 4\n0000 0\n.e\n").unwrap();
        assert_eq!(description.into_function(), Err(MinimizeError::NoMinterms));
    }

    #[test]
    fn test_parse_invalid_input_count() {
        let err = PlaDescription::parse("# header\n.i three\n").unwrap_err();
        assert!(
            matches!(&err, PlaError::InvalidInputCount { line: 2, value } if value == "three"),
            "unexpected error: {:?}",
            err
        );
        assert!(matches!(
            PlaDescription::parse(".i\n"),
            Err(PlaError::InvalidInputCount { line: 1, .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = PlaDescription::from_path("/nonexistent/qm-min/input.pla").unwrap_err();
        assert!(matches!(err, PlaError::Io { path: Some(_), .. }));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_from_reader() {
        let description = PlaDescription::from_reader(&b".i 1\n1 1\n"[..]).unwrap();
        assert_eq!(description.variable_count, 1);
        assert_eq!(description.minterms.len(), 1);
    }

    #[test]
    fn test_write() {
        let function = BooleanFunction::new(3, [6, 1]).unwrap();
        let mut out = Vec::new();
        write_pla(&function, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            ".i 3\n.o 1\n.p 2\n001 1\n110 1\n.e\n"
        );
    }
}
