use std::{collections::BTreeMap, fs, path::Path};

use serde::Deserialize;
use storm_genesis_core::{Basin, GenesisError, Month, BASIN_COUNT};

use crate::{resource_error, TableError};

/// Empirical genesis months observed in each basin.
///
/// Months repeat in proportion to their historical frequency, so a uniform
/// pick over a basin's list follows the empirical month distribution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenesisMonthTable {
    months: [Vec<Month>; BASIN_COUNT],
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MonthTableFile {
    months: BTreeMap<String, Vec<i64>>,
}

impl GenesisMonthTable {
    /// Creates a table from per-basin month lists in basin index order.
    pub fn new(months: [Vec<Month>; BASIN_COUNT]) -> Result<Self, TableError> {
        if let Some(index) = months.iter().position(Vec::is_empty) {
            return Err(TableError::EmptyMonths { index });
        }
        Ok(Self { months })
    }

    /// Reads the table from a TOML document on disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GenesisError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|err| resource_error(path, err))?;
        let table = Self::parse(&contents).map_err(|err| resource_error(path, err))?;
        log::debug!(
            "loaded genesis months from {} ({} observations)",
            path.display(),
            table.months.iter().map(Vec::len).sum::<usize>()
        );
        Ok(table)
    }

    /// Parses a `[months]` table keyed by basin index `"0"` through `"5"`.
    pub fn parse(contents: &str) -> Result<Self, TableError> {
        let file: MonthTableFile = toml::from_str(contents)?;
        let mut months: [Option<Vec<Month>>; BASIN_COUNT] = Default::default();

        for (key, values) in file.months {
            let index = key
                .parse::<usize>()
                .ok()
                .filter(|index| *index < BASIN_COUNT)
                .ok_or_else(|| TableError::UnknownBasinKey { key: key.clone() })?;
            let parsed = values
                .into_iter()
                .map(|value| {
                    u8::try_from(value)
                        .ok()
                        .and_then(Month::new)
                        .ok_or(TableError::InvalidMonth { index, value })
                })
                .collect::<Result<Vec<_>, _>>()?;
            months[index] = Some(parsed);
        }

        let mut resolved: [Vec<Month>; BASIN_COUNT] = Default::default();
        for (index, slot) in months.into_iter().enumerate() {
            resolved[index] = slot.ok_or(TableError::MissingBasin { index })?;
        }
        Self::new(resolved)
    }

    /// Observed genesis months for the basin. Never empty.
    #[must_use]
    pub fn months(&self, basin: Basin) -> &[Month] {
        &self.months[basin.index()]
    }
}
