use std::{fs, path::Path};

use storm_genesis_core::{Basin, GenesisError, BASIN_COUNT};

use crate::{resource_error, TableError};

/// Poisson genesis rate λ for every basin, in basin index order.
#[derive(Clone, Debug, PartialEq)]
pub struct GenesisRateTable {
    rates: [f64; BASIN_COUNT],
}

impl GenesisRateTable {
    /// Creates a table from rates ordered `[EP, NA, NI, SI, SP, WP]`.
    pub fn new(rates: [f64; BASIN_COUNT]) -> Result<Self, TableError> {
        for (index, rate) in rates.iter().copied().enumerate() {
            if !rate.is_finite() || rate < 0.0 {
                return Err(TableError::InvalidRate { index, rate });
            }
        }
        Ok(Self { rates })
    }

    /// Reads the table from a whitespace-separated text file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GenesisError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|err| resource_error(path, err))?;
        let table = Self::parse(&contents).map_err(|err| resource_error(path, err))?;
        log::debug!("loaded genesis rates {:?} from {}", table.rates, path.display());
        Ok(table)
    }

    /// Parses whitespace-separated rates. `#` starts a comment running to the
    /// end of the line.
    pub fn parse(contents: &str) -> Result<Self, TableError> {
        let mut rates = [0.0; BASIN_COUNT];
        let mut count = 0;
        for token in contents
            .lines()
            .map(|line| line.split_once('#').map_or(line, |(data, _)| data))
            .flat_map(str::split_whitespace)
        {
            let rate: f64 = token.parse().map_err(|source| TableError::InvalidNumber {
                token: token.to_owned(),
                source,
            })?;
            if let Some(slot) = rates.get_mut(count) {
                *slot = rate;
            }
            count += 1;
        }

        if count != BASIN_COUNT {
            return Err(TableError::RateCount { found: count });
        }
        Self::new(rates)
    }

    /// Rate λ for the basin.
    #[must_use]
    pub fn rate(&self, basin: Basin) -> f64 {
        self.rates[basin.index()]
    }

    /// All rates in basin index order.
    #[must_use]
    pub fn rates(&self) -> &[f64; BASIN_COUNT] {
        &self.rates
    }
}
