#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Static statistical tables the genesis samplers draw from.
//!
//! Two tables are read from storage: the per-basin Poisson genesis rates and
//! the per-basin list of historically observed genesis months. Both are loaded
//! once through [`GenesisResources::load`] and then shared read-only by every
//! sampler, so repeated sampling never touches the filesystem.

use std::path::{Path, PathBuf};

use storm_genesis_core::GenesisError;

mod months;
mod rates;

pub use months::GenesisMonthTable;
pub use rates::GenesisRateTable;

/// File name of the Poisson genesis rate table.
pub const RATE_TABLE_FILE: &str = "POISSON_GENESIS_PARAMETERS.txt";

/// File name of the genesis month table.
pub const MONTH_TABLE_FILE: &str = "GENESIS_MONTHS.toml";

/// Locations of the two genesis tables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourcePaths {
    rate_table: PathBuf,
    month_table: PathBuf,
}

impl ResourcePaths {
    /// Uses explicit paths for both tables.
    #[must_use]
    pub fn new(rate_table: impl Into<PathBuf>, month_table: impl Into<PathBuf>) -> Self {
        Self {
            rate_table: rate_table.into(),
            month_table: month_table.into(),
        }
    }

    /// Expects both tables under their canonical file names inside `dir`.
    #[must_use]
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self::new(dir.join(RATE_TABLE_FILE), dir.join(MONTH_TABLE_FILE))
    }

    /// Tables shipped in the `data/` directory next to this crate.
    #[must_use]
    pub fn bundled() -> Self {
        Self::from_dir(Self::bundled_dir())
    }

    /// Directory holding the shipped tables.
    #[must_use]
    pub fn bundled_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("data")
    }

    /// Path of the Poisson rate table.
    #[must_use]
    pub fn rate_table(&self) -> &Path {
        &self.rate_table
    }

    /// Path of the genesis month table.
    #[must_use]
    pub fn month_table(&self) -> &Path {
        &self.month_table
    }
}

impl Default for ResourcePaths {
    fn default() -> Self {
        Self::bundled()
    }
}

/// Both genesis tables, loaded once and shared by the samplers.
#[derive(Clone, Debug, PartialEq)]
pub struct GenesisResources {
    rates: GenesisRateTable,
    months: GenesisMonthTable,
}

impl GenesisResources {
    /// Bundles already constructed tables.
    #[must_use]
    pub fn new(rates: GenesisRateTable, months: GenesisMonthTable) -> Self {
        Self { rates, months }
    }

    /// Loads both tables from storage. Fails on the first unreadable or
    /// malformed table.
    pub fn load(paths: &ResourcePaths) -> Result<Self, GenesisError> {
        let rates = GenesisRateTable::load(paths.rate_table())?;
        let months = GenesisMonthTable::load(paths.month_table())?;
        Ok(Self::new(rates, months))
    }

    /// Loads the tables shipped with this crate.
    pub fn load_bundled() -> Result<Self, GenesisError> {
        Self::load(&ResourcePaths::bundled())
    }

    /// Poisson genesis rates.
    #[must_use]
    pub fn rates(&self) -> &GenesisRateTable {
        &self.rates
    }

    /// Empirical genesis months.
    #[must_use]
    pub fn months(&self) -> &GenesisMonthTable {
        &self.months
    }
}

/// Reasons a table's contents are rejected.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// The rate table did not hold one value per basin.
    #[error("expected 6 genesis rates, found {found}")]
    RateCount {
        /// Number of values present.
        found: usize,
    },

    /// A rate token was not a number.
    #[error("`{token}` is not a number")]
    InvalidNumber {
        /// Offending token.
        token: String,
        /// Parser failure.
        source: std::num::ParseFloatError,
    },

    /// A rate was negative or not finite.
    #[error("genesis rate {rate} for basin {index} must be finite and non-negative")]
    InvalidRate {
        /// Basin index of the rate.
        index: usize,
        /// Offending rate.
        rate: f64,
    },

    /// The month table is not valid TOML or has the wrong shape.
    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    /// A month table key is not a basin index.
    #[error("`{key}` is not a basin index between 0 and 5")]
    UnknownBasinKey {
        /// Offending key.
        key: String,
    },

    /// A basin has no month list.
    #[error("no genesis months listed for basin {index}")]
    MissingBasin {
        /// Missing basin index.
        index: usize,
    },

    /// A basin's month list is empty.
    #[error("genesis month list for basin {index} is empty")]
    EmptyMonths {
        /// Basin index with the empty list.
        index: usize,
    },

    /// A listed month lies outside 1..=12.
    #[error("genesis month {value} for basin {index} is outside 1..=12")]
    InvalidMonth {
        /// Basin index of the list.
        index: usize,
        /// Offending value.
        value: i64,
    },
}

fn resource_error(
    path: &Path,
    source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
) -> GenesisError {
    GenesisError::ResourceLoad {
        path: path.to_path_buf(),
        source: source.into(),
    }
}
