#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Composes the count and date samplers into one basin-year draw.
//!
//! [`BasinGenesis`] owns the genesis tables it was loaded with and resolves a
//! basin code, samples the storm count and then samples one genesis time per
//! storm. Every sampling entry point takes the random generator explicitly;
//! [`BasinGenesis::storms_and_dates`] falls back to the thread-local generator.

use rand::Rng;
use storm_genesis_core::{Basin, GenesisDates, GenesisError, GenesisSample, StormCount};
use storm_genesis_system_count::{self as count, CountSampling};
use storm_genesis_system_dates::DateSampling;
use storm_genesis_tables::{GenesisResources, ResourcePaths};

/// Configuration parameters required to load the orchestrator.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
    resources: ResourcePaths,
    count: count::Config,
}

impl Config {
    /// Creates a configuration from table locations and count settings.
    #[must_use]
    pub fn new(resources: ResourcePaths, count: count::Config) -> Self {
        Self { resources, count }
    }

    /// Locations of the genesis tables.
    #[must_use]
    pub fn resources(&self) -> &ResourcePaths {
        &self.resources
    }

    /// Storm count sampler settings.
    #[must_use]
    pub fn count(&self) -> count::Config {
        self.count
    }
}

/// Samples storm counts and genesis dates per basin.
#[derive(Debug)]
pub struct BasinGenesis {
    resources: GenesisResources,
    counting: CountSampling,
    dating: DateSampling,
}

impl BasinGenesis {
    /// Builds an orchestrator around tables that are already loaded.
    #[must_use]
    pub fn new(resources: GenesisResources, count: count::Config) -> Self {
        Self {
            resources,
            counting: CountSampling::new(count),
            dating: DateSampling::new(),
        }
    }

    /// Loads the genesis tables named by `config` once and builds an
    /// orchestrator around them.
    pub fn load(config: &Config) -> Result<Self, GenesisError> {
        let paths = config.resources();
        let resources = GenesisResources::load(paths)?;
        log::debug!(
            "genesis tables ready (rates: {}, months: {})",
            paths.rate_table().display(),
            paths.month_table().display()
        );
        Ok(Self::new(resources, config.count()))
    }

    /// Loads the tables shipped with the workspace using default settings.
    pub fn load_bundled() -> Result<Self, GenesisError> {
        Self::load(&Config::default())
    }

    /// Tables the orchestrator samples from.
    #[must_use]
    pub fn resources(&self) -> &GenesisResources {
        &self.resources
    }

    /// Samples one year of storm genesis for the basin with code `basin_name`.
    ///
    /// The returned sample carries the storm count, one month, day and hour per
    /// storm, and the resolved basin index.
    pub fn generate_basin<R: Rng>(
        &mut self,
        basin_name: &str,
        rng: &mut R,
    ) -> Result<GenesisSample, GenesisError> {
        let basin = Basin::from_code(basin_name)?;
        self.sample_basin(basin, rng)
    }

    /// [`BasinGenesis::generate_basin`] drawing from the thread-local generator.
    pub fn storms_and_dates(&mut self, basin_name: &str) -> Result<GenesisSample, GenesisError> {
        self.generate_basin(basin_name, &mut rand::thread_rng())
    }

    /// Samples one year of storm genesis for an already resolved basin.
    pub fn sample_basin<R: Rng>(
        &mut self,
        basin: Basin,
        rng: &mut R,
    ) -> Result<GenesisSample, GenesisError> {
        let storm_count = self
            .counting
            .sample_storm_count(basin, self.resources.rates(), rng)?;
        let dates = self.dating.sample_genesis_dates(
            basin,
            storm_count,
            self.resources.months(),
            rng,
        )?;
        log::trace!("{basin}: generated {} storms", storm_count.get());
        Ok(GenesisSample::new(basin, storm_count, dates))
    }

    /// Samples the annual storm count for a raw basin index.
    pub fn storm_count<R: Rng>(
        &mut self,
        basin_index: usize,
        rng: &mut R,
    ) -> Result<StormCount, GenesisError> {
        let basin = Basin::from_index(basin_index)?;
        self.counting
            .sample_storm_count(basin, self.resources.rates(), rng)
    }

    /// Samples genesis dates for a raw basin index and a signed storm count.
    pub fn genesis_dates<R: Rng>(
        &self,
        basin_index: usize,
        storm_count: i64,
        rng: &mut R,
    ) -> Result<GenesisDates, GenesisError> {
        let basin = Basin::from_index(basin_index)?;
        let storm_count = StormCount::try_from(storm_count)?;
        self.dating
            .sample_genesis_dates(basin, storm_count, self.resources.months(), rng)
    }
}
