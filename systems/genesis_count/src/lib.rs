#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that samples the annual number of storms forming in a basin.

use std::num::NonZeroUsize;

use rand::Rng;
use rand_distr::{Distribution, Poisson};
use storm_genesis_core::{Basin, GenesisError, StormCount};
use storm_genesis_tables::GenesisRateTable;

/// Batch size used by the batched strategy unless configured otherwise.
pub const DEFAULT_BATCH_SIZE: NonZeroUsize = match NonZeroUsize::new(10_000) {
    Some(size) => size,
    None => panic!("batch size must be non-zero"),
};

/// How a storm count is drawn from the basin's Poisson distribution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CountStrategy {
    /// Single Poisson draw.
    Direct,
    /// Draws `batch_size` Poisson samples and returns one chosen uniformly.
    ///
    /// The marginal distribution matches [`CountStrategy::Direct`]; the batch
    /// reproduces the random stream layout of the reference statistics.
    Batched {
        /// Number of Poisson samples drawn per call.
        batch_size: NonZeroUsize,
    },
}

impl Default for CountStrategy {
    fn default() -> Self {
        Self::Batched {
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

/// Configuration parameters required to construct the count sampler.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Config {
    strategy: CountStrategy,
}

impl Config {
    /// Creates a configuration using the provided draw strategy.
    #[must_use]
    pub const fn new(strategy: CountStrategy) -> Self {
        Self { strategy }
    }

    /// Strategy used to draw counts.
    #[must_use]
    pub const fn strategy(&self) -> CountStrategy {
        self.strategy
    }
}

/// Samples storm counts from per-basin Poisson genesis rates.
#[derive(Debug, Default)]
pub struct CountSampling {
    strategy: CountStrategy,
    batch: Vec<u32>,
}

impl CountSampling {
    /// Creates a new count sampler using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            strategy: config.strategy,
            batch: Vec::new(),
        }
    }

    /// Strategy the sampler draws with.
    #[must_use]
    pub fn strategy(&self) -> CountStrategy {
        self.strategy
    }

    /// Draws the number of storms forming in `basin` during one year.
    ///
    /// A zero rate always yields zero storms. Rates the Poisson distribution
    /// rejects are reported as [`GenesisError::InvalidBasin`].
    pub fn sample_storm_count<R: Rng>(
        &mut self,
        basin: Basin,
        rates: &GenesisRateTable,
        rng: &mut R,
    ) -> Result<StormCount, GenesisError> {
        let rate = rates.rate(basin);
        if rate == 0.0 {
            log::debug!("{basin} has a zero genesis rate; sampling no storms");
            return Ok(StormCount::ZERO);
        }

        let poisson = Poisson::new(rate).map_err(|err| GenesisError::InvalidBasin {
            index: basin.index(),
            reason: format!("genesis rate {rate} is unusable: {err}"),
        })?;

        let count = match self.strategy {
            CountStrategy::Direct => to_count(poisson.sample(rng)),
            CountStrategy::Batched { batch_size } => {
                self.fill_batch(&poisson, batch_size, rng);
                self.batch[rng.gen_range(0..self.batch.len())]
            }
        };

        log::trace!("{basin}: sampled {count} storms from rate {rate}");
        Ok(StormCount::new(count))
    }

    fn fill_batch<R: Rng>(
        &mut self,
        poisson: &Poisson<f64>,
        batch_size: NonZeroUsize,
        rng: &mut R,
    ) {
        self.batch.clear();
        self.batch.reserve(batch_size.get());
        self.batch
            .extend((0..batch_size.get()).map(|_| to_count(poisson.sample(rng))));
    }
}

fn to_count(draw: f64) -> u32 {
    if draw <= 0.0 {
        return 0;
    }
    draw.round().min(f64::from(u32::MAX)) as u32
}
