#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that samples when each storm of a basin-year forms.

use rand::{seq::SliceRandom, Rng};
use storm_genesis_core::{
    Basin, GenesisDate, GenesisDates, GenesisError, Month, StormCount, GENESIS_HOURS,
};
use storm_genesis_tables::GenesisMonthTable;

/// Samples genesis month, day and hour for every storm of a basin-year.
///
/// Each storm draws independently: the month uniformly from the basin's
/// empirical month list, the day uniformly within that month of a non-leap
/// year, and the hour uniformly from the 3-hour synoptic grid.
#[derive(Debug, Default)]
pub struct DateSampling;

impl DateSampling {
    /// Creates a new date sampler.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Draws genesis times for `storm_count` storms forming in `basin`.
    ///
    /// A zero count yields an empty set. A basin without observed months is
    /// reported as [`GenesisError::InvalidBasin`].
    pub fn sample_genesis_dates<R: Rng>(
        &self,
        basin: Basin,
        storm_count: StormCount,
        months: &GenesisMonthTable,
        rng: &mut R,
    ) -> Result<GenesisDates, GenesisError> {
        let observed = months.months(basin);
        let mut dates = GenesisDates::with_capacity(storm_count.as_usize());

        for _ in 0..storm_count.get() {
            let Some(date) = sample_date(observed, rng) else {
                return Err(GenesisError::InvalidBasin {
                    index: basin.index(),
                    reason: "no genesis months observed".to_owned(),
                });
            };
            dates.push(date);
        }

        log::trace!("{basin}: sampled genesis dates for {} storms", dates.len());
        Ok(dates)
    }
}

fn sample_date<R: Rng>(observed: &[Month], rng: &mut R) -> Option<GenesisDate> {
    let month = *observed.choose(rng)?;
    let day = rng.gen_range(1..=month.days());
    let hour = *GENESIS_HOURS.choose(rng)?;
    Some(GenesisDate { month, day, hour })
}
