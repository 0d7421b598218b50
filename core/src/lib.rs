#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the storm genesis samplers.
//!
//! This crate defines the basin registry, the value types that flow between
//! the table loaders and the pure sampling systems, and the single error
//! taxonomy every crate in the workspace reports through. Nothing here draws
//! random numbers or touches storage.

use std::{fmt, path::PathBuf, str::FromStr};

use serde::{Deserialize, Serialize};

/// Number of ocean basins known to the registry.
pub const BASIN_COUNT: usize = 6;

/// Days per calendar month, January first. Leap years are never modelled.
pub const MONTH_LENGTHS: [u8; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Synoptic hours a storm may form at, on a fixed 3-hour grid.
pub const GENESIS_HOURS: [u8; 8] = [0, 3, 6, 9, 12, 15, 18, 21];

/// Ocean basins in which tropical cyclones are generated.
///
/// The discriminant is the basin index used by every external table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Basin {
    /// Eastern Pacific.
    #[serde(rename = "EP")]
    EasternPacific = 0,
    /// North Atlantic.
    #[serde(rename = "NA")]
    NorthAtlantic = 1,
    /// North Indian.
    #[serde(rename = "NI")]
    NorthIndian = 2,
    /// South Indian.
    #[serde(rename = "SI")]
    SouthIndian = 3,
    /// South Pacific.
    #[serde(rename = "SP")]
    SouthPacific = 4,
    /// Western Pacific.
    #[serde(rename = "WP")]
    WesternPacific = 5,
}

// Basin boxes follow the IBTrACS definitions with the latitude limits pushed to
// the poles. The EP/NA split is resolved later by track generation, so the two
// boxes overlap on purpose. Longitudes are basin-local and may exceed 360.
const BOUNDING_BOXES: [BasinBoundingBox; BASIN_COUNT] = [
    BasinBoundingBox::new(5.0, 90.0, 180.0, 285.0),
    BasinBoundingBox::new(5.0, 90.0, 255.0, 390.0),
    BasinBoundingBox::new(5.0, 90.0, 30.0, 100.0),
    BasinBoundingBox::new(-90.0, -5.0, 10.0, 105.0),
    BasinBoundingBox::new(-90.0, -5.0, 105.0, 240.0),
    BasinBoundingBox::new(5.0, 90.0, 100.0, 180.0),
];

impl Basin {
    /// Every basin in index order.
    pub const ALL: [Basin; BASIN_COUNT] = [
        Basin::EasternPacific,
        Basin::NorthAtlantic,
        Basin::NorthIndian,
        Basin::SouthIndian,
        Basin::SouthPacific,
        Basin::WesternPacific,
    ];

    /// Resolves a basin from its table index.
    pub fn from_index(index: usize) -> Result<Self, GenesisError> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or_else(|| GenesisError::InvalidBasin {
                index,
                reason: format!("index must be below {BASIN_COUNT}"),
            })
    }

    /// Resolves a basin from its two-letter code (`"EP"`, `"NA"`, ...).
    pub fn from_code(code: &str) -> Result<Self, GenesisError> {
        Self::ALL
            .into_iter()
            .find(|basin| basin.code() == code)
            .ok_or_else(|| GenesisError::UnknownBasinName {
                name: code.to_owned(),
            })
    }

    /// Index of the basin within the external tables.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Two-letter code identifying the basin.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Basin::EasternPacific => "EP",
            Basin::NorthAtlantic => "NA",
            Basin::NorthIndian => "NI",
            Basin::SouthIndian => "SI",
            Basin::SouthPacific => "SP",
            Basin::WesternPacific => "WP",
        }
    }

    /// Human readable basin name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Basin::EasternPacific => "Eastern Pacific",
            Basin::NorthAtlantic => "North Atlantic",
            Basin::NorthIndian => "North Indian",
            Basin::SouthIndian => "South Indian",
            Basin::SouthPacific => "South Pacific",
            Basin::WesternPacific => "Western Pacific",
        }
    }

    /// Geographic box enclosing the basin.
    #[must_use]
    pub const fn bounding_box(self) -> BasinBoundingBox {
        BOUNDING_BOXES[self.index()]
    }
}

impl fmt::Display for Basin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Basin {
    type Err = GenesisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s)
    }
}

/// Maps a two-letter basin code onto its table index.
pub fn index_of(basin_name: &str) -> Result<usize, GenesisError> {
    Basin::from_code(basin_name).map(Basin::index)
}

/// Looks up the bounding box for a raw basin index.
pub fn bounding_box(basin_index: usize) -> Result<BasinBoundingBox, GenesisError> {
    Basin::from_index(basin_index).map(Basin::bounding_box)
}

/// Latitude/longitude box in degrees describing where a basin's storms form.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BasinBoundingBox {
    lat_south: f64,
    lat_north: f64,
    lon_west: f64,
    lon_east: f64,
}

impl BasinBoundingBox {
    /// Creates a bounding box from its four edges.
    #[must_use]
    pub const fn new(lat_south: f64, lat_north: f64, lon_west: f64, lon_east: f64) -> Self {
        Self {
            lat_south,
            lat_north,
            lon_west,
            lon_east,
        }
    }

    /// Southern latitude edge.
    #[must_use]
    pub const fn lat_south(&self) -> f64 {
        self.lat_south
    }

    /// Northern latitude edge.
    #[must_use]
    pub const fn lat_north(&self) -> f64 {
        self.lat_north
    }

    /// Western longitude edge.
    #[must_use]
    pub const fn lon_west(&self) -> f64 {
        self.lon_west
    }

    /// Eastern longitude edge. May exceed 360 for basins spanning the meridian.
    #[must_use]
    pub const fn lon_east(&self) -> f64 {
        self.lon_east
    }

    /// Edges as `(lat_south, lat_north, lon_west, lon_east)`.
    #[must_use]
    pub const fn as_tuple(&self) -> (f64, f64, f64, f64) {
        (self.lat_south, self.lat_north, self.lon_west, self.lon_east)
    }
}

/// Calendar month, 1 (January) through 12 (December).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Month(u8);

impl Month {
    /// Creates a month, returning `None` outside 1..=12.
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value >= 1 && value <= 12 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Retrieves the month number.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Number of days in the month for a non-leap year.
    #[must_use]
    pub const fn days(self) -> u8 {
        MONTH_LENGTHS[(self.0 - 1) as usize]
    }
}

impl TryFrom<u8> for Month {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Month::new(value).ok_or_else(|| format!("month {value} outside 1..=12"))
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.get()
    }
}

/// Number of storms forming in a basin during one sampled year.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct StormCount(u32);

impl StormCount {
    /// No storms.
    pub const ZERO: StormCount = StormCount(0);

    /// Creates a storm count.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the count.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Count as a collection length.
    #[must_use]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<i64> for StormCount {
    type Error = GenesisError;

    fn try_from(count: i64) -> Result<Self, Self::Error> {
        u32::try_from(count)
            .map(Self)
            .map_err(|_| GenesisError::InvalidCount { count })
    }
}

/// Formation time of a single storm.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GenesisDate {
    /// Genesis month.
    pub month: Month,
    /// Day of the month, 1-based.
    pub day: u8,
    /// Hour of day on the 3-hour grid.
    pub hour: u8,
}

/// Genesis months, days and hours stored column-wise, one entry per storm.
///
/// Entries are only appended as complete triples, so the three columns always
/// share the same length.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisDates {
    months: Vec<u8>,
    days: Vec<u8>,
    hours: Vec<u8>,
}

impl GenesisDates {
    /// Creates an empty set with room for `capacity` storms.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            months: Vec::with_capacity(capacity),
            days: Vec::with_capacity(capacity),
            hours: Vec::with_capacity(capacity),
        }
    }

    /// Appends the genesis time of one storm.
    pub fn push(&mut self, date: GenesisDate) {
        self.months.push(date.month.get());
        self.days.push(date.day);
        self.hours.push(date.hour);
    }

    /// Number of storms recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.months.len()
    }

    /// Whether no storms were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    /// Genesis months, one per storm.
    #[must_use]
    pub fn months(&self) -> &[u8] {
        &self.months
    }

    /// Genesis days, one per storm.
    #[must_use]
    pub fn days(&self) -> &[u8] {
        &self.days
    }

    /// Genesis hours, one per storm.
    #[must_use]
    pub fn hours(&self) -> &[u8] {
        &self.hours
    }

    /// Splits the set into its `(months, days, hours)` columns.
    #[must_use]
    pub fn into_columns(self) -> (Vec<u8>, Vec<u8>, Vec<u8>) {
        (self.months, self.days, self.hours)
    }
}

/// Storm count and genesis times sampled for one basin-year.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisSample {
    basin: Basin,
    storm_count: StormCount,
    #[serde(flatten)]
    dates: GenesisDates,
}

impl GenesisSample {
    /// Bundles a storm count with its genesis dates.
    ///
    /// The date set must hold exactly one entry per storm.
    #[must_use]
    pub fn new(basin: Basin, storm_count: StormCount, dates: GenesisDates) -> Self {
        debug_assert_eq!(
            storm_count.as_usize(),
            dates.len(),
            "genesis dates must match the storm count"
        );
        Self {
            basin,
            storm_count,
            dates,
        }
    }

    /// Basin the sample was drawn for.
    #[must_use]
    pub const fn basin(&self) -> Basin {
        self.basin
    }

    /// Index of the basin the sample was drawn for.
    #[must_use]
    pub const fn basin_index(&self) -> usize {
        self.basin.index()
    }

    /// Number of storms in the sampled year.
    #[must_use]
    pub const fn storm_count(&self) -> StormCount {
        self.storm_count
    }

    /// Genesis times of every storm.
    #[must_use]
    pub const fn dates(&self) -> &GenesisDates {
        &self.dates
    }

    /// Genesis months, one per storm.
    #[must_use]
    pub fn months(&self) -> &[u8] {
        self.dates.months()
    }

    /// Genesis days, one per storm.
    #[must_use]
    pub fn days(&self) -> &[u8] {
        self.dates.days()
    }

    /// Genesis hours, one per storm.
    #[must_use]
    pub fn hours(&self) -> &[u8] {
        self.dates.hours()
    }
}

/// Errors reported while resolving basins, loading tables or sampling.
#[derive(Debug, thiserror::Error)]
pub enum GenesisError {
    /// The basin name is not one of the six recognised codes.
    #[error("unknown basin name `{name}`; expected one of EP, NA, NI, SI, SP, WP")]
    UnknownBasinName {
        /// Name supplied by the caller.
        name: String,
    },

    /// The basin index is unsupported or its table entry is unusable.
    #[error("invalid basin index {index}: {reason}")]
    InvalidBasin {
        /// Offending basin index.
        index: usize,
        /// Why the basin cannot be sampled.
        reason: String,
    },

    /// A negative storm count was requested.
    #[error("invalid storm count {count}; counts must be non-negative")]
    InvalidCount {
        /// Requested count.
        count: i64,
    },

    /// An external table could not be read or was malformed.
    #[error("failed to load genesis table {}: {source}", .path.display())]
    ResourceLoad {
        /// Location of the table.
        path: PathBuf,
        /// Underlying cause.
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
