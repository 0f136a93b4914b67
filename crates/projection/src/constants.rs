//! Baked reference data: tide-gauge anchors, life expectancy and the reference point.
//!
//! The reference point must be bumped once a year (source: NOAA/UHSLC global tide
//! gauge average). The last historical anchor must stay equal to it.

/// Calendar year of the most recent measured sea level.
pub const REFERENCE_YEAR: i32 = 2025;

/// Sea level at `REFERENCE_YEAR`, in millimeters above the 1900 baseline.
pub const REFERENCE_HEIGHT_MM: f64 = 240.0;

/// Observed rate of rise at `REFERENCE_YEAR` (mm/year).
pub const CURRENT_RATE_MM_PER_YEAR: f64 = 4.5;

/// Baseline year. Heights at or before it are 0.
pub const MIN_YEAR: i32 = 1900;

/// Earliest birth year a person may carry.
pub const MIN_BIRTH_YEAR: i32 = 1900;

/// Latest birth year a person may carry (future children/grandchildren).
pub const MAX_BIRTH_YEAR: i32 = 2035;

/// Latest projection horizon a living person may be given.
pub const MAX_HORIZON_YEAR: i32 = 2125;

/// Lifespan assumed for a person created as (or re-dated while) deceased.
pub const DECEASED_DEFAULT_SPAN: i32 = 70;

/// Horizon (years after the reference year) at which scenario totals are quoted.
pub const SCENARIO_HORIZON_YEARS: i32 = 75;

/// Church & White (2011), CSIRO/UHSLC, NOAA satellite altimetry since 1993.
/// (year, mm above 1900)
pub const HISTORICAL_ANCHORS: &[(i32, f64)] = &[
    (1900, 0.0),
    (1910, 3.0),
    (1920, 19.0),
    (1930, 23.0),
    (1940, 37.0),
    (1950, 62.0),
    (1960, 85.0),
    (1970, 89.0),
    (1980, 113.0),
    (1990, 129.0),
    (1993, 131.0),
    (2000, 150.0),
    (2005, 162.0),
    (2010, 189.0),
    (2015, 205.0),
    (2020, 218.0),
    (2025, 240.0),
];

/// Decennial life expectancy at birth. (birth year, years)
pub const LIFE_EXPECTANCY_ANCHORS: &[(i32, i32)] = &[
    (1900, 55),
    (1910, 58),
    (1920, 62),
    (1930, 66),
    (1940, 70),
    (1950, 74),
    (1960, 78),
    (1970, 81),
    (1980, 83),
    (1990, 85),
    (2000, 87),
    (2010, 89),
];
