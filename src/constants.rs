// Constants: size scales, BMI thresholds, measurement tables and input limits.

use crate::types::{BmiBucket, MeasurementRow};

// Size scales
pub const TOP_SIZES: &[&str] = &["S", "M", "L", "XL", "2XL", "3XL"];
pub const PANT_SIZES_REGULAR: &[u32] = &[36, 38, 40, 42, 44, 46, 48, 50];
pub const PANT_SIZES_SLIM: &[u32] = &[38, 40, 42, 44, 46, 48, 50, 52];

/// BMI buckets for tops. Searched in order; the last bound is open.
pub const TOP_BMI_BUCKETS: &[BmiBucket] = &[
    BmiBucket { max: 19.0, index: 0 },
    BmiBucket { max: 22.0, index: 1 },
    BmiBucket { max: 25.0, index: 2 },
    BmiBucket { max: 28.0, index: 3 },
    BmiBucket { max: 31.0, index: 4 },
    BmiBucket { max: f64::INFINITY, index: 5 },
];

/// BMI buckets for pants.
pub const PANT_BMI_BUCKETS: &[BmiBucket] = &[
    BmiBucket { max: 20.0, index: 0 },
    BmiBucket { max: 21.5, index: 1 },
    BmiBucket { max: 23.0, index: 2 },
    BmiBucket { max: 24.5, index: 3 },
    BmiBucket { max: 26.0, index: 4 },
    BmiBucket { max: 28.0, index: 5 },
    BmiBucket { max: 30.0, index: 6 },
    BmiBucket { max: f64::INFINITY, index: 7 },
];

// Never reached while the last bucket is unbounded.
pub const TOP_FALLBACK_INDEX: usize = 5;
pub const PANT_FALLBACK_INDEX: usize = 7;

// Height adjustment thresholds (cm)
pub const TALL_HEIGHT_CM: f64 = 185.0;
pub const SHORT_HEIGHT_CM: f64 = 160.0;

/// Minimum distance from the chosen index before a range is reported.
pub const RANGE_THRESHOLD: f64 = 0.35;

// Measurement tables, A/B/C in cm.
// Pants: A waist width, B rise, C total length.
pub const PANT_TABLE_REGULAR: &[MeasurementRow<u32>] = &[
    MeasurementRow { size: 36, a: 38.0, b: 25.7, c: 107.5 },
    MeasurementRow { size: 38, a: 40.0, b: 26.1, c: 108.0 },
    MeasurementRow { size: 40, a: 42.0, b: 26.5, c: 108.5 },
    MeasurementRow { size: 42, a: 44.0, b: 26.9, c: 109.0 },
    MeasurementRow { size: 44, a: 46.0, b: 26.4, c: 109.5 },
    MeasurementRow { size: 46, a: 48.0, b: 27.3, c: 110.0 },
    MeasurementRow { size: 48, a: 50.0, b: 27.7, c: 110.5 },
    MeasurementRow { size: 50, a: 52.0, b: 28.1, c: 111.0 },
];

pub const PANT_TABLE_SLIM: &[MeasurementRow<u32>] = &[
    MeasurementRow { size: 38, a: 38.0, b: 25.2, c: 105.0 },
    MeasurementRow { size: 40, a: 40.0, b: 25.6, c: 105.5 },
    MeasurementRow { size: 42, a: 42.0, b: 26.0, c: 106.0 },
    MeasurementRow { size: 44, a: 44.0, b: 26.4, c: 106.5 },
    MeasurementRow { size: 46, a: 46.0, b: 26.8, c: 107.0 },
    MeasurementRow { size: 48, a: 48.0, b: 27.2, c: 107.5 },
    MeasurementRow { size: 50, a: 50.0, b: 27.6, c: 108.0 },
    MeasurementRow { size: 52, a: 52.0, b: 29.0, c: 108.5 },
];

// Shirts: A sleeve length, B chest width, C total length.
pub const SHIRT_TABLE_REGULAR: &[MeasurementRow<&str>] = &[
    MeasurementRow { size: "S", a: 66.0, b: 54.0, c: 72.0 },
    MeasurementRow { size: "M", a: 67.0, b: 56.0, c: 73.0 },
    MeasurementRow { size: "L", a: 68.0, b: 58.0, c: 74.0 },
    MeasurementRow { size: "XL", a: 69.0, b: 60.0, c: 75.0 },
    MeasurementRow { size: "2XL", a: 70.0, b: 62.0, c: 76.0 },
    MeasurementRow { size: "3XL", a: 71.0, b: 64.0, c: 77.0 },
];

pub const SHIRT_TABLE_SLIM: &[MeasurementRow<&str>] = &[
    MeasurementRow { size: "S", a: 65.0, b: 47.0, c: 70.0 },
    MeasurementRow { size: "M", a: 66.0, b: 52.0, c: 72.0 },
    MeasurementRow { size: "L", a: 67.0, b: 54.0, c: 75.0 },
    MeasurementRow { size: "XL", a: 68.0, b: 57.0, c: 77.0 },
    MeasurementRow { size: "2XL", a: 69.0, b: 61.0, c: 79.0 },
    MeasurementRow { size: "3XL", a: 70.0, b: 65.0, c: 81.0 },
];

// Form limits checked by the shell before calling the calculator
pub const MIN_HEIGHT_CM: f64 = 130.0;
pub const MAX_HEIGHT_CM: f64 = 220.0;
pub const MIN_WEIGHT_KG: f64 = 35.0;
pub const MAX_WEIGHT_KG: f64 = 200.0;
pub const MIN_AGE: i32 = 12;
pub const MAX_AGE: i32 = 80;

// Birth-year selector spans current year - 14 down to current year - 80
pub const YOUNGEST_LISTED_AGE: i32 = 14;
pub const OLDEST_LISTED_AGE: i32 = 80;

// Unit conversion
pub const CM_PER_INCH: f64 = 2.54;
pub const KG_PER_POUND: f64 = 0.453592;

// Progress indicator timing (ms)
pub const PROGRESS_DURATION_MS: u64 = 3000;
pub const PROGRESS_TICK_MS: u64 = 60;
