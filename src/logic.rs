// Pure functions: the size calculation and its helpers.
// Nothing here validates input or touches shared state; the form shell checks
// ranges before calling in.

use std::fmt;

use crate::constants::*;
use crate::types::*;

/// Body-mass index from height in centimeters and weight in kilograms.
pub fn bmi(height_cm: f64, weight_kg: f64) -> f64 {
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

/// First bucket whose upper bound exceeds `bmi`, or `fallback` if none does.
pub fn bucket_index(buckets: &[BmiBucket], bmi: f64, fallback: usize) -> usize {
    buckets
        .iter()
        .find(|bucket| bmi < bucket.max)
        .map(|bucket| bucket.index)
        .unwrap_or(fallback)
}

/// +1 for tall, -1 for short. The short check runs last and wins.
pub fn height_adjust(height_cm: f64) -> i32 {
    let mut adjust = 0;
    if height_cm >= TALL_HEIGHT_CM {
        adjust = 1;
    }
    if height_cm <= SHORT_HEIGHT_CM {
        adjust = -1;
    }
    adjust
}

/// Chosen position on a scale, plus the bracketing pair when the raw index
/// sits far enough from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub index: usize,
    pub range: Option<(usize, usize)>,
}

/// Round `index_float` half away from zero and clamp it into `0..len`.
/// Floor and ceiling are clamped the same way before a range is reported.
pub fn place_on_scale(index_float: f64, len: usize) -> Placement {
    let max = len.saturating_sub(1) as f64;
    let index = index_float.round().clamp(0.0, max) as usize;

    let mut range = None;
    if (index_float - index as f64).abs() > RANGE_THRESHOLD {
        let lower = index_float.floor().clamp(0.0, max) as usize;
        let upper = index_float.ceil().clamp(0.0, max) as usize;
        if lower != upper {
            range = Some((lower, upper));
        }
    }

    Placement { index, range }
}

/// Where a category reads its base index, which scale it lands on and which
/// table (if any) supplies A/B/C measurements.
#[derive(Debug, Clone, Copy)]
pub struct SizingStrategy<K: 'static> {
    pub buckets: &'static [BmiBucket],
    pub fallback_index: usize,
    pub scale: &'static [K],
    pub table: Option<&'static [MeasurementRow<K>]>,
}

/// Outcome of running a strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct Sizing {
    pub index: usize,
    pub label: String,
    pub range: Option<String>,
    pub measurements: Option<Measurements>,
}

impl<K: Copy + PartialEq + fmt::Display + 'static> SizingStrategy<K> {
    pub fn base_index(&self, bmi: f64) -> usize {
        bucket_index(self.buckets, bmi, self.fallback_index)
    }

    pub fn size(&self, bmi: f64, adjust: i32) -> Sizing {
        let index_float = self.base_index(bmi) as f64 + adjust as f64;
        let placement = place_on_scale(index_float, self.scale.len());
        let key = self.scale[placement.index];

        let range = placement
            .range
            .map(|(lower, upper)| format!("{} - {}", self.scale[lower], self.scale[upper]));
        let measurements = self
            .table
            .and_then(|table| table.iter().find(|row| row.size == key))
            .map(|row| row.measurements());

        Sizing {
            index: placement.index,
            label: key.to_string(),
            range,
            measurements,
        }
    }
}

/// Letter sizes for tops, numeric sizes for pants.
#[derive(Debug, Clone, Copy)]
pub enum Strategy {
    Letter(SizingStrategy<&'static str>),
    Numeric(SizingStrategy<u32>),
}

impl Strategy {
    pub fn size(&self, bmi: f64, adjust: i32) -> Sizing {
        match self {
            Strategy::Letter(s) => s.size(bmi, adjust),
            Strategy::Numeric(s) => s.size(bmi, adjust),
        }
    }

    pub fn scale_labels(&self) -> Vec<String> {
        match self {
            Strategy::Letter(s) => s.scale.iter().map(|l| l.to_string()).collect(),
            Strategy::Numeric(s) => s.scale.iter().map(|l| l.to_string()).collect(),
        }
    }

    /// Measurements recorded for `label`, if this strategy has a table.
    pub fn measurements_for(&self, label: &str) -> Option<Measurements> {
        match self {
            Strategy::Letter(s) => s
                .table?
                .iter()
                .find(|row| row.size == label)
                .map(|row| row.measurements()),
            Strategy::Numeric(s) => s
                .table?
                .iter()
                .find(|row| row.size.to_string() == label)
                .map(|row| row.measurements()),
        }
    }
}

const TOPS: SizingStrategy<&'static str> = SizingStrategy {
    buckets: TOP_BMI_BUCKETS,
    fallback_index: TOP_FALLBACK_INDEX,
    scale: TOP_SIZES,
    table: None,
};

/// Strategy for a category and cut. Cut is ignored where the category has no
/// cut variants.
pub fn strategy_for(category: Category, cut: Cut) -> Strategy {
    match (category, cut) {
        (Category::Pantalones, Cut::Regular) => Strategy::Numeric(SizingStrategy {
            buckets: PANT_BMI_BUCKETS,
            fallback_index: PANT_FALLBACK_INDEX,
            scale: PANT_SIZES_REGULAR,
            table: Some(PANT_TABLE_REGULAR),
        }),
        (Category::Pantalones, Cut::Slim) => Strategy::Numeric(SizingStrategy {
            buckets: PANT_BMI_BUCKETS,
            fallback_index: PANT_FALLBACK_INDEX,
            scale: PANT_SIZES_SLIM,
            table: Some(PANT_TABLE_SLIM),
        }),
        (Category::Camisas, Cut::Regular) => Strategy::Letter(SizingStrategy {
            table: Some(SHIRT_TABLE_REGULAR),
            ..TOPS
        }),
        (Category::Camisas, Cut::Slim) => Strategy::Letter(SizingStrategy {
            table: Some(SHIRT_TABLE_SLIM),
            ..TOPS
        }),
        _ => Strategy::Letter(TOPS),
    }
}

/// Combined height and fit shift applied to the base index.
pub fn total_adjust(height_cm: f64, fit: Fit) -> i32 {
    height_adjust(height_cm) + fit.adjust()
}

/// One decimal place, exact ties rounded up ("23.25" -> "23.3").
/// `{:.1}` alone would round those ties to even.
pub fn format_bmi(bmi: f64) -> String {
    // x.x5 is only exact when 4 * bmi is an odd integer
    let quarters = bmi * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 != 0.0 {
        return format!("{:.1}", (bmi * 10.0).ceil() / 10.0);
    }
    format!("{:.1}", bmi)
}

/// Summary line shown under the recommended size.
pub fn build_note(
    bmi: f64,
    height_cm: f64,
    weight_kg: f64,
    fit: Fit,
    category: Category,
    cut: Cut,
) -> String {
    let cut_label = if category.has_cut() {
        format!(" | {}", cut.note_label())
    } else {
        String::new()
    };
    format!(
        "IMC {} | altura {} cm | peso {} kg | fit {} | {}{}",
        format_bmi(bmi),
        height_cm,
        weight_kg,
        fit,
        category.display_name(),
        cut_label
    )
}

/// Recommend a size. Inputs are centimeters and kilograms, already validated.
pub fn compute_size(
    height_cm: f64,
    weight_kg: f64,
    fit: Fit,
    category: Category,
    cut: Cut,
) -> SizeResult {
    let bmi = bmi(height_cm, weight_kg);
    let sizing = strategy_for(category, cut).size(bmi, total_adjust(height_cm, fit));

    SizeResult {
        size: sizing.label,
        note: build_note(bmi, height_cm, weight_kg, fit, category, cut),
        range: sizing.range,
        measurements: sizing.measurements,
    }
}

/// `compute_size` over a request record.
pub fn compute(request: &SizeRequest) -> SizeResult {
    compute_size(
        request.height_cm,
        request.weight_kg,
        request.fit,
        request.category,
        request.cut,
    )
}

/// Position of the recommended size on the request's scale.
pub fn size_index(request: &SizeRequest) -> usize {
    let bmi = bmi(request.height_cm, request.weight_kg);
    strategy_for(request.category, request.cut)
        .size(bmi, total_adjust(request.height_cm, request.fit))
        .index
}
