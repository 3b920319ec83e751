// Result invariants: properties every computed size must satisfy for its request.

use crate::logic::strategy_for;
use crate::types::*;

/// val sizeOnScale: the label is an entry of the request's size scale
pub fn size_on_scale(request: &SizeRequest, result: &SizeResult) -> bool {
    strategy_for(request.category, request.cut)
        .scale_labels()
        .contains(&result.size)
}

/// val rangeOrdered: both ends of a range are on the scale, lower first,
/// and the chosen size is one of them
pub fn range_ordered(request: &SizeRequest, result: &SizeResult) -> bool {
    let Some(range) = &result.range else {
        return true;
    };
    let labels = strategy_for(request.category, request.cut).scale_labels();
    let position = |label: &str| labels.iter().position(|l| l == label);

    match range.split_once(" - ") {
        Some((lower, upper)) => match (position(lower), position(upper)) {
            (Some(lo), Some(hi)) => lo < hi && (result.size == lower || result.size == upper),
            _ => false,
        },
        None => false,
    }
}

/// val measurementsOnlyForTables: only pants and shirts carry measurements
pub fn measurements_only_for_tables(request: &SizeRequest, result: &SizeResult) -> bool {
    if result.measurements.is_some() {
        request.category.has_cut()
    } else {
        true
    }
}

/// val measurementsMatchTable: attached measurements are the table row for the size
pub fn measurements_match_table(request: &SizeRequest, result: &SizeResult) -> bool {
    let expected = strategy_for(request.category, request.cut).measurements_for(&result.size);
    result.measurements == expected
}

/// val noteMentionsCategory: the note names the category, and the cut only where it applies
pub fn note_mentions_category(request: &SizeRequest, result: &SizeResult) -> bool {
    let names_category = result.note.contains(request.category.display_name());
    let names_cut = result.note.ends_with(request.cut.note_label());
    names_category && names_cut == request.category.has_cut()
}

/// All individual invariants with names for reporting.
pub const ALL_INVARIANTS: &[(&str, fn(&SizeRequest, &SizeResult) -> bool)] = &[
    ("sizeOnScale", size_on_scale),
    ("rangeOrdered", range_ordered),
    ("measurementsOnlyForTables", measurements_only_for_tables),
    ("measurementsMatchTable", measurements_match_table),
    ("noteMentionsCategory", note_mentions_category),
];

/// Check all invariants and return the name of the first violated one, if any.
pub fn check_invariants(request: &SizeRequest, result: &SizeResult) -> Result<(), &'static str> {
    for (name, check) in ALL_INVARIANTS {
        if !check(request, result) {
            return Err(*name);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::compute;

    fn shirt_request() -> SizeRequest {
        SizeRequest {
            height_cm: 175.0,
            weight_kg: 72.0,
            fit: Fit::Normal,
            category: Category::Camisas,
            cut: Cut::Regular,
        }
    }

    #[test]
    fn test_computed_result_passes() {
        let request = shirt_request();
        assert_eq!(check_invariants(&request, &compute(&request)), Ok(()));
    }

    #[test]
    fn test_size_off_scale_is_caught() {
        let request = shirt_request();
        let result = SizeResult {
            size: "4XL".to_string(),
            ..compute(&request)
        };
        assert_eq!(check_invariants(&request, &result), Err("sizeOnScale"));
    }

    #[test]
    fn test_reversed_range_is_caught() {
        let request = shirt_request();
        let result = SizeResult {
            range: Some("XL - L".to_string()),
            ..compute(&request)
        };
        assert!(!range_ordered(&request, &result));

        let result = SizeResult {
            range: Some("L - XL".to_string()),
            ..compute(&request)
        };
        assert!(range_ordered(&request, &result));
    }

    #[test]
    fn test_measurements_on_sweatshirt_are_caught() {
        let request = SizeRequest {
            category: Category::Sudaderas,
            ..shirt_request()
        };
        let result = SizeResult {
            measurements: Some(Measurements { a: 67.0, b: 56.0, c: 73.0 }),
            ..compute(&request)
        };
        assert_eq!(check_invariants(&request, &result), Err("measurementsOnlyForTables"));
    }

    #[test]
    fn test_wrong_table_row_is_caught() {
        let request = shirt_request();
        let result = SizeResult {
            measurements: Some(Measurements { a: 67.0, b: 56.0, c: 73.0 }),
            ..compute(&request)
        };
        assert!(!measurements_match_table(&request, &result));
    }
}
