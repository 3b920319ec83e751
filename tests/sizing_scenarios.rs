// Integration tests: worked sizing examples and sweeps over the valid input grid.

use size_guide::constants::*;
use size_guide::invariants::check_invariants;
use size_guide::logic::{compute, compute_size, size_index};
use size_guide::types::*;

fn grid() -> impl Iterator<Item = SizeRequest> {
    (130..=220).step_by(5).flat_map(|h| {
        (35..=200).step_by(5).flat_map(move |w| {
            Category::ALL.into_iter().flat_map(move |category| {
                Cut::ALL.into_iter().flat_map(move |cut| {
                    Fit::ALL.into_iter().map(move |fit| SizeRequest {
                        height_cm: h as f64,
                        weight_kg: w as f64,
                        fit,
                        category,
                        cut,
                    })
                })
            })
        })
    })
}

#[test]
fn regular_shirt_example() {
    let r = compute_size(175.0, 72.0, Fit::Normal, Category::Camisas, Cut::Regular);
    assert_eq!(r.size, "L");
    assert_eq!(r.measurements, Some(Measurements { a: 68.0, b: 58.0, c: 74.0 }));
}

#[test]
fn tall_loose_tshirt_example() {
    let r = compute_size(190.0, 95.0, Fit::Holgado, Category::Camisetas, Cut::Regular);
    assert_eq!(r.size, "3XL");
    assert_eq!(r.measurements, None);
}

#[test]
fn slim_tight_pants_example() {
    let r = compute_size(165.0, 60.0, Fit::Ajustado, Category::Pantalones, Cut::Slim);
    assert_eq!(r.size, "40");
    assert_eq!(r.measurements, Some(Measurements { a: 40.0, b: 25.6, c: 105.5 }));
}

#[test]
fn short_regular_pants_example() {
    let r = compute_size(158.0, 50.0, Fit::Normal, Category::Pantalones, Cut::Regular);
    assert_eq!(r.size, "36");
    assert_eq!(r.range, None);
}

#[test]
fn every_grid_point_satisfies_invariants() {
    for request in grid() {
        let result = compute(&request);
        assert_eq!(check_invariants(&request, &result), Ok(()), "{}", request);
        assert_eq!(result, compute(&request), "non-deterministic for {}", request);
    }
}

#[test]
fn heavier_never_smaller() {
    for request in grid() {
        let heavier = SizeRequest {
            weight_kg: request.weight_kg + 5.0,
            ..request
        };
        assert!(size_index(&heavier) >= size_index(&request), "{}", request);
    }
}

#[test]
fn tighter_fit_never_larger() {
    for request in grid().filter(|r| r.fit == Fit::Normal) {
        let tight = size_index(&SizeRequest { fit: Fit::Ajustado, ..request });
        let normal = size_index(&request);
        let loose = size_index(&SizeRequest { fit: Fit::Holgado, ..request });
        assert!(tight <= normal && normal <= loose, "{}", request);
    }
}

#[test]
fn regular_shirts_take_measurements_from_table() {
    for request in grid().filter(|r| r.category == Category::Camisas && r.cut == Cut::Regular) {
        let result = compute(&request);
        let row = SHIRT_TABLE_REGULAR
            .iter()
            .find(|row| row.size == result.size)
            .expect("every shirt size has a table row");
        assert_eq!(result.measurements, Some(row.measurements()));
    }
}

#[test]
fn sweatshirts_have_no_measurements() {
    for request in grid().filter(|r| r.category == Category::Sudaderas) {
        assert_eq!(compute(&request).measurements, None);
    }
}

#[test]
fn ranges_never_reported_for_whole_indices() {
    // Fit and height shifts are whole steps, so the raw index is never fractional
    assert!(grid().all(|r| compute(&r).range.is_none()));
}
