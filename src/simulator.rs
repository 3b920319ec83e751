// Simulator: draws random valid requests and checks the calculator's properties.
// Each sample checks the result invariants plus determinism, monotonicity in
// weight and fit ordering against neighbouring requests.

use rand::Rng;

use crate::constants::*;
use crate::invariants;
use crate::logic;
use crate::types::*;

/// Largest weight step used when probing monotonicity (kg).
const MAX_WEIGHT_STEP: f64 = 20.0;

/// Draw a request from the valid input domain.
pub fn random_request(rng: &mut impl Rng) -> SizeRequest {
    SizeRequest {
        height_cm: rng.gen_range(MIN_HEIGHT_CM..=MAX_HEIGHT_CM),
        weight_kg: rng.gen_range(MIN_WEIGHT_KG..=MAX_WEIGHT_KG),
        fit: Fit::ALL[rng.gen_range(0..Fit::ALL.len())],
        category: Category::ALL[rng.gen_range(0..Category::ALL.len())],
        cut: Cut::ALL[rng.gen_range(0..Cut::ALL.len())],
    }
}

/// Same result on repeated calls.
pub fn deterministic(request: &SizeRequest) -> bool {
    logic::compute(request) == logic::compute(request)
}

/// A heavier request never lands on a smaller size.
pub fn monotonic_in_weight(request: &SizeRequest, heavier_kg: f64) -> bool {
    let heavier = SizeRequest {
        weight_kg: heavier_kg.max(request.weight_kg),
        ..*request
    };
    logic::size_index(&heavier) >= logic::size_index(request)
}

/// ajustado <= normal <= holgado on the same scale.
pub fn fit_ordered(request: &SizeRequest) -> bool {
    let index_for = |fit| logic::size_index(&SizeRequest { fit, ..*request });
    let tight = index_for(Fit::Ajustado);
    let normal = index_for(Fit::Normal);
    let loose = index_for(Fit::Holgado);
    tight <= normal && normal <= loose
}

/// Check one sample, returning the name of the first property that fails.
pub fn check_sample(request: &SizeRequest, rng: &mut impl Rng) -> Result<(), &'static str> {
    let result = logic::compute(request);
    invariants::check_invariants(request, &result)?;

    if !deterministic(request) {
        return Err("determinism");
    }
    let heavier_kg = (request.weight_kg + rng.gen_range(0.0..=MAX_WEIGHT_STEP)).min(MAX_WEIGHT_KG);
    if !monotonic_in_weight(request, heavier_kg) {
        return Err("monotonicInWeight");
    }
    if !fit_ordered(request) {
        return Err("fitOrdering");
    }
    Ok(())
}

/// Names of every property a sample is checked against, for reporting.
pub fn property_names() -> Vec<&'static str> {
    invariants::ALL_INVARIANTS
        .iter()
        .map(|(name, _)| *name)
        .chain(["determinism", "monotonicInWeight", "fitOrdering"])
        .collect()
}

/// Run `max_samples` random requests from a fixed seed.
pub fn run_simulation(max_samples: usize, seed: u64, verbose: bool) -> SimulationResult {
    use rand::SeedableRng;
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);

    let start = std::time::Instant::now();
    let mut violation = None;
    let mut checked = 0;

    for sample in 0..max_samples {
        let request = random_request(&mut rng);
        if verbose && sample < 10 {
            println!("[Sample {}] {}", sample, request);
            println!("{}\n", logic::compute(&request));
        }

        checked += 1;
        if let Err(property) = check_sample(&request, &mut rng) {
            tracing::warn!(property, sample, %request, "property violated");
            violation = Some(ViolationInfo {
                property,
                sample,
                request,
                result: logic::compute(&request),
            });
            break;
        }
    }

    let elapsed = start.elapsed();
    tracing::debug!(checked, ?elapsed, "simulation finished");

    SimulationResult {
        max_samples,
        checked,
        seed,
        elapsed,
        violation,
    }
}

pub struct ViolationInfo {
    pub property: &'static str,
    pub sample: usize,
    pub request: SizeRequest,
    pub result: SizeResult,
}

pub struct SimulationResult {
    pub max_samples: usize,
    pub checked: usize,
    pub seed: u64,
    pub elapsed: std::time::Duration,
    pub violation: Option<ViolationInfo>,
}

impl SimulationResult {
    pub fn passed(&self) -> bool {
        self.violation.is_none()
    }
}

impl std::fmt::Display for SimulationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let samples_per_sec = self.checked as f64 / self.elapsed.as_secs_f64();
        writeln!(f)?;
        match &self.violation {
            None => {
                writeln!(
                    f,
                    "[ok] No violation found ({:.0}ms at {:.0} samples/second).",
                    self.elapsed.as_millis(),
                    samples_per_sec,
                )?;
                writeln!(f, "Checked {} samples.", self.checked)?;
            }
            Some(v) => {
                writeln!(
                    f,
                    "[VIOLATION] Property '{}' violated at sample {} of {}.",
                    v.property, v.sample, self.max_samples,
                )?;
                writeln!(f, "Request: {}", v.request)?;
                writeln!(f, "Result:")?;
                writeln!(f, "{}", v.result)?;
            }
        }
        writeln!(f, "Seed: {} ", self.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_random_requests_stay_in_domain() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let r = random_request(&mut rng);
            assert!((MIN_HEIGHT_CM..=MAX_HEIGHT_CM).contains(&r.height_cm));
            assert!((MIN_WEIGHT_KG..=MAX_WEIGHT_KG).contains(&r.weight_kg));
        }
    }

    #[test]
    fn test_simulation_finds_no_violation() {
        let result = run_simulation(2000, 42, false);
        assert!(result.passed(), "{}", result);
        assert_eq!(result.checked, 2000);
    }

    #[test]
    fn test_fit_ordering_at_clamp_edges() {
        let request = SizeRequest {
            height_cm: 130.0,
            weight_kg: 35.0,
            fit: Fit::Normal,
            category: Category::Pantalones,
            cut: Cut::Slim,
        };
        assert!(fit_ordered(&request));
        assert!(monotonic_in_weight(&request, MAX_WEIGHT_KG));
    }

    #[test]
    fn test_property_names_cover_invariants() {
        let names = property_names();
        assert_eq!(names.len(), invariants::ALL_INVARIANTS.len() + 3);
        assert!(names.contains(&"fitOrdering"));
    }
}
