// Size guide: recommends a clothing size from height, weight, fit preference,
// garment category and cut.

pub mod constants;
pub mod invariants;
pub mod logic;
pub mod session;
pub mod shell;
pub mod simulator;
pub mod types;

pub use logic::{compute, compute_size};
pub use shell::{submit, FormError, FormState};
pub use types::{Category, Cut, Fit, Measurements, SizeRequest, SizeResult};
