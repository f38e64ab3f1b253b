#![warn(clippy::pedantic)]

pub mod cases;
pub mod synth;

pub use cases::{CaseOutcome, Expect, RegressionCase, regression_cases, run_case, write_case};
pub use synth::SyntheticHeader;
