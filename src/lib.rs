//! Reader and checker for StepMania step chart files (`.sm` and `.ssc`).

#[macro_use]
pub mod regex;

pub mod language;
pub mod parsing;
pub mod validation;
