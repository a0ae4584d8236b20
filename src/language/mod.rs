// Types representing StepMania step charts

mod error;
mod format;
mod types;

// Re-export all public symbols
pub use error::*;
pub use format::*;
pub use types::*;
