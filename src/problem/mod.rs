// Turning parse and validation errors into messages for the terminal

mod format;
mod messages;

// Re-export all public symbols
pub use format::*;
