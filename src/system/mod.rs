//! Process-level concerns
//!
//! Logging setup lives here; lifecycle and execution modes are in `runtime`.

pub mod logging;

pub use logging::init_logging;
