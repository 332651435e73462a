//! Utility modules: sleep.

pub mod sleep;

pub use sleep::{Sleeper, TokioSleeper};
