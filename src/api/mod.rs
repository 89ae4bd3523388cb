//! Remote analysis API — simulated in this build.

mod client;
mod types;

pub use client::{AnalysisApi, SimulatedClient};
pub use types::*;
