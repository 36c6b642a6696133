// Application layer: report rendering and the glue used by the binaries.

pub mod output;
#[cfg(feature = "cli")]
pub mod runner;
