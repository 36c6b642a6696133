// Domain layer: document models, validation report and ports.

pub mod model;
pub mod ports;
pub mod report;
