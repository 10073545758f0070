// Domain layer: value types and ports. No process or filesystem access here.

pub mod model;
pub mod ports;
