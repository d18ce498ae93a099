// Domain layer: factor line model and ports (interfaces).

pub mod model;
pub mod ports;
