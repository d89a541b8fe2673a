// Domain layer: lead model and the outbound port.

pub mod model;
pub mod ports;
