// Domain layer: table and evaluation models plus the ports the pipeline is built on.

pub mod model;
pub mod ports;
