// Domain layer: catalog, launch models and the ports implemented by adapters.

pub mod model;
pub mod ports;
