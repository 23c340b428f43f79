// Domain layer: core models, schema constants and ports (interfaces).

pub mod model;
pub mod ports;
pub mod schema;
