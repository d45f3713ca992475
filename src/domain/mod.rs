// Domain layer: the fixture's data model and the ports it talks through.

pub mod model;
pub mod ports;
