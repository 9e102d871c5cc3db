// Domain layer: station records, rule tables and ports. No I/O here.

pub mod model;
pub mod ports;
pub mod rules;
pub mod schedule;
