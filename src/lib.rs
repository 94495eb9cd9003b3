//! Bounding volume hierarchy and ray intersection core for an offline ray tracer.

#[macro_use]
extern crate log;

#[macro_use]
extern crate lazy_static;

pub mod core;
pub mod shapes;
pub mod accelerators;
