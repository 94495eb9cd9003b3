pub mod math;
pub mod geometry;
pub mod error;
pub mod options;
pub mod rng;
pub mod stats_accumulator;
pub mod utils;
pub mod interaction;
pub mod shape;
pub mod mesh;
pub mod primitive;
pub mod scene;
