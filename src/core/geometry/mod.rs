#[macro_use]
mod macros;

pub mod vector3;
pub use vector3::*;
pub mod point3;
pub use point3::*;
pub mod normal3;
pub use normal3::*;
pub mod ray;
pub use ray::*;
pub mod bounds3;
pub use bounds3::*;
