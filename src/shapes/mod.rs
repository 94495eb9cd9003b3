mod sphere;
pub use sphere::*;
mod triangle;
pub use triangle::*;
