pub mod bvh;
pub use bvh::BVHAccel;
