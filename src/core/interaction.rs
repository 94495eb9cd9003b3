use super::math::Float;
use super::geometry::{Point3f, Normal3f, Vector3f};

/// The record of a ray hitting a surface.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct SurfaceInteraction {
    /// World space hit point.
    pub p: Point3f,
    /// Unit length surface normal at the hit point.
    pub n: Normal3f,
    /// Parametric distance along the ray.
    pub t_hit: Float,
    /// Barycentric coordinates of the hit for triangles, zero for spheres.
    pub uv: [Float; 2],
    /// Direction back towards the ray origin.
    pub wo: Vector3f,
    /// Index of the primitive in the scene's primitive list, filled in by the
    /// aggregate that performed the query.
    pub primitive: Option<usize>
}

impl SurfaceInteraction {
    pub fn new(p: Point3f, n: Normal3f, t_hit: Float, uv: [Float; 2], wo: Vector3f) -> SurfaceInteraction {
        SurfaceInteraction {
            p,
            n,
            t_hit,
            uv,
            wo,
            primitive: None
        }
    }

    /// True when the normal faces the side the ray arrived from.
    pub fn is_front_face(&self) -> bool {
        self.n.dot_vec(&self.wo) > 0.0
    }
}
