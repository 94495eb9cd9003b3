use crate::core::math::{Float, consts::{PI, RAY_EPSILON}, quadratic_half_b};
use crate::core::shape::Shape;
use crate::core::geometry::{Bounds3f, Ray, Point3f, Normal3f, Vector3f};
use crate::core::interaction::SurfaceInteraction;
use crate::core::mesh::TriangleMesh;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Sphere {
    pub center: Point3f,
    pub radius: Float
}

impl Sphere {
    pub fn new(center: Point3f, radius: Float) -> Sphere {
        Sphere { center, radius }
    }

    #[inline]
    fn is_degenerate(&self) -> bool {
        !(self.radius > 0.0) || !self.radius.is_finite()
    }
}

impl Shape for Sphere {
    fn world_bound(&self, _meshes: &[TriangleMesh]) -> Bounds3f {
        let r = Vector3f::new(self.radius, self.radius, self.radius).abs();
        Bounds3f::new(self.center - r, self.center + r)
    }

    fn centroid(&self, _meshes: &[TriangleMesh]) -> Point3f {
        self.center
    }

    fn area(&self, _meshes: &[TriangleMesh]) -> Float {
        4.0 * PI * self.radius * self.radius
    }

    fn intersect(&self, _meshes: &[TriangleMesh], ray: &mut Ray) -> Option<SurfaceInteraction> {
        if self.is_degenerate() {
            return None;
        }
        let oc = ray.origin() - self.center;
        let d = ray.direction();
        let a = d.length_squared();
        let half_b = oc.dot(&d);
        let c = oc.length_squared() - self.radius * self.radius;
        let (t0, t1) = quadratic_half_b(a, half_b, c)?;

        // check quadric shape _t0_ and _t1_ for nearest intersection
        if !(t0 <= ray.t_max) {
            return None;
        }
        let mut t_hit = t0;
        if t_hit < RAY_EPSILON {
            t_hit = t1;
            if !(t_hit >= RAY_EPSILON && t_hit <= ray.t_max) {
                return None;
            }
        }

        let p = ray.point_at_time(t_hit);
        let n = Normal3f::from((p - self.center).normalize());
        ray.t_max = t_hit;
        Some(SurfaceInteraction::new(p, n, t_hit, [0.0, 0.0], -d))
    }
}
