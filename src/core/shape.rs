use super::math::Float;
use super::geometry::{Bounds3f, Point3f, Ray};
use super::interaction::SurfaceInteraction;
use super::mesh::TriangleMesh;

/// Interface for Shape objects.
///
/// Shapes that reference shared vertex data resolve it through the mesh arena
/// passed to each call; shapes that carry their own data ignore it.
pub trait Shape: Send + Sync {
    /// Returns the bounding box in world coordinates.
    fn world_bound(&self, meshes: &[TriangleMesh]) -> Bounds3f;

    /// Representative point used to sort the shape into the hierarchy.
    fn centroid(&self, meshes: &[TriangleMesh]) -> Point3f;

    /// Returns the surface area of the Shape.
    fn area(&self, meshes: &[TriangleMesh]) -> Float;

    /// Calculates if a Ray intersects this Shape within `[RAY_EPSILON, ray.t_max]`.
    /// On a hit `ray.t_max` is narrowed to the hit distance; on a miss the ray is
    /// left untouched.
    fn intersect(&self, meshes: &[TriangleMesh], ray: &mut Ray) -> Option<SurfaceInteraction>;

    /// A predicate Ray intersection test. The default implementation runs
    /// intersect on a copy of the ray.
    fn intersect_p(&self, meshes: &[TriangleMesh], ray: &Ray) -> bool {
        let mut r = *ray;
        self.intersect(meshes, &mut r).is_some()
    }
}
