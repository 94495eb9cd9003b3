use crate::core::math::{Float, consts::RAY_EPSILON};
use crate::core::shape::Shape;
use crate::core::geometry::{Bounds3f, Ray, Point3f, Normal3f, Vector3f};
use crate::core::interaction::SurfaceInteraction;
use crate::core::mesh::{MeshId, TriangleMesh, Vertex};

/// One face of a mesh in the scene's mesh arena.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Triangle {
    pub mesh: MeshId,
    pub index: u32
}

impl Triangle {
    pub fn new(mesh: MeshId, index: u32) -> Triangle {
        Triangle { mesh, index }
    }

    #[inline]
    fn vertices<'a>(&self, meshes: &'a [TriangleMesh]) -> [&'a Vertex; 3] {
        meshes[self.mesh.0 as usize].triangle(self.index as usize)
    }
}

impl Shape for Triangle {
    fn world_bound(&self, meshes: &[TriangleMesh]) -> Bounds3f {
        let [v0, v1, v2] = self.vertices(meshes);
        let mut b = Bounds3f::from_point(v0.p);
        b.grow_by(&v1.p);
        b.grow_by(&v2.p);
        b
    }

    fn centroid(&self, meshes: &[TriangleMesh]) -> Point3f {
        let [v0, v1, v2] = self.vertices(meshes);
        (v0.p + v1.p + v2.p) * (1.0 / 3.0)
    }

    fn area(&self, meshes: &[TriangleMesh]) -> Float {
        let [v0, v1, v2] = self.vertices(meshes);
        0.5 * (v1.p - v0.p).cross(&(v2.p - v0.p)).length()
    }

    /// Möller-Trumbore with back face culling. Only faces wound counter
    /// clockwise as seen from the ray origin can be hit.
    fn intersect(&self, meshes: &[TriangleMesh], ray: &mut Ray) -> Option<SurfaceInteraction> {
        let [v0, v1, v2] = self.vertices(meshes);
        let d = ray.direction();
        let e1 = v1.p - v0.p;
        let e2 = v2.p - v0.p;

        let pvec = d.cross(&e2);
        let det = e1.dot(&pvec);
        // back faces, rays in the plane of the triangle and zero area triangles
        if !(det > 0.0) {
            return None;
        }

        // barycentrics are kept scaled by det until the hit is accepted
        let tvec = ray.origin() - v0.p;
        let u = tvec.dot(&pvec);
        if u < 0.0 || u > det {
            return None;
        }
        let qvec = tvec.cross(&e1);
        let v = d.dot(&qvec);
        if v < 0.0 || u + v > det {
            return None;
        }

        let inv_det = 1.0 / det;
        let t = e2.dot(&qvec) * inv_det;
        if !(t >= RAY_EPSILON && t <= ray.t_max) {
            return None;
        }

        let u = u * inv_det;
        let v = v * inv_det;
        let w = 1.0 - u - v;
        let shading = Vector3f::from(v0.n) * w + Vector3f::from(v1.n) * u + Vector3f::from(v2.n) * v;
        let n = if shading.length_squared() > 0.0 {
            shading.normalize()
        } else {
            e1.cross(&e2).normalize()
        };

        ray.t_max = t;
        Some(SurfaceInteraction::new(ray.point_at_time(t), Normal3f::from(n), t, [u, v], -d))
    }
}
