use super::math::Float;
use super::geometry::{Bounds3f, Point3f, Ray};
use super::interaction::SurfaceInteraction;
use super::mesh::TriangleMesh;
use super::shape::Shape;
use crate::shapes::{Sphere, Triangle};

/// The closed set of shapes an acceleration structure can hold.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Primitive {
    Triangle(Triangle),
    Sphere(Sphere)
}

macro_rules! dispatch {
    ($self:ident, $s:ident => $e:expr) => {
        match $self {
            Primitive::Triangle($s) => $e,
            Primitive::Sphere($s) => $e
        }
    };
}

impl Shape for Primitive {
    #[inline]
    fn world_bound(&self, meshes: &[TriangleMesh]) -> Bounds3f {
        dispatch!(self, s => s.world_bound(meshes))
    }

    #[inline]
    fn centroid(&self, meshes: &[TriangleMesh]) -> Point3f {
        dispatch!(self, s => s.centroid(meshes))
    }

    #[inline]
    fn area(&self, meshes: &[TriangleMesh]) -> Float {
        dispatch!(self, s => s.area(meshes))
    }

    #[inline]
    fn intersect(&self, meshes: &[TriangleMesh], ray: &mut Ray) -> Option<SurfaceInteraction> {
        dispatch!(self, s => s.intersect(meshes, ray))
    }

    #[inline]
    fn intersect_p(&self, meshes: &[TriangleMesh], ray: &Ray) -> bool {
        dispatch!(self, s => s.intersect_p(meshes, ray))
    }
}

impl From<Triangle> for Primitive {
    fn from(t: Triangle) -> Primitive {
        Primitive::Triangle(t)
    }
}

impl From<Sphere> for Primitive {
    fn from(s: Sphere) -> Primitive {
        Primitive::Sphere(s)
    }
}
