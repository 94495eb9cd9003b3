use crate::core::math::{Float, consts::INFINITY};
use super::{Vector3f, Point3f};
use std::fmt;

/// A Ray.
///
/// The reciprocal direction and per axis sign are computed once on construction
/// and are read by every bounding box test, which is why the origin and
/// direction can only be set through the constructors.
///
/// `t_max` is the upper end of the valid hit interval. Intersection routines
/// narrow it when they find a closer hit, so a ray is an in/out parameter of a
/// single query and should not be shared between concurrent queries.
#[derive(Debug, Copy, Clone, PartialEq)]
#[repr(C)]
pub struct Ray {
    o: Point3f,
    d: Vector3f,
    inv_dir: Vector3f,
    dir_is_neg: [usize; 3],
    pub t_max: Float
}

impl Ray {
    pub fn new(o: Point3f, d: Vector3f) -> Ray {
        Ray::with_t_max(o, d, INFINITY)
    }

    pub fn with_t_max(o: Point3f, d: Vector3f, t_max: Float) -> Ray {
        // a zero component gives an infinite reciprocal, which the slab test relies on
        let inv_dir = Vector3f::new(1.0 / d.x, 1.0 / d.y, 1.0 / d.z);
        // signs come from the reciprocal so that -0.0 pairs with -inf
        let dir_is_neg = [(inv_dir.x < 0.0) as usize, (inv_dir.y < 0.0) as usize, (inv_dir.z < 0.0) as usize];
        Ray {
            o,
            d,
            inv_dir,
            dir_is_neg,
            t_max
        }
    }

    #[inline]
    pub fn origin(&self) -> Point3f {
        self.o
    }

    #[inline]
    pub fn direction(&self) -> Vector3f {
        self.d
    }

    #[inline]
    pub fn inv_direction(&self) -> Vector3f {
        self.inv_dir
    }

    /// 1 for each axis along which the direction is negative, 0 otherwise.
    #[inline]
    pub fn dir_is_neg(&self) -> [usize; 3] {
        self.dir_is_neg
    }

    /// Return the Point3 at a given parametric distance along the ray.
    #[inline]
    pub fn point_at_time(&self, t: Float) -> Point3f {
        self.o + self.d * t
    }
}

impl fmt::Display for Ray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[o={}, d={}, t_max={}]", self.o, self.d, self.t_max)
    }
}
