use super::{Point3, Vector3, Ray};
use num;
use std::ops::Index;
use std::default::Default;
use crate::core::math::{Float, gamma, consts::RAY_EPSILON};

pub type Bounds3f = Bounds3<Float>;

/// An axis aligned bounding box.
#[derive(Debug, Copy, Clone, PartialEq)]
#[repr(C)]
pub struct Bounds3<T> {
    pub min: Point3<T>,
    pub max: Point3<T>
}

impl<T> Bounds3<T>
where
T: num::Float
{
    /// Creates the Bounds3 spanned by two arbitrary corner points.
    pub fn new(p1: Point3<T>, p2: Point3<T>) -> Self {
        Bounds3::<T>{
            min: p1.min(&p2),
            max: p1.max(&p2)
        }
    }

    /// Creates a Bounds3 that encompases a single point.
    pub fn from_point(p: Point3<T>) -> Bounds3<T> {
        Bounds3::<T>{
            min: p,
            max: p
        }
    }

    /// Extend the box to include the point. Growing the default (empty) box by
    /// any point makes it the degenerate box around that point.
    #[inline]
    pub fn grow_by(&mut self, p: &Point3<T>) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    /// Returns the union of this and another Bounds3.
    #[inline]
    pub fn union(&self, b: &Bounds3<T>) -> Bounds3<T> {
        Bounds3::<T>{
            min: self.min.min(&b.min),
            max: self.max.max(&b.max)
        }
    }

    /// The vector along the box diagonal, i.e. the extent of the box.
    /// Only meaningful once the box has been grown at least once.
    #[inline]
    pub fn diagonal(&self) -> Vector3<T> {
        self.max - self.min
    }

    pub fn surface_area(&self) -> T {
        let d = self.diagonal();
        let two = T::one() + T::one();
        two * (d.x * d.y + d.x * d.z + d.y * d.z)
    }

    /// Returns the index of the axis with the largest extent.
    /// An axis only replaces an earlier one if its extent is strictly larger,
    /// so a tie never goes to the later axis: x wins over y, y over z.
    pub fn maximum_extent(&self) -> usize {
        let d = self.diagonal();
        let mut axis = 0;
        if d.y > d.x {
            axis = 1;
        }
        if d.z > d[axis] {
            axis = 2;
        }
        axis
    }

    /// Test if a Point3 is inside this Bounds3, boundary included.
    pub fn inside(&self, p: &Point3<T>) -> bool {
        p.x >= self.min.x && p.x <= self.max.x &&
        p.y >= self.min.y && p.y <= self.max.y &&
        p.z >= self.min.z && p.z <= self.max.z
    }

    /// Test if `b` lies entirely within this Bounds3.
    pub fn contains(&self, b: &Bounds3<T>) -> bool {
        self.inside(&b.min) && self.inside(&b.max)
    }
}

impl Bounds3<Float> {
    /// Slab test against the ray's current `(RAY_EPSILON, t_max)` interval.
    ///
    /// The near and far planes are picked with the ray's precomputed direction
    /// signs, so there is no per axis branching. Axis parallel rays have an
    /// infinite reciprocal direction and produce infinite slab distances, which
    /// resolve through ordinary IEEE comparisons. When the origin lies exactly on
    /// a slab plane of such a ray the distance is `0 * inf = NaN`; intervals are
    /// merged with `max`/`min`, which ignore NaN, so that slab does not constrain
    /// the result.
    pub fn intersect_p(&self, ray: &Ray) -> bool {
        let o = ray.origin();
        let inv_dir = ray.inv_direction();
        let dir_is_neg = ray.dir_is_neg();
        // widen far distances to ensure robust bounds intersection
        let widen = 1.0 + 2.0 * gamma(3);

        // check for ray intersection against $x$ and $y$ slabs
        let mut t_min = (self[dir_is_neg[0]].x - o.x) * inv_dir.x;
        let mut t_max = (self[1 - dir_is_neg[0]].x - o.x) * inv_dir.x * widen;
        let ty_min = (self[dir_is_neg[1]].y - o.y) * inv_dir.y;
        let ty_max = (self[1 - dir_is_neg[1]].y - o.y) * inv_dir.y * widen;
        if t_min > ty_max || ty_min > t_max {
            return false;
        }
        t_min = t_min.max(ty_min);
        t_max = t_max.min(ty_max);

        // check for ray intersection against $z$ slab
        let tz_min = (self[dir_is_neg[2]].z - o.z) * inv_dir.z;
        let tz_max = (self[1 - dir_is_neg[2]].z - o.z) * inv_dir.z * widen;
        if t_min > tz_max || tz_min > t_max {
            return false;
        }
        t_min = t_min.max(tz_min);
        t_max = t_max.min(tz_max);

        (t_min < ray.t_max) && (t_max > RAY_EPSILON)
    }
}

impl<T> Default for Bounds3<T>
where
T: num::Float
{
    /// An empty box with min = +inf and max = -inf.
    fn default() -> Bounds3<T> {
        Bounds3::<T>{
            min: Point3::<T>::new(T::infinity(), T::infinity(), T::infinity()),
            max: Point3::<T>::new(T::neg_infinity(), T::neg_infinity(), T::neg_infinity())
        }
    }
}

impl<T> Index<usize> for Bounds3<T> {
    type Output = Point3<T>;
    #[inline]
    fn index(&self, index: usize) -> &Point3<T> {
        match index {
            0 => &self.min,
            1 => &self.max,
            _ => panic!("Index out of range for Bounds3"),
        }
    }
}
