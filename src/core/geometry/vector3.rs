use std::ops::*;
use std::fmt;
use num;
use crate::core::math::Float;
use super::{Point3, Normal3};

pub type Vector3f = Vector3<Float>;

/// Representation of a 3D Vector.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
#[repr(C)]
pub struct Vector3<T> {
    pub x: T,
    pub y: T,
    pub z: T
}

impl<T> Vector3<T> {
    #[inline]
    pub fn new(x: T, y: T, z: T) -> Vector3<T> {
        Vector3::<T>{x, y, z}
    }

    #[inline]
    pub fn zero() -> Vector3<T>
    where
    T: num::Zero
    {
        Vector3::<T>{x: T::zero(), y: T::zero(), z: T::zero()}
    }

    /// Calculate the squared length of the Vector3.
    #[inline]
    pub fn length_squared(&self) -> T
    where
    T: Copy + Add<T, Output = T> + Mul<T, Output = T>
    {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Calculate the length of the Vector3.
    #[inline]
    pub fn length(&self) -> T
    where
    T: num::Float
    {
        self.length_squared().sqrt()
    }

    /// Calculate the dot product of two Vector3.
    #[inline]
    pub fn dot(&self, o: &Vector3<T>) -> T
    where
    T: Copy + Add<T, Output = T> + Mul<T, Output = T>
    {
        self.x * o.x + self.y * o.y + self.z * o.z
    }

    /// Calculate the cross product of two Vector3.
    #[inline]
    pub fn cross(&self, o: &Vector3<T>) -> Vector3<T>
    where
    T: Copy + Sub<T, Output = T> + Mul<T, Output = T>
    {
        Vector3::<T>{
            x: (self.y * o.z) - (self.z * o.y),
            y: (self.z * o.x) - (self.x * o.z),
            z: (self.x * o.y) - (self.y * o.x)
        }
    }

    /// Returns the Vector3 normalized to unit length.
    #[inline]
    pub fn normalize(&self) -> Vector3<T>
    where
    T: num::Float
    {
        *self * (T::one() / self.length())
    }

    /// Returns a component wise minimum.
    #[inline]
    pub fn min(&self, other: &Vector3<T>) -> Vector3<T>
    where
    T: num::Float
    {
        Vector3::<T>{
            x: self.x.min(other.x),
            y: self.y.min(other.y),
            z: self.z.min(other.z)
        }
    }

    /// Returns a component wise maximum.
    #[inline]
    pub fn max(&self, other: &Vector3<T>) -> Vector3<T>
    where
    T: num::Float
    {
        Vector3::<T>{
            x: self.x.max(other.x),
            y: self.y.max(other.y),
            z: self.z.max(other.z)
        }
    }

    /// Return the absolute coordinate values for this Vector3
    #[inline]
    pub fn abs(&self) -> Vector3<T>
    where
    T: num::Float
    {
        Vector3::<T>{
            x: self.x.abs(),
            y: self.y.abs(),
            z: self.z.abs(),
        }
    }
}

index_xyz!(Vector3);

impl<T> Neg for Vector3<T>
where
T: Neg<Output = T>
{
    type Output = Self;

    #[inline]
    fn neg(self) -> Vector3<T> {
        Vector3::<T>{
            x: -self.x,
            y: -self.y,
            z: -self.z
        }
    }
}

impl<T> Add<Vector3<T>> for Vector3<T>
where
T: Add<T, Output = T>
{
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Vector3::<T>{
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z
        }
    }
}

impl<T> AddAssign<Vector3<T>> for Vector3<T>
where
T: AddAssign
{
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl<T> Sub<Vector3<T>> for Vector3<T>
where
T: Sub<T, Output = T>
{
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Vector3::<T>{
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z
        }
    }
}

impl<T> SubAssign<Vector3<T>> for Vector3<T>
where
T: SubAssign
{
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
        self.z -= rhs.z;
    }
}

impl<T> Mul<T> for Vector3<T>
where
T: Copy + Mul<T, Output = T>
{
    type Output = Self;
    #[inline]
    fn mul(self, rhs: T) -> Self {
        Vector3::<T>{
            x: self.x * rhs,
            y: self.y * rhs,
            z: self.z * rhs
        }
    }
}

reverse_mul_scalar!(Vector3, {x, y, z});

impl<T> MulAssign<T> for Vector3<T>
where
T: Copy + MulAssign
{
    #[inline]
    fn mul_assign(&mut self, rhs: T) {
        self.x *= rhs;
        self.y *= rhs;
        self.z *= rhs;
    }
}

impl Div<Float> for Vector3<Float>
{
    type Output = Self;
    #[inline]
    fn div(self, rhs: Float) -> Self {
        debug_assert_ne!(rhs, 0.0);
        let inv = 1.0 / rhs;
        Vector3::<Float>{
            x: self.x * inv,
            y: self.y * inv,
            z: self.z * inv
        }
    }
}

impl<T> From<[T; 3]> for Vector3<T>
where
T: Copy
{
    fn from(v: [T; 3]) -> Vector3<T> {
        Vector3::<T>{
            x: v[0],
            y: v[1],
            z: v[2]
        }
    }
}

impl<T> From<Point3<T>> for Vector3<T> {
    fn from(p: Point3<T>) -> Vector3<T> {
        Vector3::<T>{
            x: p.x,
            y: p.y,
            z: p.z
        }
    }
}

impl<T> From<Normal3<T>> for Vector3<T> {
    fn from(n: Normal3<T>) -> Vector3<T> {
        Vector3::<T>{
            x: n.x,
            y: n.y,
            z: n.z
        }
    }
}

impl<T: fmt::Display> fmt::Display for Vector3<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.x, self.y, self.z)
    }
}
