use std::ops::*;
use std::fmt;
use num;
use crate::core::math::Float;
use super::Vector3;

pub type Point3f = Point3<Float>;

/// A 3D Point.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
#[repr(C)]
pub struct Point3<T> {
    pub x: T,
    pub y: T,
    pub z: T
}

impl<T> Point3<T> {
    #[inline]
    pub fn new(x: T, y: T, z: T) -> Point3<T> {
        Point3::<T>{x, y, z}
    }

    /// Create a new Point3 with all components 0.
    pub fn zero() -> Point3<T>
    where
    T: num::Zero
    {
        Point3::<T>{
            x: T::zero(),
            y: T::zero(),
            z: T::zero()
        }
    }

    /// Returns a component wise minimum.
    #[inline]
    pub fn min(&self, other: &Point3<T>) -> Point3<T>
    where
    T: num::Float
    {
        Point3::<T>{
            x: self.x.min(other.x),
            y: self.y.min(other.y),
            z: self.z.min(other.z)
        }
    }

    /// Returns a component wise maximum.
    #[inline]
    pub fn max(&self, other: &Point3<T>) -> Point3<T>
    where
    T: num::Float
    {
        Point3::<T>{
            x: self.x.max(other.x),
            y: self.y.max(other.y),
            z: self.z.max(other.z)
        }
    }
}

index_xyz!(Point3);

impl<T> Add<Vector3<T>> for Point3<T>
where
T: Add<Output = T>
{
    type Output = Point3<T>;
    #[inline]
    fn add(self, rhs: Vector3<T>) -> Point3<T> {
        Point3::<T>{
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z
        }
    }
}

impl<T> AddAssign<Vector3<T>> for Point3<T>
where
T: AddAssign
{
    #[inline]
    fn add_assign(&mut self, rhs: Vector3<T>) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

/// Points are only added together when forming weighted averages.
impl<T> Add<Point3<T>> for Point3<T>
where
T: Add<Output = T>
{
    type Output = Point3<T>;
    #[inline]
    fn add(self, rhs: Point3<T>) -> Point3<T> {
        Point3::<T>{
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z
        }
    }
}

impl<T> Sub for Point3<T>
where
T: Sub<Output = T>
{
    type Output = Vector3<T>;
    #[inline]
    fn sub(self, rhs: Point3<T>) -> Vector3<T> {
        Vector3::<T>{
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z
        }
    }
}

impl<T> Sub<Vector3<T>> for Point3<T>
where
T: Sub<Output = T>
{
    type Output = Point3<T>;
    #[inline]
    fn sub(self, rhs: Vector3<T>) -> Point3<T> {
        Point3::<T>{
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z
        }
    }
}

impl<T> Mul<T> for Point3<T>
where
T: Copy + Mul<Output = T>
{
    type Output = Self;
    #[inline]
    fn mul(self, rhs: T) -> Self {
        Point3::<T>{
            x: self.x * rhs,
            y: self.y * rhs,
            z: self.z * rhs
        }
    }
}

reverse_mul_scalar!(Point3, {x, y, z});

impl<T> From<Vector3<T>> for Point3<T> {
    fn from(v: Vector3<T>) -> Point3<T> {
        Point3::<T>{
            x: v.x,
            y: v.y,
            z: v.z
        }
    }
}

impl<T> From<[T; 3]> for Point3<T>
where
T: Copy
{
    fn from(v: [T; 3]) -> Point3<T> {
        Point3::<T>{
            x: v[0],
            y: v[1],
            z: v[2]
        }
    }
}

impl<T: fmt::Display> fmt::Display for Point3<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.x, self.y, self.z)
    }
}
