use std::ops::*;
use std::fmt;
use num;
use crate::core::math::Float;
use super::Vector3;

pub type Normal3f = Normal3<Float>;

/// Representation of a surface normal.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
#[repr(C)]
pub struct Normal3<T> {
    pub x: T,
    pub y: T,
    pub z: T
}

impl<T> Normal3<T> {
    #[inline]
    pub fn new(x: T, y: T, z: T) -> Self {
        Normal3::<T>{x, y, z}
    }

    /// Creates a new Normal3 with all components 0.
    #[inline]
    pub fn zero() -> Normal3<T>
    where
    T: num::Zero
    {
        Normal3::<T>{
            x: T::zero(),
            y: T::zero(),
            z: T::zero()
        }
    }

    /// Returns the dot product with a vector.
    #[inline]
    pub fn dot_vec(&self, v: &Vector3<T>) -> T
    where
    T: Copy + Add<Output = T> + Mul<Output = T>
    {
        self.x * v.x + self.y * v.y + self.z * v.z
    }

    /// Calculate the squared length of the Normal3.
    #[inline]
    pub fn length_squared(&self) -> T
    where
    T: Copy + Add<T, Output = T> + Mul<T, Output = T>
    {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    #[inline]
    pub fn length(&self) -> T
    where
    T: num::Float
    {
        self.length_squared().sqrt()
    }

    #[inline]
    pub fn normalize(&self) -> Normal3<T>
    where
    T: num::Float
    {
        *self * (T::one() / self.length())
    }
}

index_xyz!(Normal3);

impl<T> Neg for Normal3<T>
where
T: Neg<Output = T>
{
    type Output = Normal3<T>;
    #[inline]
    fn neg(self) -> Normal3<T> {
        Normal3::<T>{
            x: -self.x,
            y: -self.y,
            z: -self.z
        }
    }
}

impl<T> Add for Normal3<T>
where
T: Add<Output = T>
{
    type Output = Normal3<T>;
    #[inline]
    fn add(self, rhs: Normal3<T>) -> Normal3<T> {
        Normal3::<T>{
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z
        }
    }
}

impl<T> Mul<T> for Normal3<T>
where
T: Copy + Mul<Output = T>
{
    type Output = Normal3<T>;
    #[inline]
    fn mul(self, rhs: T) -> Normal3<T> {
        Normal3::<T>{
            x: self.x * rhs,
            y: self.y * rhs,
            z: self.z * rhs
        }
    }
}

reverse_mul_scalar!(Normal3, {x, y, z});

impl<T> From<Vector3<T>> for Normal3<T> {
    fn from(v: Vector3<T>) -> Normal3<T> {
        Normal3::<T>{
            x: v.x,
            y: v.y,
            z: v.z
        }
    }
}

impl<T: fmt::Display> fmt::Display for Normal3<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.x, self.y, self.z)
    }
}
