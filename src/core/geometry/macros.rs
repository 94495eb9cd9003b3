//! Utility macros used accross multiple files.

/// Reverse multiplication for a generic type, so that `s * v` works as well as `v * s`.
macro_rules! reverse_mul {
    ($T:ident, { $($field:ident),+ }, $U:ty) => {
        impl Mul<$T<$U>> for $U {
            type Output = $T<$U>;
            #[inline]
            fn mul(self, rhs: $T<$U>) -> Self::Output {
                $T::new($(rhs.$field * self),+)
            }
        }
    };
}

macro_rules! reverse_mul_scalar {
    ($T:ident, { $($field:ident),+ }) => {
        reverse_mul!($T, {$($field),+}, f32);
        reverse_mul!($T, {$($field),+}, f64);
    };
}

/// Index a three component type by axis.
macro_rules! index_xyz {
    ($T:ident) => {
        impl<T> Index<usize> for $T<T> {
            type Output = T;
            #[inline]
            fn index(&self, index: usize) -> &T {
                match index {
                    0 => &self.x,
                    1 => &self.y,
                    2 => &self.z,
                    _ => panic!(concat!("Index out of range for ", stringify!($T))),
                }
            }
        }

        impl<T> IndexMut<usize> for $T<T> {
            #[inline]
            fn index_mut(&mut self, index: usize) -> &mut T {
                match index {
                    0 => &mut self.x,
                    1 => &mut self.y,
                    2 => &mut self.z,
                    _ => panic!(concat!("Index out of range for ", stringify!($T))),
                }
            }
        }
    };
}
