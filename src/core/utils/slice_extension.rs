/// Extension methods on slices to provide functionality from c++ not in rust.
pub trait SliceExtension<T> {
    /// Rearanges the slice based on the given predicate such that all elements
    /// for which the predicate returns true precede the elements for
    /// which it returns false. Returns the number of elements in the first group.
    ///
    /// Two cursors walk towards each other: a true element advances the front
    /// cursor, a false one is swapped to the back. Not stable.
    fn partition<P>(&mut self, predicate: P) -> usize
    where
    P: FnMut(&T) -> bool;
}

impl<T> SliceExtension<T> for [T] {
    fn partition<P>(&mut self, mut predicate: P) -> usize
    where
    P: FnMut(&T) -> bool
    {
        let mut left = 0;
        let mut right = self.len();
        while left < right {
            if predicate(&self[left]) {
                left += 1;
            } else {
                right -= 1;
                self.swap(left, right);
            }
        }
        left
    }
}
