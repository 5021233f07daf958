/// A set of candidate values in [1, 64], stored as a `u64` bitmask.
///
/// Bit `v - 1` is set when value `v` is present. Regions are capped at 64
/// cells, so 64 bits always cover a cell's full domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ValueSet(u64);

impl ValueSet {
    pub const MAX_VALUE: u8 = 64;

    pub fn empty() -> Self {
        Self(0)
    }

    /// The set {1, .., n}.
    pub fn full(n: u8) -> Self {
        debug_assert!(n <= Self::MAX_VALUE);
        if n == 0 {
            Self(0)
        } else if n == Self::MAX_VALUE {
            Self(u64::MAX)
        } else {
            Self((1u64 << n) - 1)
        }
    }

    pub fn singleton(value: u8) -> Self {
        let mut set = Self::empty();
        set.insert(value);
        set
    }

    pub fn contains(&self, value: u8) -> bool {
        debug_assert!((1..=Self::MAX_VALUE).contains(&value));
        self.0 & (1u64 << (value - 1)) != 0
    }

    pub fn insert(&mut self, value: u8) {
        debug_assert!((1..=Self::MAX_VALUE).contains(&value));
        self.0 |= 1u64 << (value - 1);
    }

    /// Remove a value, returning whether it was present.
    pub fn remove(&mut self, value: u8) -> bool {
        debug_assert!((1..=Self::MAX_VALUE).contains(&value));
        let bit = 1u64 << (value - 1);
        let present = self.0 & bit != 0;
        self.0 &= !bit;
        present
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Values in ascending order.
    pub fn iter(&self) -> Iter {
        Iter(self.0)
    }
}

pub struct Iter(u64);

impl Iterator for Iter {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        if self.0 == 0 {
            return None;
        }
        let value = self.0.trailing_zeros() as u8 + 1;
        self.0 &= self.0 - 1;
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        let set = ValueSet::empty();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
        assert_eq!(set.iter().count(), 0);
    }

    #[test]
    fn test_full() {
        let set = ValueSet::full(5);
        assert_eq!(set.len(), 5);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
        assert!(!set.contains(6));
    }

    #[test]
    fn test_full_max_width() {
        let set = ValueSet::full(64);
        assert_eq!(set.len(), 64);
        assert!(set.contains(1));
        assert!(set.contains(64));
    }

    #[test]
    fn test_insert_remove_contains() {
        let mut set = ValueSet::empty();
        set.insert(3);
        assert!(set.contains(3));
        assert!(set.remove(3));
        assert!(!set.contains(3));
        assert!(!set.remove(3));
    }

    #[test]
    fn test_insert_idempotent() {
        let mut set = ValueSet::singleton(7);
        set.insert(7);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_iter_ascending() {
        let mut set = ValueSet::empty();
        set.insert(5);
        set.insert(1);
        set.insert(3);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![1, 3, 5]);
    }
}
