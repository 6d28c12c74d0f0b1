/// A request to pre-allocate capacity without creating any elements.
///
/// Built with [`reserve`] and consumed by
/// [`DynamicArray::with_hint`](crate::DynamicArray::with_hint) or the
/// `From<CapacityHint>` conversion:
///
/// ```
/// use simple_vector::{DynamicArray, reserve};
///
/// let v: DynamicArray<i32> = reserve(10).into();
/// assert_eq!(v.len(), 0);
/// assert_eq!(v.capacity(), 10);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CapacityHint {
    capacity: usize,
}

impl CapacityHint {
    pub const fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    #[inline]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Shorthand for [`CapacityHint::new`].
pub const fn reserve(capacity: usize) -> CapacityHint {
    CapacityHint::new(capacity)
}
