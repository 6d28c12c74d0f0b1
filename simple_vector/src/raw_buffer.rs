use std::alloc::{Layout, alloc, dealloc};
use std::marker::PhantomData;
use std::mem;
use std::ptr::NonNull;

use crate::error::{ArrayError, Result};

/// Exclusive owner of one uninitialized heap block of `capacity` slots.
///
/// The buffer never constructs or drops a `T`; whoever fills the slots is
/// responsible for dropping what they wrote before the buffer goes away.
/// A buffer with capacity 0 owns no allocation.
pub struct RawBuffer<T> {
    ptr: NonNull<T>,
    cap: usize,
    _marker: PhantomData<T>,
}

// SAFETY: the buffer is plain owned memory, it moves between threads with its T
unsafe impl<T: Send> Send for RawBuffer<T> {}
// SAFETY: shared references only hand out raw pointers
unsafe impl<T: Sync> Sync for RawBuffer<T> {}

impl<T> RawBuffer<T> {
    /// An empty buffer. Does not allocate.
    pub const fn new() -> Self {
        Self {
            ptr: NonNull::dangling(),
            cap: 0,
            _marker: PhantomData,
        }
    }

    /// Allocates `capacity` uninitialized slots.
    ///
    /// A request for 0 slots returns an empty buffer. Zero-sized `T` never
    /// touches the allocator.
    pub fn allocate(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Ok(Self::new());
        }
        let layout = Self::layout_for(capacity)?;
        if layout.size() == 0 {
            return Ok(Self {
                ptr: NonNull::dangling(),
                cap: capacity,
                _marker: PhantomData,
            });
        }

        // SAFETY: layout has a non-zero size
        let raw = unsafe { alloc(layout) };
        let ptr = NonNull::new(raw as *mut T).ok_or(ArrayError::AllocFailed { layout })?;
        Ok(Self {
            ptr,
            cap: capacity,
            _marker: PhantomData,
        })
    }

    fn layout_for(capacity: usize) -> Result<Layout> {
        Layout::array::<T>(capacity).map_err(|_| ArrayError::CapacityOverflow)
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.cap
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cap == 0
    }

    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Pointer to slot `index`.
    ///
    /// # Safety
    ///
    /// `index` must be less than [`capacity`](Self::capacity). The slot may be
    /// uninitialized; reading it is only sound if the caller wrote it first.
    #[inline]
    pub unsafe fn slot(&self, index: usize) -> NonNull<T> {
        debug_assert!(index < self.cap, "slot {} past capacity {}", index, self.cap);
        // SAFETY: in bounds of the allocation per the caller's contract
        unsafe { self.ptr.add(index) }
    }

    /// Exchanges allocations with `other`. No element is touched.
    #[inline]
    pub fn swap(&mut self, other: &mut RawBuffer<T>) {
        mem::swap(&mut self.ptr, &mut other.ptr);
        mem::swap(&mut self.cap, &mut other.cap);
    }
}

impl<T> Default for RawBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for RawBuffer<T> {
    fn drop(&mut self) {
        if self.cap == 0 || mem::size_of::<T>() == 0 {
            return;
        }
        // the layout was valid when this block was allocated
        if let Ok(layout) = Self::layout_for(self.cap) {
            // SAFETY: ptr came from `alloc` with exactly this layout
            unsafe { dealloc(self.ptr.as_ptr() as *mut u8, layout) };
        }
    }
}

impl<T> std::fmt::Debug for RawBuffer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawBuffer")
            .field("ptr", &self.ptr)
            .field("capacity", &self.cap)
            .finish()
    }
}
