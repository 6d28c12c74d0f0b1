use std::fmt;
use std::mem;
use std::ops::{Deref, DerefMut};
use std::ptr;
use std::slice;

use tracing::trace;

use crate::error::{ArrayError, Result};
use crate::hint::CapacityHint;
use crate::raw_buffer::RawBuffer;

/// Growable contiguous array over a single owned [`RawBuffer`].
///
/// Slots `[0, len)` hold live elements; slots `[len, capacity)` are
/// uninitialized and never read. Capacity only grows through explicit
/// `reserve`/`resize` or the append growth rule (double, starting at 1), and
/// only shrinks through [`shrink_to_fit`](Self::shrink_to_fit).
///
/// Every reallocation builds the new buffer completely before swapping it in,
/// so a failed growth leaves the array untouched.
pub struct DynamicArray<T> {
    buf: RawBuffer<T>,
    len: usize,
}

impl<T> DynamicArray<T> {
    /// An empty array. Does not allocate.
    pub const fn new() -> Self {
        Self {
            buf: RawBuffer::new(),
            len: 0,
        }
    }

    /// An empty array with room for exactly `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::try_with_capacity(capacity).unwrap_or_else(|e| e.escalate())
    }

    /// Like [`with_capacity`](Self::with_capacity), but reports
    /// `CapacityOverflow` or `AllocFailed` instead of aborting.
    pub fn try_with_capacity(capacity: usize) -> Result<Self> {
        Ok(Self {
            buf: RawBuffer::allocate(capacity)?,
            len: 0,
        })
    }

    /// Pre-allocates from a [`reserve`](crate::reserve) hint.
    pub fn with_hint(hint: CapacityHint) -> Self {
        Self::with_capacity(hint.capacity())
    }

    /// `len` default values, capacity exactly `len`.
    pub fn with_len(len: usize) -> Self
    where
        T: Default,
    {
        Self::from_fn(len, T::default)
    }

    /// `len` clones of `value`, capacity exactly `len`.
    pub fn from_elem(len: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::from_fn(len, || value.clone())
    }

    /// `len` values produced by `f`, capacity exactly `len`.
    ///
    /// If `f` panics the values produced so far are dropped and the buffer
    /// released.
    pub fn from_fn<F>(len: usize, mut f: F) -> Self
    where
        F: FnMut() -> T,
    {
        let mut out = Self::with_capacity(len);
        while out.len < len {
            // SAFETY: out.len < len == capacity
            unsafe { out.buf.slot(out.len).write(f()) };
            out.len += 1;
        }
        out
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: [0, len) is initialized; the pointer is non-null and aligned
        // even when nothing is allocated
        unsafe { slice::from_raw_parts(self.buf.as_ptr(), self.len) }
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as above, and we hold the only reference
        unsafe { slice::from_raw_parts_mut(self.buf.as_mut_ptr(), self.len) }
    }

    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.buf.as_ptr()
    }

    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.buf.as_mut_ptr()
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Checked access.
    pub fn at(&self, index: usize) -> Result<&T> {
        self.as_slice().get(index).ok_or(ArrayError::OutOfRange {
            index,
            len: self.len,
        })
    }

    /// Checked mutable access.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T> {
        let len = self.len;
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(ArrayError::OutOfRange { index, len })
    }

    /// # Safety
    ///
    /// `index` must be less than `len()`.
    #[inline]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(index < self.len);
        // SAFETY: live slot per the caller's contract
        unsafe { self.buf.slot(index).as_ref() }
    }

    /// # Safety
    ///
    /// `index` must be less than `len()`.
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.len);
        // SAFETY: live slot per the caller's contract, borrowed mutably through self
        unsafe { self.buf.slot(index).as_mut() }
    }

    /// Grows capacity to exactly `capacity` if it is larger than the current
    /// one. Never shrinks.
    pub fn reserve(&mut self, capacity: usize) {
        self.try_reserve(capacity).unwrap_or_else(|e| e.escalate())
    }

    /// Fallible [`reserve`](Self::reserve). On error the array is unchanged.
    pub fn try_reserve(&mut self, capacity: usize) -> Result<()> {
        if capacity <= self.capacity() {
            return Ok(());
        }
        self.relocate(capacity)
    }

    /// Releases unused capacity. An empty array gives its allocation back.
    pub fn shrink_to_fit(&mut self) {
        if self.len == self.capacity() {
            return;
        }
        if self.len == 0 {
            trace!(old_capacity = self.capacity(), "releasing buffer");
            self.buf = RawBuffer::new();
            return;
        }
        self.relocate(self.len).unwrap_or_else(|e| e.escalate())
    }

    /// Appends `value` and returns a reference to it in its new slot.
    pub fn push_back(&mut self, value: T) -> &mut T {
        self.try_push_back(value).unwrap_or_else(|e| e.escalate())
    }

    /// Fallible [`push_back`](Self::push_back). If growth fails `value` is
    /// dropped and the array is unchanged.
    pub fn try_push_back(&mut self, value: T) -> Result<&mut T> {
        if self.len == self.capacity() {
            let grown = self.grown_capacity()?;
            self.relocate(grown)?;
        }
        // SAFETY: len < capacity after the growth above
        unsafe {
            let mut slot = self.buf.slot(self.len);
            slot.write(value);
            self.len += 1;
            Ok(slot.as_mut())
        }
    }

    /// Removes the last element, `None` if there is none. Capacity is kept.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // SAFETY: the slot was live and is now outside [0, len), so it is read once
        Some(unsafe { self.buf.slot(self.len).read() })
    }

    /// Inserts `value` at `index`, shifting the tail one slot toward the end.
    ///
    /// `index == len()` appends. Returns the index of the inserted element.
    ///
    /// # Panics
    ///
    /// If `index > len()`.
    pub fn insert(&mut self, index: usize, value: T) -> usize {
        self.try_insert(index, value).unwrap_or_else(|e| e.escalate())
    }

    /// Fallible [`insert`](Self::insert).
    ///
    /// Returns `OutOfRange` if `index > len()`, or the allocation error if a
    /// full array cannot grow. The array is unchanged on error.
    pub fn try_insert(&mut self, index: usize, value: T) -> Result<usize> {
        if index > self.len {
            return Err(ArrayError::OutOfRange {
                index,
                len: self.len,
            });
        }

        if self.len < self.capacity() {
            // SAFETY: index <= len < capacity, and [index, len) moves up into
            // slot len which is in bounds
            unsafe {
                let at = self.buf.slot(index).as_ptr();
                ptr::copy(at, at.add(1), self.len - index);
                at.write(value);
            }
        } else {
            // full: build the new buffer with the gap already in place so each
            // element moves once
            let grown = self.grown_capacity()?;
            let mut fresh = RawBuffer::allocate(grown)?;
            trace!(
                old_capacity = self.capacity(),
                new_capacity = grown,
                index,
                "reallocating for insert"
            );
            // SAFETY: fresh has room for len + 1 elements; the two ranges of
            // the old buffer are live and copied into disjoint destinations
            unsafe {
                let src = self.buf.as_ptr();
                let dst = fresh.as_mut_ptr();
                ptr::copy_nonoverlapping(src, dst, index);
                dst.add(index).write(value);
                ptr::copy_nonoverlapping(src.add(index), dst.add(index + 1), self.len - index);
            }
            // the old block now holds only moved-from bits
            self.buf.swap(&mut fresh);
        }
        self.len += 1;
        Ok(index)
    }

    /// Drops the element at `index` and closes the gap.
    ///
    /// Returns `index`, which now names the element that followed the erased
    /// one, or `len()` if the last element was erased.
    ///
    /// # Panics
    ///
    /// If `index >= len()`.
    pub fn erase(&mut self, index: usize) -> usize {
        drop(self.remove(index));
        index
    }

    /// Like [`erase`](Self::erase) but hands the element back.
    pub fn remove(&mut self, index: usize) -> T {
        assert!(
            index < self.len,
            "index out of bounds: erase at {} with len {}",
            index,
            self.len
        );
        // SAFETY: index < len; the tail [index + 1, len) moves down by one
        unsafe {
            let at = self.buf.slot(index).as_ptr();
            let removed = at.read();
            ptr::copy(at.add(1), at, self.len - index - 1);
            self.len -= 1;
            removed
        }
    }

    /// Drops all elements. The allocation is kept.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Drops the elements past `len`. No-op if `len >= self.len()`.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }
        let tail = self.len - len;
        // shorten first: a panicking Drop must not lead to a second drop
        self.len = len;
        // SAFETY: [len, len + tail) were live and are now outside the live range
        unsafe {
            let start = self.buf.slot(len).as_ptr();
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(start, tail));
        }
    }

    /// Resizes to `len`, filling new slots with `T::default()`.
    ///
    /// Growing past capacity reallocates to `max(len, 2 * capacity)`.
    pub fn resize(&mut self, len: usize)
    where
        T: Default,
    {
        self.resize_with(len, T::default)
    }

    /// Fallible [`resize`](Self::resize).
    pub fn try_resize(&mut self, len: usize) -> Result<()>
    where
        T: Default,
    {
        self.try_resize_with(len, T::default)
    }

    /// Resizes to `len`, filling new slots with values produced by `f`.
    pub fn resize_with<F>(&mut self, len: usize, f: F)
    where
        F: FnMut() -> T,
    {
        self.try_resize_with(len, f).unwrap_or_else(|e| e.escalate())
    }

    /// Fallible [`resize_with`](Self::resize_with). Growth is allocated before
    /// any slot is filled, so on error the array is unchanged.
    pub fn try_resize_with<F>(&mut self, len: usize, mut f: F) -> Result<()>
    where
        F: FnMut() -> T,
    {
        if len <= self.len {
            self.truncate(len);
            return Ok(());
        }
        if len > self.capacity() {
            self.relocate(self.growth_target(len))?;
        }
        while self.len < len {
            // SAFETY: self.len < len <= capacity
            unsafe { self.buf.slot(self.len).write(f()) };
            self.len += 1;
        }
        Ok(())
    }

    /// Exchanges contents with `other` without touching any element.
    pub fn swap(&mut self, other: &mut DynamicArray<T>) {
        self.buf.swap(&mut other.buf);
        mem::swap(&mut self.len, &mut other.len);
    }

    /// Moves everything out, leaving `self` empty with no allocation.
    pub fn take(&mut self) -> Self {
        mem::take(self)
    }

    /// Hands out the buffer and live length, leaving `self` empty.
    pub(crate) fn take_parts(&mut self) -> (RawBuffer<T>, usize) {
        let len = mem::replace(&mut self.len, 0);
        (mem::take(&mut self.buf), len)
    }

    /// Capacity for holding at least `needed` elements: `needed` or double the
    /// current capacity, whichever is larger.
    fn growth_target(&self, needed: usize) -> usize {
        self.capacity()
            .checked_mul(2)
            .map_or(needed, |doubled| doubled.max(needed))
    }

    fn grown_capacity(&self) -> Result<usize> {
        match self.capacity() {
            0 => Ok(1),
            cap => cap.checked_mul(2).ok_or(ArrayError::CapacityOverflow),
        }
    }

    /// Moves the live elements into a fresh buffer of exactly `capacity`
    /// slots. On error nothing has changed.
    fn relocate(&mut self, capacity: usize) -> Result<()> {
        debug_assert!(capacity >= self.len);
        let mut fresh = RawBuffer::allocate(capacity)?;
        trace!(
            old_capacity = self.capacity(),
            new_capacity = capacity,
            len = self.len,
            "reallocating buffer"
        );
        // SAFETY: both blocks hold at least len slots and are distinct
        unsafe {
            ptr::copy_nonoverlapping(self.buf.as_ptr(), fresh.as_mut_ptr(), self.len);
        }
        self.buf.swap(&mut fresh);
        Ok(())
    }
}

impl<T> Drop for DynamicArray<T> {
    fn drop(&mut self) {
        // the buffer itself is released by RawBuffer's Drop
        self.clear();
    }
}

impl<T> Default for DynamicArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for DynamicArray<T> {
    /// Deep copy into a buffer of the same capacity.
    fn clone(&self) -> Self {
        let mut out = Self::with_capacity(self.capacity());
        for item in self.iter() {
            // SAFETY: out.len < self.len <= out.capacity
            unsafe { out.buf.slot(out.len).write(item.clone()) };
            out.len += 1;
        }
        out
    }

    /// Copy-and-swap: `self` is only touched once the copy is complete.
    fn clone_from(&mut self, source: &Self) {
        let mut copy = source.clone();
        self.swap(&mut copy);
    }
}

impl<T> Deref for DynamicArray<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> DerefMut for DynamicArray<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> AsRef<[T]> for DynamicArray<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> AsMut<[T]> for DynamicArray<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: fmt::Debug> fmt::Debug for DynamicArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> From<CapacityHint> for DynamicArray<T> {
    fn from(hint: CapacityHint) -> Self {
        Self::with_hint(hint)
    }
}

impl<T, const N: usize> From<[T; N]> for DynamicArray<T> {
    fn from(items: [T; N]) -> Self {
        let mut out = Self::with_capacity(N);
        for item in items {
            out.push_back(item);
        }
        out
    }
}

impl<T: Clone> From<&[T]> for DynamicArray<T> {
    fn from(items: &[T]) -> Self {
        let mut out = Self::with_capacity(items.len());
        for item in items {
            out.push_back(item.clone());
        }
        out
    }
}

impl<T> From<Vec<T>> for DynamicArray<T> {
    fn from(items: Vec<T>) -> Self {
        let mut out = Self::with_capacity(items.len());
        out.extend(items);
        out
    }
}

impl<T> Extend<T> for DynamicArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        if lower > self.capacity() - self.len {
            let needed = self.len.saturating_add(lower);
            self.reserve(self.growth_target(needed));
        }
        for item in iter {
            self.push_back(item);
        }
    }
}

impl<'a, T: Copy + 'a> Extend<&'a T> for DynamicArray<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied())
    }
}

impl<T> FromIterator<T> for DynamicArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut out = Self::new();
        out.extend(iter);
        out
    }
}

impl<'a, T> IntoIterator for &'a DynamicArray<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut DynamicArray<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
