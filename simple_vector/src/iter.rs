use std::iter::FusedIterator;
use std::ptr;
use std::slice;

use crate::array::DynamicArray;
use crate::raw_buffer::RawBuffer;

/// Owning iterator over the elements of a [`DynamicArray`].
///
/// Elements not consumed are dropped with the iterator, then the buffer is
/// released.
pub struct IntoIter<T> {
    buf: RawBuffer<T>,
    start: usize,
    end: usize,
}

impl<T> IntoIter<T> {
    /// The elements not yet yielded.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: [start, end) are still live
        unsafe { slice::from_raw_parts(self.buf.as_ptr().add(self.start), self.end - self.start) }
    }
}

impl<T> IntoIterator for DynamicArray<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(mut self) -> IntoIter<T> {
        // the array is left empty, so its own Drop has nothing to do
        let (buf, len) = self.take_parts();
        IntoIter {
            buf,
            start: 0,
            end: len,
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        // SAFETY: start < end, the slot is live and leaves the live range here
        let item = unsafe { self.buf.slot(self.start).read() };
        self.start += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.end - self.start;
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        self.end -= 1;
        // SAFETY: as in next, from the other end
        Some(unsafe { self.buf.slot(self.end).read() })
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        let remaining = self.end - self.start;
        if remaining == 0 {
            return;
        }
        let start = self.start;
        self.start = self.end;
        // SAFETY: [start, start + remaining) were live and are dropped once
        unsafe {
            let first = self.buf.slot(start).as_ptr();
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(first, remaining));
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}
