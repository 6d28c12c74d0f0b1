//! A growable contiguous array with explicit control over capacity.
//!
//! [`DynamicArray`] keeps its elements in a single [`RawBuffer`] allocation and
//! keeps the logical length separate from the number of allocated slots:
//!
//! ```
//! use simple_vector::{DynamicArray, reserve, svec};
//!
//! let mut v: DynamicArray<i32> = reserve(10).into();
//! for i in 1..=5 {
//!     v.push_back(i);
//! }
//! v.insert(2, 99);
//! assert_eq!(v, [1, 2, 99, 3, 4, 5]);
//! assert_eq!(v.capacity(), 10);
//!
//! let mut w = svec![1, 2, 3];
//! w.resize(5);
//! assert_eq!(w, [1, 2, 3, 0, 0]);
//! ```

mod array;
mod cmp;
mod error;
mod hint;
mod iter;
mod raw_buffer;

pub use array::DynamicArray;
pub use error::{ArrayError, Result};
pub use hint::{CapacityHint, reserve};
pub use iter::IntoIter;
pub use raw_buffer::RawBuffer;

/// Builds a [`DynamicArray`] whose capacity equals its length.
///
/// ```
/// use simple_vector::svec;
///
/// let a = svec![1, 2, 3];
/// assert_eq!(a.capacity(), 3);
///
/// let b = svec!["x"; 2];
/// assert_eq!(b, ["x", "x"]);
/// ```
#[macro_export]
macro_rules! svec {
    () => {
        $crate::DynamicArray::new()
    };
    ($elem:expr; $n:expr) => {
        $crate::DynamicArray::from_elem($n, $elem)
    };
    ($($x:expr),+ $(,)?) => {
        $crate::DynamicArray::from([$($x),+])
    };
}
