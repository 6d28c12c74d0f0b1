use std::alloc::Layout;

/// Errors reported by the fallible operations of [`DynamicArray`](crate::DynamicArray)
/// and [`RawBuffer`](crate::RawBuffer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ArrayError {
    /// Checked access past the live elements, or an insert position past
    /// the end.
    #[error("index {index} is out of range for length {len}")]
    OutOfRange { index: usize, len: usize },

    /// The requested capacity does not fit in the address space.
    #[error("capacity overflow")]
    CapacityOverflow,

    /// The global allocator could not satisfy the request.
    #[error("allocation of {} bytes failed", .layout.size())]
    AllocFailed { layout: Layout },
}

impl ArrayError {
    /// Escalates an error the way std collections do.
    ///
    /// Used by the infallible wrappers (`push_back`, `insert`, `reserve`, ...).
    /// A bad insert position comes from `insert` and panics.
    pub(crate) fn escalate(self) -> ! {
        match self {
            ArrayError::AllocFailed { layout } => std::alloc::handle_alloc_error(layout),
            ArrayError::CapacityOverflow => panic!("capacity overflow"),
            ArrayError::OutOfRange { index, len } => {
                panic!("index out of bounds: insert at {} with len {}", index, len)
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ArrayError>;
