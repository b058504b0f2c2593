use std::alloc::Layout;

use thiserror::Error;

/// The error returned by [`CircularBuffer::try_reserve`](crate::CircularBuffer::try_reserve).
///
/// The buffer is left exactly as it was before the failed call.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TryReserveError {
    /// The requested capacity exceeds `usize::MAX` slots or `isize::MAX` bytes.
    #[error("capacity overflow")]
    CapacityOverflow,

    /// The global allocator returned null.
    #[error("memory allocation of {} bytes failed", .layout.size())]
    AllocError { layout: Layout },
}
