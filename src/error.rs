use std::fmt;

/// Errors reported by an [`Allocator`](crate::allocator::Allocator) when it
/// cannot serve a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocError {
    /// The arena has fewer than `requested` free bytes left.
    CapacityExceeded { requested: usize, available: usize },
    /// `count * size_of::<T>()` does not fit in a `usize`.
    LayoutOverflow,
    /// The global heap refused an allocation of `size` bytes.
    OutOfMemory { size: usize },
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            AllocError::CapacityExceeded {
                requested,
                available,
            } => write!(
                f,
                "arena exhausted: requested {} bytes, {} available",
                requested, available
            ),
            AllocError::LayoutOverflow => f.write_str("allocation size overflows usize"),
            AllocError::OutOfMemory { size } => {
                write!(f, "out of memory allocating {} bytes", size)
            }
        }
    }
}

impl std::error::Error for AllocError {}

/// Errors that can occur when constructing a [`List`](crate::List).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListError {
    /// A repeated-value construction was asked for zero copies.
    ZeroCount,
    /// The allocator could not provide a node.
    Alloc(AllocError),
}

impl fmt::Display for ListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListError::ZeroCount => f.write_str("cannot build a list of zero repeated values"),
            ListError::Alloc(err) => write!(f, "node allocation failed: {}", err),
        }
    }
}

impl std::error::Error for ListError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ListError::ZeroCount => None,
            ListError::Alloc(err) => Some(err),
        }
    }
}

impl From<AllocError> for ListError {
    fn from(err: AllocError) -> Self {
        ListError::Alloc(err)
    }
}

/// Abort the current operation on an allocation failure that the
/// infallible API has no way to report.
#[cold]
#[track_caller]
pub(crate) fn alloc_failed(err: AllocError) -> ! {
    panic!("list allocation failed: {}", err)
}
