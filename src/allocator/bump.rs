use crate::allocator::Allocator;
use crate::error::AllocError;
use std::alloc::{self, Layout};
use std::fmt;
use std::marker::PhantomData;
use std::mem;
use std::ptr::NonNull;

/// Alignment of every arena buffer, matching the strictest fundamental
/// alignment of the platform allocator.
const ARENA_ALIGN: usize = 16;

/// Rounds `value` up to the next multiple of `align` (a power of two).
const fn align_up(value: usize, align: usize) -> Option<usize> {
    match value.checked_add(align - 1) {
        Some(v) => Some(v & !(align - 1)),
        None => None,
    }
}

/// A fixed-capacity arena allocator.
///
/// The allocator owns a buffer of `CAPACITY` bytes and a cursor (`offset`)
/// to its first free byte. Each allocation "bumps" the cursor forward:
///
/// ```text
///   ┌─────┬─────┬─────┬─────┬───────────────────────────────────────┐
///   │ A1  │ A2  │ A3  │ A4  │            Free Space                 │
///   └─────┴─────┴─────┴─────┴───────────────────────────────────────┘
///   ▲                       ▲                                       ▲
///   buffer                  offset                           CAPACITY
/// ```
///
/// Deallocation does nothing: freed blocks are never reused, and the whole
/// buffer is released when the allocator is dropped. A request that does
/// not fit in the remaining space fails with
/// [`AllocError::CapacityExceeded`].
///
/// The buffer lives on the heap, so moving the allocator (or the list that
/// owns it) does not move the storage handed out.
///
/// # Rebinding
///
/// [`rebind`](Allocator::rebind) and [`Clone`] produce an allocator with its
/// own, fresh buffer that starts at a *copy* of this allocator's offset. The
/// two never share state afterwards: allocations made through one are not
/// visible to the other.
///
/// # Examples
///
/// ```
/// use sentinel_list::allocator::{Allocator, BumpAllocator};
///
/// let mut arena = BumpAllocator::<i32, 12>::new();
/// assert!(arena.allocate(1).is_ok());
/// assert!(arena.allocate(1).is_ok());
/// assert!(arena.allocate(1).is_ok());
/// assert!(arena.allocate(1).is_err());
/// assert_eq!(arena.remaining(), 0);
/// ```
pub struct BumpAllocator<T, const CAPACITY: usize> {
    buffer: NonNull<u8>,
    offset: usize,
    _marker: PhantomData<fn() -> T>,
}

impl<T, const CAPACITY: usize> BumpAllocator<T, CAPACITY> {
    /// Create an empty arena of `CAPACITY` bytes.
    pub fn new() -> Self {
        Self::with_offset(0)
    }

    fn buffer_layout() -> Layout {
        // `ARENA_ALIGN` is a power of two and `CAPACITY` comes from a type,
        // the layout can only fail for absurd capacities.
        match Layout::from_size_align(CAPACITY.max(1), ARENA_ALIGN) {
            Ok(layout) => layout,
            Err(_) => panic!("arena capacity {} is too large", CAPACITY),
        }
    }

    fn with_offset(offset: usize) -> Self {
        let layout = Self::buffer_layout();
        // SAFETY: `layout` has a non-zero size.
        let buffer = unsafe { alloc::alloc(layout) };
        let buffer = match NonNull::new(buffer) {
            Some(buffer) => buffer,
            None => alloc::handle_alloc_error(layout),
        };
        Self {
            buffer,
            offset: offset.min(CAPACITY),
            _marker: PhantomData,
        }
    }

    /// Total size of the arena, in bytes.
    pub const fn capacity(&self) -> usize {
        CAPACITY
    }

    /// Bytes consumed so far, including alignment padding.
    pub fn used(&self) -> usize {
        self.offset
    }

    /// Bytes left before the arena is exhausted.
    pub fn remaining(&self) -> usize {
        CAPACITY - self.offset
    }
}

// SAFETY: blocks are carved from the buffer at an aligned, strictly
// increasing offset and never handed out twice; the buffer outlives them
// because a list keeps its allocator until every node is released.
unsafe impl<T, const CAPACITY: usize> Allocator<T> for BumpAllocator<T, CAPACITY> {
    type Rebind<U> = BumpAllocator<U, CAPACITY>;

    fn allocate(&mut self, count: usize) -> Result<NonNull<T>, AllocError> {
        let requested = mem::size_of::<T>()
            .checked_mul(count)
            .ok_or(AllocError::LayoutOverflow)?;
        let base = self.buffer.as_ptr() as usize;
        // Round the cursor up so that a rebound cursor, which may sit in
        // the middle of a foreign type's block, still yields aligned storage.
        let start = align_up(base + self.offset, mem::align_of::<T>())
            .ok_or(AllocError::LayoutOverflow)?
            - base;
        let end = start
            .checked_add(requested)
            .ok_or(AllocError::LayoutOverflow)?;
        if end > CAPACITY {
            return Err(AllocError::CapacityExceeded {
                requested,
                available: self.remaining(),
            });
        }
        self.offset = end;
        // SAFETY: `start <= end <= CAPACITY`, so the pointer stays inside
        // (or one past the end of) the buffer.
        Ok(unsafe { NonNull::new_unchecked(self.buffer.as_ptr().add(start).cast::<T>()) })
    }

    unsafe fn deallocate(&mut self, _ptr: NonNull<T>, _count: usize) {}

    fn rebind<U>(&self) -> BumpAllocator<U, CAPACITY> {
        BumpAllocator::with_offset(self.offset)
    }
}

impl<T, const CAPACITY: usize> Default for BumpAllocator<T, CAPACITY> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const CAPACITY: usize> Clone for BumpAllocator<T, CAPACITY> {
    fn clone(&self) -> Self {
        Self::with_offset(self.offset)
    }
}

impl<T, const CAPACITY: usize> Drop for BumpAllocator<T, CAPACITY> {
    fn drop(&mut self) {
        // SAFETY: `buffer` was allocated in `with_offset` with this layout.
        unsafe { alloc::dealloc(self.buffer.as_ptr(), Self::buffer_layout()) }
    }
}

impl<T, const CAPACITY: usize> fmt::Debug for BumpAllocator<T, CAPACITY> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BumpAllocator")
            .field("offset", &self.offset)
            .field("capacity", &CAPACITY)
            .finish()
    }
}
