//! Allocation strategies a [`List`](crate::List) can be built on.
//!
//! A list never talks to the heap directly: every node is obtained from an
//! [`Allocator`] that was handed to the list when it was created. Two
//! strategies are provided:
//! - [`Global`]: one heap allocation per request, released on `deallocate`;
//! - [`BumpAllocator`]: a fixed-capacity arena that only ever moves forward.
//!
//! An allocator is typed by the element it serves. The list is given an
//! allocator for `T`, and [rebinds](Allocator::rebind) it to its internal
//! node type before allocating anything.

use crate::error::AllocError;
use std::alloc::{self, Layout};
use std::fmt;
use std::marker::PhantomData;
use std::ptr::NonNull;

pub use bump::BumpAllocator;

mod bump;

/// Typed storage provider for a [`List`](crate::List).
///
/// # Safety
///
/// The list writes its nodes into whatever `allocate` returns and follows
/// their links without further checks. An implementation must guarantee
/// that a successful `allocate(count)` returns storage that is:
/// - valid for reads and writes of `count` values of `T`;
/// - aligned for `T`;
/// - disjoint from every other block it handed out and has not yet taken
///   back through `deallocate`.
///
/// The same must hold for every allocator produced by `rebind`.
///
/// A safe `impl` is rejected:
///
/// ```compile_fail,E0200
/// use sentinel_list::allocator::Allocator;
/// use sentinel_list::AllocError;
/// use std::ptr::NonNull;
///
/// struct SameSlot;
///
/// impl<T> Allocator<T> for SameSlot {
///     type Rebind<U> = SameSlot;
///
///     fn allocate(&mut self, _count: usize) -> Result<NonNull<T>, AllocError> {
///         Ok(NonNull::dangling())
///     }
///     unsafe fn deallocate(&mut self, _ptr: NonNull<T>, _count: usize) {}
///     fn rebind<U>(&self) -> SameSlot {
///         SameSlot
///     }
/// }
/// ```
pub unsafe trait Allocator<T> {
    /// The same allocation strategy serving values of `U`.
    type Rebind<U>: Allocator<U>;

    /// Obtain uninitialised storage for `count` contiguous values of `T`.
    fn allocate(&mut self, count: usize) -> Result<NonNull<T>, AllocError>;

    /// Give back storage obtained from `allocate`.
    ///
    /// # Safety
    ///
    /// `ptr` must come from a call to `allocate(count)` on this allocator,
    /// with the same `count`, and must not be used afterwards.
    unsafe fn deallocate(&mut self, ptr: NonNull<T>, count: usize);

    /// Produce an allocator of the same strategy for another element type.
    fn rebind<U>(&self) -> Self::Rebind<U>;
}

/// The heap allocator, backed by [`std::alloc`].
pub struct Global<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> Global<T> {
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for Global<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Global<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Global<T> {}

impl<T> fmt::Debug for Global<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Global")
    }
}

// SAFETY: every non-empty block is a fresh `std::alloc` allocation of the
// requested layout; empty blocks are never written to.
unsafe impl<T> Allocator<T> for Global<T> {
    type Rebind<U> = Global<U>;

    fn allocate(&mut self, count: usize) -> Result<NonNull<T>, AllocError> {
        let layout = Layout::array::<T>(count).map_err(|_| AllocError::LayoutOverflow)?;
        if layout.size() == 0 {
            return Ok(NonNull::dangling());
        }
        // SAFETY: `layout` has a non-zero size.
        let ptr = unsafe { alloc::alloc(layout) };
        NonNull::new(ptr.cast::<T>()).ok_or(AllocError::OutOfMemory {
            size: layout.size(),
        })
    }

    unsafe fn deallocate(&mut self, ptr: NonNull<T>, count: usize) {
        // `allocate(count)` succeeded, so the layout is known to be valid.
        if let Ok(layout) = Layout::array::<T>(count) {
            if layout.size() != 0 {
                alloc::dealloc(ptr.as_ptr().cast(), layout);
            }
        }
    }

    fn rebind<U>(&self) -> Global<U> {
        Global::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{Allocator, Global};
    use crate::error::AllocError;
    use crate::List;
    use std::cell::Cell;
    use std::ptr::NonNull;
    use std::rc::Rc;

    /// Heap allocator that tracks how many blocks are live, across all of
    /// its rebound copies.
    struct Counting<T> {
        inner: Global<T>,
        live: Rc<Cell<isize>>,
    }

    unsafe impl<T> Allocator<T> for Counting<T> {
        type Rebind<U> = Counting<U>;

        fn allocate(&mut self, count: usize) -> Result<NonNull<T>, AllocError> {
            let ptr = self.inner.allocate(count)?;
            self.live.set(self.live.get() + 1);
            Ok(ptr)
        }

        unsafe fn deallocate(&mut self, ptr: NonNull<T>, count: usize) {
            self.live.set(self.live.get() - 1);
            self.inner.deallocate(ptr, count);
        }

        fn rebind<U>(&self) -> Counting<U> {
            Counting {
                inner: Global::new(),
                live: Rc::clone(&self.live),
            }
        }
    }

    #[test]
    fn user_allocator_sees_every_node() {
        let live = Rc::new(Cell::new(0));
        let mut list = List::new_in(Counting {
            inner: Global::<String>::new(),
            live: Rc::clone(&live),
        });
        // The ghost node.
        assert_eq!(live.get(), 1);

        for word in ["a", "b", "c"] {
            list.push_back(word.to_string());
        }
        assert_eq!(live.get(), 4);
        assert_eq!(list.pop_front().as_deref(), Some("a"));
        assert_eq!(live.get(), 3);

        let mut cursor = list.begin_mut();
        cursor.insert(String::from("z"));
        assert_eq!(cursor.remove().as_deref(), Some("z"));
        assert_eq!(live.get(), 3);

        let moved = list.take();
        drop(list);
        assert_eq!(live.get(), 3);
        assert_eq!(moved.front().map(String::as_str), Some("b"));
        assert_eq!(moved.back().map(String::as_str), Some("c"));
        drop(moved);
        assert_eq!(live.get(), 0);
    }

    #[test]
    fn global_round_trip() {
        let mut alloc = Global::<u64>::new();
        let ptr = alloc.allocate(4).unwrap();
        unsafe {
            for i in 0..4 {
                ptr.as_ptr().add(i).write(i as u64 * 10);
            }
            assert_eq!(*ptr.as_ptr().add(3), 30);
            alloc.deallocate(ptr, 4);
        }
    }

    #[test]
    fn global_zero_sized() {
        let mut alloc = Global::<()>::new();
        let ptr = alloc.allocate(16).unwrap();
        unsafe { alloc.deallocate(ptr, 16) };

        let mut alloc = Global::<u32>::new();
        let ptr = alloc.allocate(0).unwrap();
        unsafe { alloc.deallocate(ptr, 0) };
    }

    #[test]
    fn global_overflow() {
        let mut alloc = Global::<u64>::new();
        assert_eq!(alloc.allocate(usize::MAX).err(), Some(AllocError::LayoutOverflow));
    }

    #[test]
    fn global_rebind() {
        let alloc = Global::<u8>::new();
        let mut rebound: Global<[u64; 2]> = alloc.rebind();
        let ptr = rebound.allocate(1).unwrap();
        assert_eq!(ptr.as_ptr() as usize % std::mem::align_of::<u64>(), 0);
        unsafe { rebound.deallocate(ptr, 1) };
    }
}
