//! A doubly-linked list whose ends are joined through a sentinel node, with
//! node storage supplied by a pluggable allocator.
//!
//! [`List`] pushes and pops at either end in constant time, and a
//! [`CursorMut`] inserts or removes wherever it stands, also in constant
//! time. Indexed access walks the ring and costs *O*(*n*).
//!
//! ```
//! use sentinel_list::List;
//!
//! let mut list = List::from([1, 2, 3, 4]);
//!
//! let mut cursor = list.begin_mut();
//! cursor.insert(0); // new front, and the cursor now stands on it
//! assert_eq!(cursor.current(), Some(&0));
//! assert_eq!(cursor.view(), &List::from([0, 1, 2, 3, 4]));
//!
//! assert!(cursor.seek_forward(3).is_ok()); // onto the element `3`
//! assert_eq!(cursor.remove(), Some(3));
//! assert_eq!(cursor.view(), &List::from([0, 1, 2, 4]));
//! ```
//!
//! # Ring structure
//!
//! ```text
//!   List { ghost, len, alloc }
//!          │
//!          ↓
//!     ┌─────────┐  next   ┌────────┐  next   ┌────────┐  next
//!  ┌─→│ sentinel│ ──────→ │ elem 0 │ ──────→ │ elem 1 │ ──────→ ┄┄ ─┐
//!  │  │ (no T)  │ ←────── │        │ ←────── │        │ ←────── ┄┄  │
//!  │  └─────────┘  prev   └────────┘  prev   └────────┘  prev       │
//!  └─────────────────────────────────────────────────────────────────┘
//!                    next of the last element
//! ```
//!
//! A list owns one sentinel node plus one node per element, and every one
//! of them comes from `alloc`. The sentinel never holds a value. Its `next`
//! link is the front element and its `prev` link is the back element, so an
//! empty list is a sentinel linked to itself.
//!
//! Positions are numbered like slice indices: elements sit at `0..len` and
//! the sentinel sits at `len`, one past the back. For an empty list that is
//! position 0.
//!
//! # Allocators
//!
//! A list is generic over an [`Allocator`], [`Global`] by default. The
//! [`BumpAllocator`] serves nodes from a fixed-size arena and never reuses
//! freed space, so a list built on it runs out of room after a bounded number
//! of insertions, removals included.
//!
//! Every growing operation comes in two flavours: `try_*` returns the
//! [`AllocError`], the plain one panics.
//!
//! ```
//! use sentinel_list::{AllocError, BumpAllocator, List};
//!
//! let mut list = List::new_in(BumpAllocator::<u8, 256>::new());
//! let pushed = (0..).map(|i| list.try_push_back(i)).take_while(Result::is_ok).count();
//! assert_eq!(list.len(), pushed);
//! assert!(matches!(
//!     list.try_push_front(0),
//!     Err(AllocError::CapacityExceeded { .. })
//! ));
//! ```
//!
//! # Iterating
//!
//! [`Iter`] and [`IterMut`] walk the elements once, from either end, and
//! stop for good when the ends meet. Through [`IterMut`] the values can be
//! changed but the links cannot.
//!
//! ```
//! use sentinel_list::List;
//!
//! let mut list = List::from([1, 2, 3]);
//! let mut iter = list.iter();
//! assert_eq!(iter.next(), Some(&1));
//! assert_eq!(iter.next_back(), Some(&3));
//! assert_eq!(iter.next(), Some(&2));
//! assert_eq!(iter.next(), None);
//! assert_eq!(iter.next_back(), None);
//!
//! list.iter_mut().for_each(|item| *item *= 2);
//! assert_eq!(Vec::from_iter(list), vec![2, 4, 6]);
//! ```
//!
//! # Cursors
//!
//! A [`Cursor`] stands on one of the `len + 1` positions and steps in
//! either direction. [`List::begin`] starts on the front element and
//! [`List::end`] on the sentinel. `move_next` and `move_prev` refuse to step
//! over the sentinel, while their `_cyclic` twins follow the ring.
//!
//! A cursor turned into an iterator never ends: it yields `None` on the
//! sentinel and then starts over. Calling `rev` on it gives an iterator that
//! walks the other way from the same spot. It is not a
//! [`DoubleEndedIterator`].
//!
//! ```
//! use sentinel_list::List;
//!
//! let list = List::from([1, 2, 3]);
//! let mut forward = list.begin().into_iter();
//! assert_eq!(forward.next(), Some(&1));
//! assert_eq!(forward.next(), Some(&2));
//! assert_eq!(forward.next(), Some(&3));
//! assert_eq!(forward.next(), None); // the sentinel
//! assert_eq!(forward.next(), Some(&1)); // around again
//!
//! let mut backward = forward.rev();
//! assert_eq!(backward.next(), Some(&1));
//! assert_eq!(backward.next(), None);
//! assert_eq!(backward.next(), Some(&3));
//! ```
//!
//! # Editing through a cursor
//!
//! [`CursorMut`] edits the list where it stands:
//! - [`insert`] links a value before the cursor and steps onto it;
//! - [`remove`] unlinks the current element and steps onto its successor;
//! - [`backspace`] unlinks the element just before the cursor.
//!
//! ```
//! use sentinel_list::List;
//!
//! let mut list = List::from([1, 2, 3, 4]);
//! let mut cursor = list.begin_mut();
//!
//! cursor.insert(5); // [5, 1, 2, 3, 4], on 5
//! assert_eq!(cursor.current(), Some(&5));
//!
//! assert!(cursor.seek_forward(3).is_ok());
//! assert_eq!(cursor.remove(), Some(3)); // [5, 1, 2, 4], on 4
//! assert_eq!(cursor.current(), Some(&4));
//!
//! assert_eq!(cursor.backspace(), Some(2)); // [5, 1, 4], still on 4
//! assert_eq!(cursor.current(), Some(&4));
//!
//! assert_eq!(Vec::from_iter(list), vec![5, 1, 4]);
//! ```
//!
//! # Moving out
//!
//! [`List::take`] moves the whole ring into a new list without copying, and
//! leaves a released shell that may only be dropped or assigned to. Copies
//! are made with [`Clone`] (or [`List::try_clone`]).
//!
//! [`Cursor`]: crate::list::cursor::Cursor
//! [`CursorMut`]: crate::list::cursor::CursorMut
//! [`insert`]: crate::list::cursor::CursorMut::insert
//! [`remove`]: crate::list::cursor::CursorMut::remove
//! [`backspace`]: crate::list::cursor::CursorMut::backspace

#[doc(inline)]
pub use allocator::{Allocator, BumpAllocator, Global};
#[doc(inline)]
pub use error::{AllocError, ListError};
#[doc(inline)]
pub use list::iterator::{IntoIter, Iter, IterMut};
#[doc(inline)]
pub use list::List;

pub mod allocator;
pub mod error;
pub mod list;
