use crate::allocator::{Allocator, Global};
use crate::error::{alloc_failed, AllocError};
use crate::list::{List, Node};
use std::fmt;
use std::fmt::Formatter;
use std::ptr::NonNull;

/// A read-only position in a [`List`].
///
/// The position is either an element node or the sentinel, which sits one
/// past the back element ([`List::end`]). A list of length `n` therefore has
/// `n + 1` positions, numbered `0..=n`.
///
/// `Cursor` is `Copy`, and the references it hands out live as long as the
/// list borrow, not the cursor.
///
/// # Examples
///
/// Below, `^` marks the cursor and `$` the sentinel.
/// ```
/// use sentinel_list::List;
///
/// let list = List::from(['A', 'B', 'C', 'D']);
///
/// // ^A B C D $
/// let mut cursor = list.begin();
/// assert_eq!(cursor.current(), Some(&'A'));
///
/// // A ^B C D $
/// assert!(cursor.move_next().is_ok());
/// assert_eq!(cursor.current(), Some(&'B'));
///
/// // A B C D ^$
/// let mut cursor = list.end();
/// assert_eq!(cursor.current(), None);
///
/// // A B C ^D $
/// assert!(cursor.move_prev().is_ok());
/// assert_eq!(cursor.current(), Some(&'D'));
///
/// // The sentinel blocks `move_next`, the cyclic step wraps to the front.
/// let mut cursor = list.end();
/// assert!(cursor.move_next().is_err());
/// cursor.move_next_cyclic();
/// assert_eq!(cursor.current(), Some(&'A'));
/// ```
pub struct Cursor<'a, T: 'a, A: Allocator<T> + 'a = Global<T>> {
    pub(crate) current: NonNull<Node<T>>,
    pub(crate) list: &'a List<T, A>,
}

impl<'a, T: 'a, A: Allocator<T> + 'a> Clone for Cursor<'a, T, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T: 'a, A: Allocator<T> + 'a> Copy for Cursor<'a, T, A> {}

/// Two cursors are equal when they stand on the same node of the same list.
/// Equal values in another list do not count.
///
/// # Examples
/// ```
/// use sentinel_list::List;
///
/// let list = List::from([1, 2, 3]);
/// let first = list.begin();
/// let mut second = first;
/// assert_eq!(first, second);
///
/// second.move_next_cyclic();
/// assert_ne!(first, second);
///
/// let copy = list.clone();
/// assert_ne!(first, copy.begin());
/// ```
impl<'a, T: 'a, A: Allocator<T> + 'a> PartialEq for Cursor<'a, T, A> {
    fn eq(&self, other: &Self) -> bool {
        self.same_list_with(other) && self.current == other.current
    }
}

impl<'a, T: 'a, A: Allocator<T> + 'a> Eq for Cursor<'a, T, A> {}

impl<'a, T: 'a, A: Allocator<T> + 'a> Cursor<'a, T, A> {
    fn same_list_with(&self, other: &Self) -> bool {
        self.list.ghost_node() == other.list.ghost_node()
    }
}

/// A position in a [`List`] that can also edit the list there.
///
/// Moves like a [`Cursor`]. References it hands out borrow the cursor
/// itself, so nothing it yields survives a later `remove` or `insert`.
/// [`CursorMut::view`] lends out the whole list for the same short span.
///
/// The list cannot be touched directly while the cursor lives:
///
/// ```compile_fail
/// use sentinel_list::List;
///
/// let mut list = List::from([1, 2, 3]);
/// let mut cursor = list.begin_mut();
/// println!("{:?}", list.back());
/// println!("{:?}", cursor.current());
/// ```
pub struct CursorMut<'a, T: 'a, A: Allocator<T> + 'a = Global<T>> {
    pub(crate) current: NonNull<Node<T>>,
    pub(crate) list: &'a mut List<T, A>,
}

macro_rules! impl_cursor {
    ($CURSOR:ident) => {
        impl<'a, T: 'a, A: Allocator<T> + 'a> $CURSOR<'a, T, A> {
            pub(crate) fn next_node(&self) -> NonNull<Node<T>> {
                // SAFETY: every link of the ring points at a live node.
                unsafe { self.current.as_ref().next }
            }
            pub(crate) fn prev_node(&self) -> NonNull<Node<T>> {
                // SAFETY: every link of the ring points at a live node.
                unsafe { self.current.as_ref().prev }
            }
        }

        impl<'a, T: 'a, A: Allocator<T> + 'a> $CURSOR<'a, T, A> {
            /// Whether the cursor stands on the sentinel ([`List::end`]).
            pub fn is_end(&self) -> bool {
                self.current == self.list.ghost_node()
            }

            /// Whether the cursor stands on position 0 ([`List::begin`]).
            /// For an empty list that is the sentinel.
            pub fn is_begin(&self) -> bool {
                self.prev_node() == self.list.ghost_node()
            }

            /// Same as [`List::is_empty`] on the underlying list.
            pub fn is_empty(&self) -> bool {
                self.list.is_empty()
            }

            /// Step to the successor node, wrapping from the sentinel to the
            /// front.
            ///
            /// # Examples
            ///
            /// ```
            /// use sentinel_list::List;
            ///
            /// let list = List::from([1, 2, 3]);
            /// let mut cursor = list.end();
            /// cursor.move_next_cyclic();
            /// assert_eq!(cursor.current(), Some(&1));
            /// ```
            pub fn move_next_cyclic(&mut self) {
                self.current = self.next_node();
            }

            /// Step to the predecessor node, wrapping from the front to the
            /// sentinel.
            ///
            /// # Examples
            ///
            /// ```
            /// use sentinel_list::List;
            ///
            /// let list = List::from([1, 2, 3]);
            /// let mut cursor = list.begin();
            /// cursor.move_prev_cyclic();
            /// assert!(cursor.is_end());
            /// assert_eq!(cursor.previous(), Some(&3));
            /// ```
            pub fn move_prev_cyclic(&mut self) {
                self.current = self.prev_node();
            }

            /// Step forward. Fails without moving when the cursor is already
            /// on the sentinel.
            ///
            /// # Examples
            ///
            /// ```
            /// use sentinel_list::List;
            ///
            /// let list = List::from([1, 2, 3]);
            /// let mut cursor = list.end();
            /// assert!(cursor.move_next().is_err());
            /// assert!(cursor.is_end());
            /// ```
            pub fn move_next(&mut self) -> Result<(), &'static str> {
                if self.is_end() {
                    return Err("`move_next` across ghost boundary");
                }
                self.move_next_cyclic();
                Ok(())
            }

            /// Step backward. Fails without moving when the cursor is on
            /// position 0.
            ///
            /// # Examples
            ///
            /// ```
            /// use sentinel_list::List;
            ///
            /// let list = List::from([1, 2, 3]);
            /// let mut cursor = list.begin();
            /// assert!(cursor.move_prev().is_err());
            /// assert_eq!(cursor.current(), Some(&1));
            /// ```
            pub fn move_prev(&mut self) -> Result<(), &'static str> {
                if self.is_begin() {
                    return Err("`move_prev` across ghost boundary");
                }
                self.move_prev_cyclic();
                Ok(())
            }

            /// Take `steps` forward steps. If the sentinel comes first, the
            /// cursor stops there and the error holds the steps taken.
            ///
            /// # Examples
            ///
            /// ```
            /// use sentinel_list::List;
            ///
            /// let list = List::from([1, 2, 3]);
            /// let mut cursor = list.begin();
            ///
            /// assert_eq!(cursor.seek_forward(5), Err(3));
            /// assert!(cursor.is_end());
            /// ```
            pub fn seek_forward(&mut self, steps: usize) -> Result<(), usize> {
                (0..steps).try_for_each(|i| self.move_next().map_err(|_| i))
            }

            /// Take `steps` backward steps. If position 0 comes first, the
            /// cursor stops there and the error holds the steps taken.
            ///
            /// # Examples
            ///
            /// ```
            /// use sentinel_list::List;
            ///
            /// let list = List::from([1, 2, 3]);
            /// let mut cursor = list.end();
            ///
            /// assert_eq!(cursor.seek_backward(5), Err(3));
            /// assert_eq!(cursor.current(), Some(&1));
            /// ```
            pub fn seek_backward(&mut self, steps: usize) -> Result<(), usize> {
                (0..steps).try_for_each(|i| self.move_prev().map_err(|_| i))
            }

            /// Jump to position 0.
            pub fn move_to_start(&mut self) {
                self.current = self.list.front_node();
            }

            /// Jump to the sentinel.
            pub fn move_to_end(&mut self) {
                self.current = self.list.ghost_node();
            }
        }
    };
}

impl_cursor!(Cursor);
impl_cursor!(CursorMut);

impl<'a, T: 'a, A: Allocator<T> + 'a> Cursor<'a, T, A> {
    pub(crate) fn new(list: &'a List<T, A>, current: NonNull<Node<T>>) -> Self {
        Self { current, list }
    }

    /// The element under the cursor, `None` on the sentinel.
    pub fn current(&self) -> Option<&'a T> {
        if self.is_end() {
            return None;
        }
        // SAFETY: every node but the ghost node holds an element, which
        // lives as long as the list is borrowed.
        unsafe { Some(self.current.as_ref().element.assume_init_ref()) }
    }

    /// The element just before the cursor, `None` on position 0.
    pub fn previous(&self) -> Option<&'a T> {
        if self.is_begin() {
            return None;
        }
        // SAFETY: `prev` is not the ghost node, so it holds an element.
        Some(unsafe { self.prev_node().as_ref().element.assume_init_ref() })
    }

    /// An endless backward walk starting just before the cursor.
    pub fn rev(self) -> CursorBackIter<'a, T, A> {
        CursorBackIter { cursor: self }
    }
}

impl<'a, T: 'a, A: Allocator<T> + 'a> CursorMut<'a, T, A> {
    pub(crate) fn new(list: &'a mut List<T, A>, current: NonNull<Node<T>>) -> Self {
        Self { current, list }
    }

    /// The element under the cursor, `None` on the sentinel.
    pub fn current(&self) -> Option<&T> {
        if self.is_end() {
            return None;
        }
        // SAFETY: every node but the ghost node holds an element.
        unsafe { Some(self.current.as_ref().element.assume_init_ref()) }
    }

    /// Mutable access to the element under the cursor.
    pub fn current_mut(&mut self) -> Option<&mut T> {
        if self.is_end() {
            return None;
        }
        // SAFETY: every node but the ghost node holds an element, and the
        // cursor borrows the list exclusively.
        unsafe { Some(self.current.as_mut().element.assume_init_mut()) }
    }

    /// The element just before the cursor, `None` on position 0.
    pub fn previous(&self) -> Option<&T> {
        if self.is_begin() {
            return None;
        }
        // SAFETY: `prev` is not the ghost node, so it holds an element.
        Some(unsafe { self.prev_node().as_ref().element.assume_init_ref() })
    }

    /// Mutable access to the element just before the cursor.
    pub fn previous_mut(&mut self) -> Option<&mut T> {
        if self.is_begin() {
            return None;
        }
        // SAFETY: `prev` is not the ghost node, so it holds an element.
        Some(unsafe { self.prev_node().as_mut().element.assume_init_mut() })
    }

    /// A read-only [`Cursor`] on the same node, borrowing this one.
    pub fn as_cursor(&self) -> Cursor<'_, T, A> {
        Cursor::new(&*self.list, self.current)
    }

    /// Give up editing and keep a read-only [`Cursor`] on the same node.
    pub fn into_cursor(self) -> Cursor<'a, T, A> {
        Cursor::new(self.list, self.current)
    }

    /// The whole list, for as long as the cursor is not used again.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::from([1, 2, 3]);
    /// let mut cursor = list.begin_mut();
    /// cursor.remove();
    /// assert_eq!(cursor.view(), &List::from([2, 3]));
    /// ```
    pub fn view(&self) -> &List<T, A> {
        &*self.list
    }

    /// Link `item` in front of the current node and stand on it.
    ///
    /// On position 0 this matches [`List::push_front`], on the sentinel it
    /// matches [`List::push_back`].
    ///
    /// # Panics
    ///
    /// Panics if the allocator cannot provide a node. See
    /// [`CursorMut::try_insert`] for the fallible version.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::from([1, 2]);
    /// let mut cursor = list.begin_mut();
    /// assert!(cursor.move_next().is_ok());
    ///
    /// cursor.insert(10); // [1, 10, 2], on 10
    /// assert_eq!(cursor.current(), Some(&10));
    /// assert_eq!(cursor.previous(), Some(&1));
    /// assert_eq!(list.to_string(), "1 10 2");
    /// ```
    pub fn insert(&mut self, item: T) {
        self.try_insert(item)
            .unwrap_or_else(|err| alloc_failed(err))
    }

    /// Like [`CursorMut::insert`], but an allocation failure is returned
    /// and leaves both the list and the cursor as they were.
    pub fn try_insert(&mut self, item: T) -> Result<(), AllocError> {
        self.current = self.list.try_insert_before(self.current, item)?;
        Ok(())
    }

    /// Unlink the current element and return it. The cursor lands on the
    /// successor. On the sentinel nothing happens and `None` comes back.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::from([1, 2, 3]);
    /// let mut cursor = list.cursor_mut(1);
    ///
    /// assert_eq!(cursor.remove(), Some(2)); // [1, 3], on 3
    /// assert_eq!(cursor.current(), Some(&3));
    ///
    /// cursor.move_to_end();
    /// assert_eq!(cursor.remove(), None);
    /// ```
    pub fn remove(&mut self) -> Option<T> {
        if self.is_end() {
            return None;
        }
        let next = self.next_node();
        // SAFETY: `current` is an element node of the list.
        let removed = unsafe { self.list.detach_node(self.current) };
        self.current = next;
        Some(removed)
    }

    /// Unlink the element just before the cursor and return it. The cursor
    /// does not move. On position 0 there is nothing to unlink.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::from([1, 2, 3]);
    /// let mut cursor = list.end_mut();
    ///
    /// assert_eq!(cursor.backspace(), Some(3)); // [1, 2], still on the sentinel
    /// assert!(cursor.is_end());
    /// assert_eq!(cursor.previous(), Some(&2));
    /// ```
    pub fn backspace(&mut self) -> Option<T> {
        if self.is_begin() {
            return None;
        }
        let prev = self.prev_node();
        // SAFETY: `prev` is not the ghost node, so it is an element node.
        Some(unsafe { self.list.detach_node(prev) })
    }
}

impl<T: fmt::Debug, A: Allocator<T>> fmt::Debug for Cursor<'_, T, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cursor")
            .field(&*self.list)
            .field(&self.current())
            .finish()
    }
}

impl<T: fmt::Debug, A: Allocator<T>> fmt::Debug for CursorMut<'_, T, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CursorMut")
            .field(&*self.list)
            .field(&self.current())
            .finish()
    }
}

/// Endless forward walk over a list, made from a [`Cursor`].
///
/// Each pass yields the elements and then one `None` for the sentinel.
pub struct CursorIter<'a, T: 'a, A: Allocator<T> + 'a = Global<T>> {
    pub(crate) cursor: Cursor<'a, T, A>,
}

/// Endless backward walk, the mirror of [`CursorIter`].
pub struct CursorBackIter<'a, T: 'a, A: Allocator<T> + 'a = Global<T>> {
    pub(crate) cursor: Cursor<'a, T, A>,
}

impl<'a, T: 'a, A: Allocator<T> + 'a> CursorIter<'a, T, A> {
    pub fn into_cursor(self) -> Cursor<'a, T, A> {
        self.cursor
    }
    pub fn rev(self) -> CursorBackIter<'a, T, A> {
        CursorBackIter {
            cursor: self.cursor,
        }
    }
    pub fn peek(&self) -> Option<&'a T> {
        self.cursor.current()
    }
}

impl<'a, T: 'a, A: Allocator<T> + 'a> CursorBackIter<'a, T, A> {
    pub fn into_cursor(self) -> Cursor<'a, T, A> {
        self.cursor
    }
    pub fn rev(self) -> CursorIter<'a, T, A> {
        CursorIter {
            cursor: self.cursor,
        }
    }
    pub fn peek(&self) -> Option<&'a T> {
        self.cursor.previous()
    }
}

#[cfg(test)]
mod tests {
    use crate::allocator::BumpAllocator;
    use crate::List;

    #[test]
    fn cursor_moves() {
        let list = List::from([1, 2, 3]);
        let mut cursor = list.begin();
        assert!(cursor.is_begin());
        assert!(!cursor.is_end());

        assert_eq!(cursor.seek_forward(3), Ok(()));
        assert!(cursor.is_end());
        assert_eq!(cursor, list.end());
        assert_eq!(cursor.current(), None);
        assert!(cursor.move_next().is_err());

        assert_eq!(cursor.seek_backward(3), Ok(()));
        assert_eq!(cursor, list.begin());
        assert!(cursor.move_prev().is_err());

        cursor.move_prev_cyclic();
        assert!(cursor.is_end());
        cursor.move_prev_cyclic();
        assert_eq!(cursor.current(), Some(&3));

        cursor.move_to_start();
        assert_eq!(cursor.current(), Some(&1));
        cursor.move_to_end();
        assert_eq!(cursor.previous(), Some(&3));
    }

    #[test]
    fn cursor_empty_list() {
        let list = List::<i32>::new();
        let mut cursor = list.begin();
        assert!(cursor.is_begin());
        assert!(cursor.is_end());
        assert_eq!(cursor, list.end());
        assert_eq!(cursor.current(), None);
        assert_eq!(cursor.previous(), None);
        cursor.move_next_cyclic();
        assert!(cursor.is_end());
        assert!(cursor.move_next().is_err());
        assert!(cursor.move_prev().is_err());
    }

    #[test]
    fn cursor_insert_at_begin_is_push_front() {
        let mut by_cursor = List::from([1, 2, 3]);
        let mut by_push = by_cursor.clone();

        let mut cursor = by_cursor.begin_mut();
        cursor.insert(0);
        assert!(cursor.is_begin());
        by_push.push_front(0);

        assert_eq!(by_cursor, by_push);
    }

    #[test]
    fn cursor_insert_at_end_is_push_back() {
        let mut by_cursor = List::from([1, 2, 3]);
        let mut by_push = by_cursor.clone();

        let mut cursor = by_cursor.end_mut();
        cursor.insert(4);
        assert_eq!(cursor.current(), Some(&4));
        assert!(cursor.move_next().is_ok());
        assert!(cursor.is_end());
        by_push.push_back(4);

        assert_eq!(by_cursor, by_push);

        let mut empty = List::new();
        empty.end_mut().insert(1);
        assert_eq!(empty, List::from([1]));
    }

    #[test]
    fn cursor_insert_in_the_middle() {
        let original = List::from_iter(0..6);
        for at in 1..6 {
            let mut list = original.clone();
            let mut cursor = list.cursor_mut(at);
            cursor.insert(100);
            assert_eq!(cursor.current(), Some(&100));
            assert_eq!(list.len(), original.len() + 1);

            let mut expected = Vec::from_iter(0..6);
            expected.insert(at, 100);
            assert_eq!(Vec::from_iter(list.iter().copied()), expected);
            // Relative order of the old elements is preserved.
            assert!(list.iter().filter(|x| **x != 100).eq(original.iter()));
        }
    }

    #[test]
    fn cursor_remove_and_backspace() {
        let mut list = List::from([1, 2, 3, 4]);
        let mut cursor = list.begin_mut();

        cursor.insert(5);
        assert_eq!(cursor.current(), Some(&5));

        assert!(cursor.seek_forward(3).is_ok());
        assert_eq!(cursor.remove(), Some(3));
        assert_eq!(cursor.current(), Some(&4));

        assert_eq!(cursor.backspace(), Some(2));
        assert_eq!(cursor.current(), Some(&4));

        cursor.move_to_start();
        assert_eq!(cursor.backspace(), None);
        assert_eq!(Vec::from_iter(list), vec![5, 1, 4]);
    }

    #[test]
    fn cursor_mutation() {
        let mut list = List::from([1, 2, 3]);
        let mut cursor = list.cursor_mut(1);
        *cursor.current_mut().unwrap() *= 10;
        *cursor.previous_mut().unwrap() *= 100;
        assert_eq!(cursor.as_cursor().current(), Some(&20));
        let cursor = cursor.into_cursor();
        assert_eq!(cursor.previous(), Some(&100));
        assert_eq!(list.to_string(), "100 20 3");
    }

    #[test]
    fn cursor_try_insert_in_arena() {
        let mut list = List::new_in(BumpAllocator::<u32, 72>::new());
        let mut cursor = list.end_mut();
        assert!(cursor.try_insert(1).is_ok());
        assert!(cursor.try_insert(0).is_ok());
        assert!(cursor.try_insert(9).is_err());
        // A failed insertion leaves the cursor where it was.
        assert_eq!(cursor.current(), Some(&0));
        assert_eq!(cursor.view().to_string(), "0 1");
    }

    #[test]
    fn cursor_insert_moves_onto_new_element() {
        let mut list = List::from([1, 2, 3]);
        let mut cursor = list.cursor_mut(2);
        cursor.insert(7);
        cursor.move_to_start();
        cursor.insert(0);
        let view = cursor.into_cursor();
        assert_eq!(view.current(), Some(&0));
        assert_eq!(list.to_string(), "0 1 2 7 3");
    }

    #[test]
    fn cursor_iter() {
        let list = List::from([1, 2, 3]);
        let mut iter = list.begin().into_iter();
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next(), Some(&2));
        assert_eq!(iter.next(), Some(&3));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), Some(&1));

        let mut iter = iter.rev();
        assert_eq!(iter.peek(), Some(&1));
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), Some(&3));
    }
}
