use crate::allocator::{Allocator, Global};
use crate::list::cursor::{Cursor, CursorBackIter, CursorIter};
use crate::list::{List, Node};
use std::fmt;
use std::iter::{FromIterator, FusedIterator};
use std::marker::PhantomData;
use std::ptr::NonNull;

/// Borrowing iterator over the elements of a [`List`], front to back.
///
/// Created by [`List::iter`]. It walks the nodes still ahead of it, from
/// `front` up to (not including) `end`, and can be consumed from both
/// sides. The list stays borrowed for as long as the iterator lives:
///
/// ```compile_fail
/// use sentinel_list::List;
///
/// let mut list = List::from([1, 2, 3]);
/// let mut iter = list.iter();
/// list.push_back(4); // error: `list` is borrowed by `iter`
/// println!("{:?}", iter.next());
/// ```
pub struct Iter<'a, T: 'a> {
    front: NonNull<Node<T>>,
    end: NonNull<Node<T>>,
    len: usize,
    _marker: PhantomData<&'a T>,
}

/// Iterator handing out `&mut T` to each element of a [`List`].
///
/// Created by [`List::iter_mut`]. Only the elements can change through it;
/// the links of the list are never touched. Reading the list while it is
/// alive is rejected:
///
/// ```compile_fail
/// use sentinel_list::List;
///
/// let mut list = List::from([1, 2, 3]);
/// let mut iter = list.iter_mut();
/// println!("{:?}", list.back()); // error: `list` is mutably borrowed
/// println!("{:?}", iter.next());
/// ```
pub struct IterMut<'a, T: 'a> {
    front: NonNull<Node<T>>,
    end: NonNull<Node<T>>,
    len: usize,
    _marker: PhantomData<&'a mut T>,
}

impl<'a, T: 'a> Iter<'a, T> {
    pub(crate) fn new<A: Allocator<T>>(list: &'a List<T, A>) -> Self {
        Self {
            front: list.front_node(),
            end: list.ghost_node(),
            len: list.len(),
            _marker: PhantomData,
        }
    }
}

impl<'a, T: 'a> IterMut<'a, T> {
    pub(crate) fn new<A: Allocator<T>>(list: &'a mut List<T, A>) -> Self {
        Self {
            front: list.front_node(),
            end: list.ghost_node(),
            len: list.len(),
            _marker: PhantomData,
        }
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            front: self.front,
            end: self.end,
            len: self.len,
            _marker: PhantomData,
        }
    }
}

/// Lists the elements not yet yielded.
fn debug_remaining<T: fmt::Debug>(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    mut node: NonNull<Node<T>>,
    len: usize,
) -> fmt::Result {
    let mut tuple = f.debug_tuple(name);
    for _ in 0..len {
        // SAFETY: the `len` nodes starting at `node` are element nodes of a
        // list that is borrowed for the whole life of the iterator.
        unsafe {
            tuple.field((*node.as_ptr()).element.assume_init_ref());
            node = node.as_ref().next;
        }
    }
    tuple.finish()
}

// `len` counts the nodes left between `front` (inclusive) and `end`
// (exclusive). Each side moves inward and the two never cross.
macro_rules! impl_node_range {
    ($ITER:ident, $item:ty, $read:ident) => {
        impl<'a, T: 'a> Iterator for $ITER<'a, T> {
            type Item = $item;

            fn next(&mut self) -> Option<$item> {
                if self.len == 0 {
                    return None;
                }
                self.len -= 1;
                let node = self.front;
                // SAFETY: `node` is one of the remaining element nodes, and
                // no other call yields it again.
                unsafe {
                    self.front = node.as_ref().next;
                    Some((*node.as_ptr()).element.$read())
                }
            }

            fn size_hint(&self) -> (usize, Option<usize>) {
                (self.len, Some(self.len))
            }

            fn last(mut self) -> Option<$item> {
                self.next_back()
            }
        }

        impl<'a, T: 'a> DoubleEndedIterator for $ITER<'a, T> {
            fn next_back(&mut self) -> Option<$item> {
                if self.len == 0 {
                    return None;
                }
                self.len -= 1;
                // SAFETY: as in `next`, from the other side.
                unsafe {
                    self.end = self.end.as_ref().prev;
                    Some((*self.end.as_ptr()).element.$read())
                }
            }
        }

        impl<'a, T: 'a> ExactSizeIterator for $ITER<'a, T> {}

        impl<'a, T: 'a> FusedIterator for $ITER<'a, T> {}

        impl<'a, T: fmt::Debug + 'a> fmt::Debug for $ITER<'a, T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                debug_remaining(f, stringify!($ITER), self.front, self.len)
            }
        }
    };
}

impl_node_range!(Iter, &'a T, assume_init_ref);
impl_node_range!(IterMut, &'a mut T, assume_init_mut);

/// Iterator that moves the elements out of a [`List`].
///
/// Returned by `into_iter` on a list taken by value. Whatever is left when
/// it is dropped is dropped with the list, allocator included.
pub struct IntoIter<T, A: Allocator<T> = Global<T>> {
    list: List<T, A>,
}

impl<T: fmt::Debug, A: Allocator<T>> fmt::Debug for IntoIter<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.list).finish()
    }
}

impl<T, A: Allocator<T>> Iterator for IntoIter<T, A> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.list.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len(), Some(self.list.len()))
    }

    fn last(mut self) -> Option<T> {
        self.list.pop_back()
    }
}

impl<T, A: Allocator<T>> DoubleEndedIterator for IntoIter<T, A> {
    fn next_back(&mut self) -> Option<T> {
        self.list.pop_back()
    }
}

impl<T, A: Allocator<T>> ExactSizeIterator for IntoIter<T, A> {}

impl<T, A: Allocator<T>> FusedIterator for IntoIter<T, A> {}

impl<T, A: Allocator<T>> IntoIterator for List<T, A> {
    type Item = T;
    type IntoIter = IntoIter<T, A>;

    fn into_iter(self) -> IntoIter<T, A> {
        IntoIter { list: self }
    }
}

impl<'a, T, A: Allocator<T>> IntoIterator for &'a List<T, A> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T, A: Allocator<T>> IntoIterator for &'a mut List<T, A> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}

/// Collects into a heap-backed list. Use [`List::try_from_iter_in`] to
/// collect into another allocator.
impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = List::new();
        list.extend(iter);
        list
    }
}

/// Appends every item at the back.
///
/// # Panics
///
/// Panics if the allocator runs out of space; items pushed before that
/// stay in the list.
impl<T, A: Allocator<T>> Extend<T> for List<T, A> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push_back(item);
        }
    }
}

impl<'a, T: 'a + Copy, A: Allocator<T>> Extend<&'a T> for List<T, A> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied())
    }
}

impl<'a, T: 'a, A: Allocator<T> + 'a> Iterator for CursorIter<'a, T, A> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.cursor.current();
        self.cursor.move_next_cyclic();
        current
    }
}

impl<'a, T: 'a, A: Allocator<T> + 'a> Iterator for CursorBackIter<'a, T, A> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.cursor.move_prev_cyclic();
        self.cursor.current()
    }
}

/// Turns the cursor into an endless forward walk that yields `None` each
/// time it steps onto the ghost node.
impl<'a, T: 'a, A: Allocator<T> + 'a> IntoIterator for Cursor<'a, T, A> {
    type Item = &'a T;
    type IntoIter = CursorIter<'a, T, A>;

    fn into_iter(self) -> Self::IntoIter {
        CursorIter { cursor: self }
    }
}
