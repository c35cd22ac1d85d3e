use std::fmt::{self, Debug, Display, Formatter};
use std::io;
use std::marker::PhantomData;
use std::mem::{self, MaybeUninit};
use std::ptr::NonNull;

use crate::allocator::{Allocator, Global};
use crate::error::{alloc_failed, AllocError, ListError};
use crate::list::cursor::{Cursor, CursorMut};
use crate::{Iter, IterMut};

pub mod cursor;
pub mod iterator;

mod algorithms;

/// The allocator a `List<T, A>` actually allocates its nodes from:
/// `A` rebound to the node type.
pub type NodeAllocator<T, A> = <A as Allocator<T>>::Rebind<Node<T>>;

/// The `List` is a doubly-linked list closed into a ring by a sentinel
/// ("ghost") node, with every node obtained from a pluggable [`Allocator`].
/// It allows inserting and removing elements at both ends, or at any cursor
/// position, in constant time.
///
/// The `List` contains:
/// - a pointer `ghost` to the sentinel node, allocated as soon as the list
///   is created and released only when it is dropped;
/// - the length `len`, so that [`List::len`] is *O*(1);
/// - the node allocator, which is `A` [rebound](Allocator::rebind) to the
///   internal node type.
///
/// The first element is `ghost.next` and the last is `ghost.prev`; in an
/// empty list both point back to the ghost node itself.
///
/// # Moving out
///
/// [`List::take`] moves the whole ring (sentinel, nodes and allocator) into
/// a new list and leaves a *released* shell behind. A released list reports
/// `len() == 0`, can be dropped or overwritten, and panics on any other
/// operation.
pub struct List<T, A: Allocator<T> = Global<T>> {
    ghost: Option<NonNull<Node<T>>>,
    /// the number of elements, not counting the ghost node
    len: usize,
    alloc: Option<NodeAllocator<T, A>>,
    _marker: PhantomData<Box<Node<T>>>,
}

/// A node of a [`List`].
///
/// It is only exposed so that allocators can be rebound to it; its content
/// is private to the list.
pub struct Node<T> {
    pub(crate) next: NonNull<Node<T>>,
    pub(crate) prev: NonNull<Node<T>>,
    /// Never initialised in the ghost node.
    pub(crate) element: MaybeUninit<T>,
}

#[cold]
#[track_caller]
fn released() -> ! {
    panic!("list used after its contents were moved out by `List::take`")
}

pub(crate) unsafe fn connect<T>(mut prev: NonNull<Node<T>>, mut next: NonNull<Node<T>>) {
    prev.as_mut().next = next;
    next.as_mut().prev = prev;
}

// private methods
impl<T, A: Allocator<T>> List<T, A> {
    pub(crate) fn ghost_node(&self) -> NonNull<Node<T>> {
        match self.ghost {
            Some(ghost) => ghost,
            None => released(),
        }
    }
    pub(crate) fn front_node(&self) -> NonNull<Node<T>> {
        // SAFETY: the sentinel's `next` is the front node, or the sentinel
        // itself when empty.
        unsafe { self.ghost_node().as_ref().next }
    }
    pub(crate) fn back_node(&self) -> NonNull<Node<T>> {
        // SAFETY: the sentinel's `prev` is the back node, or the sentinel
        // itself when empty.
        unsafe { self.ghost_node().as_ref().prev }
    }

    fn node_alloc(&mut self) -> &mut NodeAllocator<T, A> {
        match &mut self.alloc {
            Some(alloc) => alloc,
            None => released(),
        }
    }

    /// Create an empty list whose ghost node comes from `alloc`.
    fn try_with_node_alloc(mut alloc: NodeAllocator<T, A>) -> Result<Self, AllocError> {
        let ghost = alloc.allocate(1)?;
        // SAFETY: `ghost` is fresh storage for one node. Its element stays
        // uninitialised for the whole life of the list.
        unsafe {
            ghost.as_ptr().write(Node {
                next: ghost,
                prev: ghost,
                element: MaybeUninit::uninit(),
            });
        }
        Ok(Self {
            ghost: Some(ghost),
            len: 0,
            alloc: Some(alloc),
            _marker: PhantomData,
        })
    }

    /// Allocate a detached node holding `element`.
    ///
    /// Its links point to itself until it is attached.
    fn new_node(&mut self, element: T) -> Result<NonNull<Node<T>>, AllocError> {
        let node = self.node_alloc().allocate(1)?;
        // SAFETY: `node` is fresh storage for one node.
        unsafe {
            node.as_ptr().write(Node {
                next: node,
                prev: node,
                element: MaybeUninit::new(element),
            });
        }
        Ok(node)
    }

    /// Move the element out of a detached node and give its storage back
    /// to the allocator.
    ///
    /// # Safety
    ///
    /// `node` is an element node of this list that is already unlinked. It
    /// is dangling afterwards.
    unsafe fn release_node(&mut self, node: NonNull<Node<T>>) -> T {
        let element = node.as_ref().element.assume_init_read();
        self.node_alloc().deallocate(node, 1);
        element
    }

    /// Splice `node` in between the neighbours `prev` and `next`.
    ///
    /// # Safety
    ///
    /// `prev` and `next` are adjacent nodes of this list and `node` is not
    /// linked anywhere. Adjacency is only checked in debug builds.
    pub(crate) unsafe fn attach_node(
        &mut self,
        prev: NonNull<Node<T>>,
        next: NonNull<Node<T>>,
        node: NonNull<Node<T>>,
    ) {
        #[cfg(debug_assertions)]
        assert_adjacent(prev, next);
        connect(prev, node);
        connect(node, next);
        self.len += 1;
        #[cfg(debug_assertions)]
        {
            assert_adjacent(prev, node);
            assert_adjacent(node, next);
        }
    }

    /// Detach a single element node `node` from the list, release its
    /// storage and return its element.
    ///
    /// # Safety
    ///
    /// `node` is an element node of this list, never the sentinel.
    pub(crate) unsafe fn detach_node(&mut self, node: NonNull<Node<T>>) -> T {
        let (prev, next) = {
            let node = node.as_ref();
            (node.prev, node.next)
        };
        connect(prev, next);
        self.len -= 1;
        #[cfg(debug_assertions)]
        assert_adjacent(prev, next);
        self.release_node(node)
    }

    /// Allocate a node for `element` and link it right before `next`,
    /// returning the new node.
    ///
    /// Nothing is linked if the allocation fails.
    pub(crate) fn try_insert_before(
        &mut self,
        next: NonNull<Node<T>>,
        element: T,
    ) -> Result<NonNull<Node<T>>, AllocError> {
        let node = self.new_node(element)?;
        // SAFETY: `next` is a node of this ring, so `next.prev` and `next`
        // are adjacent.
        unsafe {
            let prev = next.as_ref().prev;
            self.attach_node(prev, next, node);
        }
        Ok(node)
    }
}

impl<T> List<T> {
    /// Create an empty `List` on the global heap.
    ///
    /// # Panics
    ///
    /// Panics if the ghost node cannot be allocated.
    ///
    /// # Examples
    /// ```
    /// use sentinel_list::List;
    /// let list: List<u32> = List::new();
    /// assert!(list.is_empty());
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self::new_in(Global::new())
    }

    /// Create a `List` holding `count` clones of `value`.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::ZeroCount`] if `count` is zero.
    ///
    /// # Examples
    /// ```
    /// use sentinel_list::{List, ListError};
    ///
    /// let list = List::from_elem(3, 42).unwrap();
    /// assert_eq!(list.to_string(), "42 42 42");
    ///
    /// assert_eq!(List::from_elem(0, 42).err(), Some(ListError::ZeroCount));
    /// ```
    pub fn from_elem(count: usize, value: T) -> Result<Self, ListError>
    where
        T: Clone,
    {
        Self::from_elem_in(count, value, Global::new())
    }
}

impl<T, A: Allocator<T>> List<T, A> {
    /// Create an empty `List` whose nodes come from `alloc`.
    ///
    /// # Panics
    ///
    /// Panics if the ghost node cannot be allocated. See
    /// [`List::try_new_in`] for the fallible version.
    ///
    /// # Examples
    /// ```
    /// use sentinel_list::{BumpAllocator, List};
    ///
    /// let mut list = List::new_in(BumpAllocator::<i32, 1024>::new());
    /// list.push_back(1);
    /// assert_eq!(list.front(), Some(&1));
    /// ```
    pub fn new_in(alloc: A) -> Self {
        Self::try_new_in(alloc).unwrap_or_else(|err| alloc_failed(err))
    }

    /// Create an empty `List` whose nodes come from `alloc`, or return the
    /// error if the ghost node cannot be allocated.
    ///
    /// # Examples
    /// ```
    /// use sentinel_list::{BumpAllocator, List};
    ///
    /// // Not even enough room for the ghost node.
    /// let list = List::<i32, _>::try_new_in(BumpAllocator::<i32, 4>::new());
    /// assert!(list.is_err());
    /// ```
    pub fn try_new_in(alloc: A) -> Result<Self, AllocError> {
        Self::try_with_node_alloc(alloc.rebind())
    }

    /// Create a `List` in `alloc` holding `count` clones of `value`.
    ///
    /// The last copy is `value` itself.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::ZeroCount`] if `count` is zero, or
    /// [`ListError::Alloc`] if the allocator runs out of space.
    pub fn from_elem_in(count: usize, value: T, alloc: A) -> Result<Self, ListError>
    where
        T: Clone,
    {
        if count == 0 {
            return Err(ListError::ZeroCount);
        }
        let mut list = Self::try_new_in(alloc)?;
        for _ in 1..count {
            list.try_push_back(value.clone())?;
        }
        list.try_push_back(value)?;
        Ok(list)
    }

    /// Create a `List` in `alloc` from the items of `iter`, in order.
    ///
    /// # Examples
    /// ```
    /// use sentinel_list::{AllocError, BumpAllocator, List};
    ///
    /// let list = List::try_from_iter_in(0..3, BumpAllocator::<i32, 1024>::new()).unwrap();
    /// assert_eq!(list.to_string(), "0 1 2");
    ///
    /// let full = List::try_from_iter_in(0..100, BumpAllocator::<i32, 256>::new());
    /// assert!(matches!(full, Err(AllocError::CapacityExceeded { .. })));
    /// ```
    pub fn try_from_iter_in<I>(iter: I, alloc: A) -> Result<Self, AllocError>
    where
        I: IntoIterator<Item = T>,
    {
        let mut list = Self::try_new_in(alloc)?;
        for item in iter {
            list.try_push_back(item)?;
        }
        Ok(list)
    }

    /// Whether the list holds no elements.
    ///
    /// A released list is empty.
    ///
    /// # Complexity
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::new();
    /// assert!(list.is_empty());
    ///
    /// list.push_front("foo");
    /// assert!(!list.is_empty());
    /// ```
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the length of the `List`.
    ///
    /// # Complexity
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::new();
    ///
    /// list.push_front(2);
    /// assert_eq!(list.len(), 1);
    ///
    /// list.push_front(1);
    /// assert_eq!(list.len(), 2);
    ///
    /// list.push_back(3);
    /// assert_eq!(list.len(), 3);
    /// ```
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the contents of this list were moved out by
    /// [`List::take`].
    #[inline]
    pub fn is_released(&self) -> bool {
        self.ghost.is_none()
    }

    /// Returns the allocator the nodes of this list come from.
    pub fn allocator(&self) -> &NodeAllocator<T, A> {
        match &self.alloc {
            Some(alloc) => alloc,
            None => released(),
        }
    }

    /// Drops every element. The sentinel and the allocator stay.
    ///
    /// # Complexity
    ///
    /// Takes *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::new();
    ///
    /// list.push_front(2);
    /// list.push_front(1);
    /// assert_eq!(list.len(), 2);
    /// assert_eq!(list.front(), Some(&1));
    ///
    /// list.clear();
    /// assert_eq!(list.len(), 0);
    /// assert_eq!(list.front(), None);
    /// ```
    #[inline]
    pub fn clear(&mut self) {
        while self.pop_front().is_some() {}
    }

    /// The first element, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::new();
    /// assert_eq!(list.front(), None);
    ///
    /// list.push_front(1);
    /// assert_eq!(list.front(), Some(&1));
    /// ```
    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.begin().current()
    }

    /// Mutable access to the first element, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::new();
    /// list.push_front(1);
    ///
    /// if let Some(x) = list.front_mut() {
    ///     *x = 5;
    /// }
    /// assert_eq!(list.front(), Some(&5));
    /// ```
    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: the list is not empty, so the front node holds an element.
        Some(unsafe { (*self.front_node().as_ptr()).element.assume_init_mut() })
    }

    /// The last element, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::new();
    /// assert_eq!(list.back(), None);
    ///
    /// list.push_back(1);
    /// assert_eq!(list.back(), Some(&1));
    /// ```
    #[inline]
    pub fn back(&self) -> Option<&T> {
        self.end().previous()
    }

    /// Mutable access to the last element, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::new();
    /// list.push_back(1);
    ///
    /// if let Some(x) = list.back_mut() {
    ///     *x = 5;
    /// }
    /// assert_eq!(list.back(), Some(&5));
    /// ```
    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: the list is not empty, so the back node holds an element.
        Some(unsafe { (*self.back_node().as_ptr()).element.assume_init_mut() })
    }

    /// Prepend `elt`, making it the new front.
    ///
    /// # Complexity
    ///
    /// # Panics
    ///
    /// Panics if the allocator cannot provide a node.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::new();
    ///
    /// list.push_front(2);
    /// assert_eq!(list.front().unwrap(), &2);
    ///
    /// list.push_front(1);
    /// assert_eq!(list.front().unwrap(), &1);
    /// ```
    pub fn push_front(&mut self, elt: T) {
        self.try_push_front(elt)
            .unwrap_or_else(|err| alloc_failed(err))
    }

    /// Fallible [`List::push_front`]. On error the list is left as it was.
    pub fn try_push_front(&mut self, elt: T) -> Result<(), AllocError> {
        self.try_insert_before(self.front_node(), elt).map(drop)
    }

    /// Unlink the front element and hand it back. An empty list stays
    /// empty and gives `None`.
    ///
    /// # Complexity
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::new();
    /// assert_eq!(list.pop_front(), None);
    ///
    /// list.push_front(1);
    /// list.push_front(3);
    /// assert_eq!(list.pop_front(), Some(3));
    /// assert_eq!(list.pop_front(), Some(1));
    /// assert_eq!(list.pop_front(), None);
    /// ```
    pub fn pop_front(&mut self) -> Option<T> {
        let front = self.front_node();
        if front == self.ghost_node() {
            return None;
        }
        // SAFETY: `front` is an element node of this list.
        Some(unsafe { self.detach_node(front) })
    }

    /// Append `elt`, making it the new back.
    ///
    /// # Complexity
    ///
    /// # Panics
    ///
    /// Panics if the allocator cannot provide a node.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::new();
    /// list.push_back(1);
    /// list.push_back(3);
    /// assert_eq!(list.back().unwrap(), &3);
    /// ```
    pub fn push_back(&mut self, elt: T) {
        self.try_push_back(elt)
            .unwrap_or_else(|err| alloc_failed(err))
    }

    /// Fallible [`List::push_back`]. On error the list is left as it was.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::{BumpAllocator, List};
    ///
    /// let mut list = List::new_in(BumpAllocator::<u64, 96>::new());
    /// while list.try_push_back(7).is_ok() {}
    /// assert_eq!(list.len(), 3);
    /// ```
    pub fn try_push_back(&mut self, elt: T) -> Result<(), AllocError> {
        self.try_insert_before(self.ghost_node(), elt).map(drop)
    }

    /// Unlink the back element and hand it back. An empty list stays
    /// empty and gives `None`.
    ///
    /// # Complexity
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::new();
    /// assert_eq!(list.pop_back(), None);
    /// list.push_back(1);
    /// list.push_back(3);
    /// assert_eq!(list.pop_back(), Some(3));
    /// ```
    pub fn pop_back(&mut self) -> Option<T> {
        let back = self.back_node();
        if back == self.ghost_node() {
            return None;
        }
        // SAFETY: `back` is an element node of this list.
        Some(unsafe { self.detach_node(back) })
    }

    /// A [`Cursor`] on position 0, which is the sentinel for an empty list.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let list = List::from([1, 2, 3]);
    /// let cursor = list.begin();
    /// assert_eq!(cursor.current(), Some(&1));
    /// ```
    pub fn begin(&self) -> Cursor<'_, T, A> {
        Cursor::new(self, self.front_node())
    }

    /// A [`Cursor`] on the sentinel, one past the back.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let list = List::from([1, 2, 3]);
    /// let cursor = list.end();
    /// assert_eq!(cursor.current(), None);
    /// assert_eq!(cursor.previous(), Some(&3));
    /// ```
    pub fn end(&self) -> Cursor<'_, T, A> {
        Cursor::new(self, self.ghost_node())
    }

    /// A [`CursorMut`] on position 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::from([1, 2, 3]);
    /// let mut cursor = list.begin_mut();
    ///
    /// if let Some(x) = cursor.current_mut() {
    ///     *x *= 5;
    /// }
    /// assert_eq!(cursor.current(), Some(&5));
    /// ```
    pub fn begin_mut(&mut self) -> CursorMut<'_, T, A> {
        let front = self.front_node();
        CursorMut::new(self, front)
    }

    /// A [`CursorMut`] on the sentinel.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::from([1, 2, 3]);
    /// let mut cursor = list.end_mut();
    ///
    /// if let Some(x) = cursor.previous_mut() {
    ///     *x *= 5;
    /// }
    /// assert_eq!(cursor.previous(), Some(&15));
    /// ```
    pub fn end_mut(&mut self) -> CursorMut<'_, T, A> {
        let ghost = self.ghost_node();
        CursorMut::new(self, ghost)
    }

    /// A [`Cursor`] on position `at`, reached by walking from the nearer end.
    ///
    /// `at == len` gives the sentinel.
    ///
    /// # Panics
    ///
    /// Panics if `at > len`
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let list = List::from([1, 2, 3]);
    /// assert_eq!(list.cursor(1).current(), Some(&2));
    /// assert_eq!(list.cursor(3).current(), None);
    /// ```
    pub fn cursor(&self, at: usize) -> Cursor<'_, T, A> {
        assert!(
            at <= self.len,
            "Cannot create cursor at a nonexistent index"
        );
        if at <= self.len / 2 {
            let mut cursor = self.begin();
            (0..at).for_each(|_| cursor.move_next_cyclic());
            cursor
        } else {
            let mut cursor = self.end();
            (at..self.len).for_each(|_| cursor.move_prev_cyclic());
            cursor
        }
    }

    /// A [`CursorMut`] on position `at`, reached by walking from the nearer end.
    ///
    /// `at == len` gives the sentinel.
    ///
    /// # Panics
    ///
    /// Panics if `at > len`
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::from([1, 2, 3]);
    /// let mut cursor = list.cursor_mut(1);
    ///
    /// if let Some(x) = cursor.current_mut() {
    ///     *x *= 5;
    /// }
    /// assert_eq!(cursor.current(), Some(&10));
    /// assert_eq!(list.cursor_mut(3).current_mut(), None);
    /// ```
    pub fn cursor_mut(&mut self, at: usize) -> CursorMut<'_, T, A> {
        assert!(
            at <= self.len,
            "Cannot create cursor at a nonexistent index"
        );
        if at <= self.len / 2 {
            let mut cursor = self.begin_mut();
            (0..at).for_each(|_| cursor.move_next_cyclic());
            cursor
        } else {
            let len = self.len;
            let mut cursor = self.end_mut();
            (at..len).for_each(|_| cursor.move_prev_cyclic());
            cursor
        }
    }

    /// Borrow the elements front to back.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::new();
    ///
    /// list.push_back(0);
    /// list.push_back(1);
    /// list.push_back(2);
    ///
    /// let mut iter = list.iter();
    /// assert_eq!(iter.next(), Some(&0));
    /// assert_eq!(iter.next(), Some(&1));
    /// assert_eq!(iter.next(), Some(&2));
    /// assert_eq!(iter.next(), None);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Borrow the elements mutably, front to back.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::from([0, 1, 2]);
    ///
    /// for element in list.iter_mut() {
    ///     *element += 10;
    /// }
    ///
    /// let mut iter = list.iter();
    /// assert_eq!(iter.next(), Some(&10));
    /// assert_eq!(iter.next(), Some(&11));
    /// assert_eq!(iter.next(), Some(&12));
    /// assert_eq!(iter.next(), None);
    /// ```
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self)
    }

    /// Link `elt` so that it ends up at position `at`.
    ///
    /// # Complexity
    ///
    /// Takes *O*(*n*) time.
    ///
    /// # Panics
    ///
    /// Panics if `at > len`, or if the allocator cannot provide a node.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::from([1, 2, 3]);
    ///
    /// list.insert(2, 4);
    /// list.insert(4, 5);
    ///
    /// assert_eq!(Vec::from_iter(list), vec![1, 2, 4, 3, 5]);
    /// ```
    pub fn insert(&mut self, at: usize, elt: T) {
        assert!(
            at <= self.len,
            "Cannot insert at an index outside of the list bounds"
        );
        self.cursor_mut(at).insert(elt);
    }

    /// Unlink the element at position `at` and hand it back.
    ///
    /// # Complexity
    ///
    /// Takes *O*(*n*) time.
    ///
    /// # Panics
    ///
    /// Panics if `at >= len`
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::from([3, 2, 1]);
    ///
    /// assert_eq!(list.remove(1), 2);
    /// assert_eq!(list.remove(0), 3);
    /// assert_eq!(list.remove(0), 1);
    /// ```
    pub fn remove(&mut self, at: usize) -> T {
        assert!(
            at < self.len,
            "Cannot remove at an index outside of the list bounds"
        );
        match self.cursor_mut(at).remove() {
            Some(element) => element,
            None => unreachable!("a cursor below `len` points at an element"),
        }
    }

    /// Moves the whole list out, leaving `self` released.
    ///
    /// The sentinel, every node and the allocator are transferred as they
    /// are; no element is copied and no allocation happens. Afterwards
    /// `self` has length 0 and may only be dropped or overwritten.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut a = List::from([1, 2, 3]);
    /// let b = a.take();
    ///
    /// assert_eq!(b.to_string(), "1 2 3");
    /// assert_eq!(a.len(), 0);
    /// assert!(a.is_released());
    ///
    /// a = b.clone();
    /// assert_eq!(a, b);
    /// ```
    pub fn take(&mut self) -> Self {
        Self {
            ghost: self.ghost.take(),
            len: mem::take(&mut self.len),
            alloc: self.alloc.take(),
            _marker: PhantomData,
        }
    }

    /// Writes the elements, separated by spaces, as one line into `out`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let list = List::from([1, 10, 2]);
    /// let mut out = Vec::new();
    /// list.write_to(&mut out).unwrap();
    /// assert_eq!(out, b"1 10 2\n");
    /// ```
    pub fn write_to<W: io::Write>(&self, out: &mut W) -> io::Result<()>
    where
        T: Display,
    {
        writeln!(out, "{}", self)
    }
}

impl<T: Debug, A: Allocator<T>> Debug for List<T, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_released() {
            return f.write_str("List(<released>)");
        }
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Renders the elements in order, separated by single spaces.
impl<T: Display, A: Allocator<T>> Display for List<T, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut iter = self.iter();
        if let Some(first) = iter.next() {
            write!(f, "{}", first)?;
            for element in iter {
                write!(f, " {}", element)?;
            }
        }
        Ok(())
    }
}

impl<T, A: Allocator<T> + Default> Default for List<T, A> {
    fn default() -> Self {
        Self::new_in(A::default())
    }
}

impl<T, const N: usize> From<[T; N]> for List<T> {
    fn from(array: [T; N]) -> Self {
        Self::from_iter(array)
    }
}

#[cfg(debug_assertions)]
fn assert_adjacent<T>(prev: NonNull<Node<T>>, next: NonNull<Node<T>>) {
    unsafe {
        assert_eq!(prev.as_ref().next, next);
        assert_eq!(next.as_ref().prev, prev);
    }
}

impl<T, A: Allocator<T>> Drop for List<T, A> {
    fn drop(&mut self) {
        if let Some(ghost) = self.ghost {
            self.clear();
            // SAFETY: the ghost node came from `allocate(1)` and its element
            // was never initialised, so there is nothing to drop.
            unsafe { self.node_alloc().deallocate(ghost, 1) };
            self.ghost = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::allocator::{BumpAllocator, Global};
    use crate::error::{AllocError, ListError};
    use crate::list::{List, Node};
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::mem;

    type Arena<T, const N: usize> = BumpAllocator<T, N>;

    #[test]
    fn list_create() {
        let mut list = List::<i32>::new();
        assert!(list.is_empty());
        list.push_back(1);
        assert!(!list.is_empty());
        assert_eq!(list.pop_back(), Some(1));
        assert!(list.is_empty());
    }

    #[test]
    fn list_drop() {
        #[derive(Debug)]
        struct DropChecker<'a, T: Copy> {
            value: T,
            dropped: &'a RefCell<Vec<T>>,
        }
        impl<'a, T: Copy> DropChecker<'a, T> {
            fn new(value: T, dropped: &'a RefCell<Vec<T>>) -> Self {
                Self { value, dropped }
            }
        }
        impl<'a, T: Copy> Drop for DropChecker<'a, T> {
            fn drop(&mut self) {
                self.dropped.borrow_mut().push(self.value);
            }
        }
        let dropped = RefCell::new(Vec::<i32>::new());
        let mut list = List::new();
        list.push_back(DropChecker::new(1, &dropped));
        list.push_back(DropChecker::new(2, &dropped));
        list.push_back(DropChecker::new(3, &dropped));
        drop(list);
        assert_eq!(dropped.borrow().as_slice(), &[1, 2, 3]);

        // Moving out transfers ownership: nothing is dropped twice.
        dropped.borrow_mut().clear();
        let mut list = List::new_in(Arena::<_, 1024>::new());
        list.push_back(DropChecker::new(4, &dropped));
        list.push_front(DropChecker::new(5, &dropped));
        let moved = list.take();
        drop(list);
        assert!(dropped.borrow().is_empty());
        drop(moved);
        assert_eq!(dropped.borrow().as_slice(), &[5, 4]);
    }

    #[test]
    fn list_push_and_pop() {
        let mut list = List::new();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);

        assert_eq!(list.front(), None);
        assert_eq!(list.back(), None);
        assert_eq!(list.pop_front(), None);
        assert_eq!(list.pop_back(), None);

        list.push_back(1);
        assert_eq!(list.back(), Some(&1));
        assert_eq!(list.pop_front(), Some(1));
        assert_eq!(list.pop_back(), None);
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);

        list.push_front(1);
        list.push_front(2);
        list.push_back(3);
        assert_eq!(list.back(), Some(&3));
        assert_eq!(list.front(), Some(&2));
        assert_eq!(list.pop_front(), Some(2));
        assert_eq!(list.pop_back(), Some(3));

        assert_eq!(list.front(), Some(&1));
        assert_eq!(list.pop_front(), Some(1));
        assert_eq!(list.front(), None);
        assert_eq!(list.back(), None);
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
    }

    #[test]
    fn list_matches_deque_model() {
        // A fixed pseudo-random sequence of operations, checked against `VecDeque`.
        let mut list = List::new_in(Arena::<u32, 8192>::new());
        let mut model = VecDeque::new();
        let mut seed = 0x2545_f491_u32;
        for step in 0..200 {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            match seed % 4 {
                0 => {
                    list.push_back(step);
                    model.push_back(step);
                }
                1 => {
                    list.push_front(step);
                    model.push_front(step);
                }
                2 => assert_eq!(list.pop_back(), model.pop_back()),
                _ => assert_eq!(list.pop_front(), model.pop_front()),
            }
            assert_eq!(list.len(), model.len());
        }
        assert!(list.iter().eq(model.iter()));
        assert!(list.iter().rev().eq(model.iter().rev()));
    }

    #[test]
    fn list_pop_empty_is_idempotent() {
        let mut list = List::<u8, Arena<u8, 256>>::default();
        for _ in 0..10 {
            assert_eq!(list.pop_back(), None);
            assert_eq!(list.pop_front(), None);
            assert_eq!(list.len(), 0);
        }
        let used = list.allocator().used();
        list.push_back(1);
        assert_eq!(list.allocator().used(), used + mem::size_of::<Node<u8>>());
    }

    #[test]
    fn list_round_trip() {
        let list = List::from([1, 2, 3, 4, 5]);
        assert_eq!(list.len(), 5);
        assert_eq!(Vec::from_iter(list.iter().copied()), vec![1, 2, 3, 4, 5]);

        let mut backwards = Vec::new();
        let mut cursor = list.end();
        while cursor.move_prev().is_ok() {
            backwards.extend(cursor.current().copied());
        }
        assert_eq!(backwards, vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn list_insert_and_remove() {
        fn list_eq<I>(list: &List<i32>, expected: I)
        where
            I: IntoIterator<Item = i32>,
        {
            assert_eq!(
                Vec::from_iter(list.iter().cloned()),
                Vec::from_iter(expected)
            );
        }

        let mut list = List::from_iter(0..10);
        list.insert(5, 10);
        list_eq(&list, (0..5).chain(Some(10)).chain(5..10));

        assert_eq!(list.remove(10), 9);
        assert_eq!(list.back(), Some(&8));
        list_eq(&list, (0..5).chain(Some(10)).chain(5..9));

        list.insert(0, 11);
        assert_eq!(list.front(), Some(&11));
        list_eq(&list, (11..=11).chain((0..5).chain(Some(10)).chain(5..9)));

        assert_eq!(list.remove(0), 11);
        assert_eq!(list.front(), Some(&0));
        list_eq(&list, (0..5).chain(Some(10)).chain(5..9));

        list.insert(10, 12);
        assert_eq!(list.back(), Some(&12));
        list_eq(&list, (0..5).chain(Some(10)).chain(5..9).chain(Some(12)));
    }

    #[test]
    #[should_panic(expected = "Cannot insert at an index outside of the list bounds")]
    fn list_insert_out_of_bounds() {
        let mut list = List::from([1, 2]);
        list.insert(3, 0);
    }

    #[test]
    #[should_panic(expected = "Cannot remove at an index outside of the list bounds")]
    fn list_remove_out_of_bounds() {
        let mut list = List::from([1, 2]);
        list.remove(2);
    }

    #[test]
    fn list_cursor_from_either_end() {
        let list = List::from_iter(0..7);
        for at in 0..7 {
            assert_eq!(list.cursor(at).current(), Some(&at));
        }
        assert!(list.cursor(7).is_end());

        let mut list = List::from_iter(0..5);
        for at in 0..5 {
            *list.cursor_mut(at).current_mut().unwrap() *= 10;
        }
        assert_eq!(list.to_string(), "0 10 20 30 40");
        assert!(List::<i32>::new().cursor(0).is_end());
    }

    #[test]
    fn list_remove_last_index() {
        let mut list = List::from([1, 2, 3]);
        assert_eq!(list.remove(2), 3);
        assert_eq!(list.remove(1), 2);
        assert_eq!(list.remove(0), 1);
        assert!(list.is_empty());
    }

    #[test]
    fn list_walkthrough() {
        let full = List::from([1, 2, 3, 4, 5]);
        assert_eq!(full.len(), 5);

        let mut list = List::new_in(Arena::<i32, 1000>::new());
        list.push_back(1);
        assert_eq!(list.len(), 1);
        assert_eq!(list.to_string(), "1");
        list.push_back(2);
        list.push_back(3);
        assert_eq!(list.to_string(), "1 2 3");
        list.pop_back();
        assert_eq!(list.to_string(), "1 2");
        list.push_front(0);
        assert_eq!(list.to_string(), "0 1 2");
        list.pop_front();
        assert_eq!(list.to_string(), "1 2");

        let mut cursor = list.begin_mut();
        cursor.move_next().unwrap();
        cursor.insert(10);
        assert_eq!(cursor.current(), Some(&10));
        assert_eq!(list.to_string(), "1 10 2");

        let copy = list.clone();
        let mut out = Vec::new();
        copy.write_to(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "1 10 2\n");
    }

    #[test]
    fn list_from_elem() {
        let list = List::from_elem(3, 42).unwrap();
        assert_eq!(Vec::from_iter(list), vec![42, 42, 42]);

        let list = List::from_elem(1, String::from("x")).unwrap();
        assert_eq!(list.front().map(String::as_str), Some("x"));

        assert_eq!(List::from_elem(0, 1).err(), Some(ListError::ZeroCount));

        let tight = List::from_elem_in(100, 7u64, Arena::<u64, 256>::new());
        assert!(matches!(
            tight,
            Err(ListError::Alloc(AllocError::CapacityExceeded { .. }))
        ));
    }

    #[test]
    fn list_arena_exhaustion_is_reported() {
        const NODE: usize = mem::size_of::<Node<i32>>();
        // Room for the ghost node and exactly three elements.
        let mut list = List::new_in(Arena::<i32, { 4 * NODE }>::new());
        assert!(list.try_push_back(1).is_ok());
        assert!(list.try_push_back(2).is_ok());
        assert!(list.try_push_front(0).is_ok());
        assert_eq!(
            list.try_push_back(3),
            Err(AllocError::CapacityExceeded {
                requested: NODE,
                available: 0
            })
        );
        // A failed push leaves the list untouched.
        assert_eq!(list.to_string(), "0 1 2");

        // Freed nodes are not reused by the arena.
        assert_eq!(list.pop_front(), Some(0));
        assert!(list.try_push_front(0).is_err());
        assert_eq!(list.len(), 2);
    }

    #[test]
    #[should_panic(expected = "list allocation failed")]
    fn list_arena_exhaustion_panics() {
        let mut list = List::new_in(Arena::<i32, 64>::new());
        for i in 0..100 {
            list.push_back(i);
        }
    }

    #[test]
    fn list_take() {
        let mut a = List::from([1, 2, 3]);
        let mut b = a.take();
        assert_eq!(Vec::from_iter(b.iter().copied()), vec![1, 2, 3]);
        assert_eq!(b.len(), 3);
        assert_eq!(a.len(), 0);
        assert!(a.is_empty());
        assert!(a.is_released());
        assert_eq!(format!("{:?}", a), "List(<released>)");

        // Reassignment brings a released list back to life.
        a = List::from([4]);
        assert_eq!(a.front(), Some(&4));

        // Move-assignment drops the previous content of the destination.
        b = a.take();
        assert_eq!(Vec::from_iter(b), vec![4]);
        assert!(a.is_released());
    }

    #[test]
    #[should_panic(expected = "moved out")]
    fn list_released_is_checked() {
        let mut a = List::<i32, Global<i32>>::new();
        let _b = a.take();
        a.push_back(1);
    }

    #[test]
    fn list_debug_and_display() {
        let list = List::from(["a", "b"]);
        assert_eq!(format!("{:?}", list), r#"["a", "b"]"#);
        assert_eq!(list.to_string(), "a b");
        assert_eq!(List::<i32>::new().to_string(), "");
    }

    #[test]
    fn list_front_back_mut() {
        let mut list = List::<i32>::new();
        assert_eq!(list.front_mut(), None);
        assert_eq!(list.back_mut(), None);
        list.push_back(1);
        list.push_back(2);
        *list.front_mut().unwrap() += 10;
        *list.back_mut().unwrap() += 20;
        assert_eq!(list.to_string(), "11 22");
    }
}
