use crate::allocator::Allocator;
use crate::error::{alloc_failed, AllocError};
use crate::list::{List, NodeAllocator};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

impl<T, A: Allocator<T>> List<T, A> {
    /// The elements in order. A released list has none, so the comparison
    /// and hashing impls treat it as empty.
    fn elements(&self) -> impl Iterator<Item = &'_ T> + '_ {
        (!self.is_released()).then(|| self.iter()).into_iter().flatten()
    }
}

/// Lists are equal when they hold equal elements in the same order,
/// whatever allocators they live in.
impl<T: PartialEq, A: Allocator<T>, B: Allocator<T>> PartialEq<List<T, B>> for List<T, A> {
    fn eq(&self, other: &List<T, B>) -> bool {
        self.len() == other.len() && self.elements().eq(other.elements())
    }
}

impl<T: Eq, A: Allocator<T>> Eq for List<T, A> {}

impl<T: PartialOrd, A: Allocator<T>> PartialOrd for List<T, A> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.elements().partial_cmp(other.elements())
    }
}

impl<T: Ord, A: Allocator<T>> Ord for List<T, A> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.elements().cmp(other.elements())
    }
}

/// Deep-copies every element, in order, into a list whose nodes come from
/// a clone of this list's allocator.
///
/// # Panics
///
/// Panics if the cloned allocator runs out of space. See
/// [`List::try_clone`] for the fallible version.
impl<T: Clone, A: Allocator<T>> Clone for List<T, A>
where
    NodeAllocator<T, A>: Clone,
{
    fn clone(&self) -> Self {
        self.try_clone().unwrap_or_else(|err| alloc_failed(err))
    }

    /// Reuses the nodes already in `self`: the common prefix is cloned
    /// element by element, the rest is either appended or removed.
    fn clone_from(&mut self, source: &Self) {
        if self.is_released() {
            *self = source.clone();
            return;
        }
        let mut cursor = self.begin_mut();
        for element in source {
            match cursor.current_mut() {
                Some(current) => current.clone_from(element),
                None => cursor.insert(element.clone()),
            }
            cursor.move_next_cyclic();
        }
        while cursor.remove().is_some() {}
    }
}

impl<T: Hash, A: Allocator<T>> Hash for List<T, A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for elt in self.elements() {
            elt.hash(state);
        }
        self.len().hash(state);
    }
}

impl<T, A: Allocator<T>> List<T, A> {
    /// Returns `true` if the `List` contains an element equal to the given value.
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
    /// assert_eq!(list.contains(&0), true);
    /// assert_eq!(list.contains(&10), false);
    /// ```
    pub fn contains(&self, x: &T) -> bool
    where
        T: PartialEq<T>,
    {
        self.iter().any(|e| e == x)
    }

    /// Deep-copies the list, or returns the error if the cloned allocator
    /// runs out of space.
    ///
    /// The copy allocates from a clone of this list's allocator. For a
    /// [`BumpAllocator`](crate::BumpAllocator) that clone starts where the
    /// original stopped, so the copy only fits in what the original had
    /// left.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::{BumpAllocator, List};
    ///
    /// let mut list = List::new_in(BumpAllocator::<i32, 1024>::new());
    /// list.extend([1, 10, 2]);
    ///
    /// let copy = list.try_clone().unwrap();
    /// list.push_back(3);
    /// assert_eq!(copy.to_string(), "1 10 2");
    /// ```
    pub fn try_clone(&self) -> Result<Self, AllocError>
    where
        T: Clone,
        NodeAllocator<T, A>: Clone,
    {
        let mut list = Self::try_with_node_alloc(self.allocator().clone())?;
        for element in self {
            list.try_push_back(element.clone())?;
        }
        Ok(list)
    }
}
