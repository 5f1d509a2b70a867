//! Doubly linked list with a pluggable node allocator.
//!
//! Nodes live in an index slab: parallel vectors of links, values, and the
//! allocator [`Block`] reserved for each node. Slot 0 is a sentinel that closes
//! the ring, so the first element is `links[0].next` and the end position is
//! the sentinel itself. Every node reserves room for one `(link, value)` pair
//! from the list's allocator before it is linked in, which lets a fixed-size
//! arena bound how many nodes a list may hold.
//!
//! Each slot carries a generation that advances whenever its element is
//! removed, so a [`Position`] taken before a removal never names the element
//! that later reuses the slot.

use std::cmp::Reverse;
use std::fmt;
use std::iter::FusedIterator;

use tessera_memory::{AllocError, Allocator, Block, HeapAllocator};

use crate::error::{BoxError, ContainerError, PushError};

const SENTINEL: usize = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Link {
    prev: usize,
    next: usize,
}

impl Link {
    const fn detached(slot: usize) -> Self {
        Self {
            prev: slot,
            next: slot,
        }
    }
}

/// What each node costs the allocator.
type Node<T> = (Link, T);

/// A cursor into a [`List`].
///
/// Positions stay valid until the element they name is removed; after that
/// they are stale and name nothing, even once the slot holds a new element.
/// The end position never becomes invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    slot: usize,
    generation: u32,
}

/// A doubly linked list whose nodes are reserved through an [`Allocator`].
pub struct List<T, A: Allocator<T> = HeapAllocator<T>> {
    links: Vec<Link>,
    values: Vec<Option<T>>,
    blocks: Vec<Option<Block>>,
    // Not truncated by `clear`, so reused slot numbers keep advancing.
    generations: Vec<u32>,
    vacant: Vec<usize>,
    len: usize,
    alloc: A,
}

impl<T> List<T> {
    /// Create a list of `n` default values on the heap.
    pub fn with_len(n: usize) -> Result<Self, AllocError>
    where
        T: Default,
    {
        Self::with_len_in(n, HeapAllocator::new())
    }

    /// Create a list of `n` clones of `value` on the heap.
    pub fn from_elem(n: usize, value: &T) -> Result<Self, AllocError>
    where
        T: Clone,
    {
        Self::from_elem_in(n, value, HeapAllocator::new())
    }
}

impl<T, A: Allocator<T> + Default> List<T, A> {
    /// Create an empty list with a default allocator.
    #[must_use]
    pub fn new() -> Self {
        Self::new_in(A::default())
    }
}

impl<T, A: Allocator<T> + Default> Default for List<T, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, A: Allocator<T>> List<T, A> {
    /// Create an empty list drawing nodes from `alloc`.
    pub fn new_in(alloc: A) -> Self {
        Self {
            links: vec![Link::detached(SENTINEL)],
            values: vec![None],
            blocks: vec![None],
            generations: vec![0],
            vacant: Vec::new(),
            len: 0,
            alloc,
        }
    }

    /// Create a list of `n` default values drawing nodes from `alloc`.
    ///
    /// On failure every node already built is released.
    pub fn with_len_in(n: usize, alloc: A) -> Result<Self, AllocError>
    where
        T: Default,
    {
        let mut list = Self::new_in(alloc);
        for _ in 0..n {
            list.push_back(T::default()).map_err(PushError::into_error)?;
        }
        Ok(list)
    }

    /// Create a list of `n` clones of `value` drawing nodes from `alloc`.
    pub fn from_elem_in(n: usize, value: &T, alloc: A) -> Result<Self, AllocError>
    where
        T: Clone,
    {
        let mut list = Self::new_in(alloc);
        for _ in 0..n {
            list.push_back(value.clone()).map_err(PushError::into_error)?;
        }
        Ok(list)
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the list holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// A copy of the allocator handle.
    pub fn get_allocator(&self) -> A {
        self.alloc.clone()
    }

    fn node_allocator(&self) -> A::Rebind<Node<T>> {
        self.alloc.rebind::<Node<T>>()
    }

    fn position(&self, slot: usize) -> Position {
        Position {
            slot,
            generation: self.generations[slot],
        }
    }

    /// Whether `pos` names a live element of this list.
    fn is_element(&self, pos: Position) -> bool {
        pos.slot != SENTINEL
            && self.generations.get(pos.slot) == Some(&pos.generation)
            && self.values.get(pos.slot).is_some_and(Option::is_some)
    }

    /// Whether `pos` is a live element or the end.
    fn is_current(&self, pos: Position) -> bool {
        pos.slot == SENTINEL || self.is_element(pos)
    }

    fn acquire_slot(&mut self) -> usize {
        if let Some(slot) = self.vacant.pop() {
            return slot;
        }
        let slot = self.links.len();
        self.links.push(Link::detached(slot));
        self.values.push(None);
        self.blocks.push(None);
        if self.generations.len() == slot {
            self.generations.push(0);
        }
        slot
    }

    /// Store `value` in a fresh slot and splice it in before `at`.
    fn link_before(&mut self, at: usize, block: Block, value: T) -> usize {
        let slot = self.acquire_slot();
        self.alloc.construct(&mut self.values[slot], value);
        self.blocks[slot] = Some(block);
        let prev = self.links[at].prev;
        self.links[slot] = Link { prev, next: at };
        self.links[prev].next = slot;
        self.links[at].prev = slot;
        self.len += 1;
        slot
    }

    fn unlink(&mut self, slot: usize) -> Option<T> {
        debug_assert_ne!(slot, SENTINEL, "the sentinel is never unlinked");
        let Link { prev, next } = self.links[slot];
        self.links[prev].next = next;
        self.links[next].prev = prev;
        self.links[slot] = Link::detached(slot);
        let value = self.alloc.destroy(&mut self.values[slot]);
        if let Some(block) = self.blocks[slot].take() {
            self.node_allocator().deallocate(block);
        }
        self.generations[slot] = self.generations[slot].wrapping_add(1);
        self.vacant.push(slot);
        self.len -= 1;
        value
    }

    fn insert_before(&mut self, at: usize, value: T) -> Result<usize, PushError<T>> {
        match self.node_allocator().allocate(1) {
            Ok(block) => Ok(self.link_before(at, block, value)),
            Err(error) => Err(PushError::new(value, error)),
        }
    }

    fn try_insert_before_with<F, E>(&mut self, at: usize, f: F) -> Result<usize, ContainerError>
    where
        F: FnOnce() -> Result<T, E>,
        E: Into<BoxError>,
    {
        let node_alloc = self.node_allocator();
        let block = node_alloc.allocate(1)?;
        match f() {
            Ok(value) => Ok(self.link_before(at, block, value)),
            Err(err) => {
                node_alloc.deallocate(block);
                Err(ContainerError::Construct(err.into()))
            }
        }
    }

    /// Append an element. On allocation failure the list is unchanged and
    /// the value comes back inside the error.
    pub fn push_back(&mut self, value: T) -> Result<(), PushError<T>> {
        self.insert_before(SENTINEL, value).map(drop)
    }

    /// Prepend an element.
    pub fn push_front(&mut self, value: T) -> Result<(), PushError<T>> {
        let first = self.links[SENTINEL].next;
        self.insert_before(first, value).map(drop)
    }

    /// Append the result of a fallible constructor.
    ///
    /// Node memory is reserved first; if the constructor then fails the
    /// reservation is returned and the list is unchanged.
    pub fn try_push_back_with<F, E>(&mut self, f: F) -> Result<(), ContainerError>
    where
        F: FnOnce() -> Result<T, E>,
        E: Into<BoxError>,
    {
        self.try_insert_before_with(SENTINEL, f).map(drop)
    }

    /// Prepend the result of a fallible constructor.
    pub fn try_push_front_with<F, E>(&mut self, f: F) -> Result<(), ContainerError>
    where
        F: FnOnce() -> Result<T, E>,
        E: Into<BoxError>,
    {
        let first = self.links[SENTINEL].next;
        self.try_insert_before_with(first, f).map(drop)
    }

    /// Remove and return the last element.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let last = self.links[SENTINEL].prev;
        self.unlink(last)
    }

    /// Remove and return the first element.
    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let first = self.links[SENTINEL].next;
        self.unlink(first)
    }

    /// First element.
    pub fn front(&self) -> Option<&T> {
        self.get(self.begin())
    }

    /// Last element.
    pub fn back(&self) -> Option<&T> {
        self.get(self.prev(self.end()))
    }

    /// Mutable first element.
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.get_mut(self.begin())
    }

    /// Mutable last element.
    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.get_mut(self.prev(self.end()))
    }

    /// Position of the first element, or [`end`](List::end) when empty.
    pub fn begin(&self) -> Position {
        self.position(self.links[SENTINEL].next)
    }

    /// The past-the-end position.
    pub fn end(&self) -> Position {
        self.position(SENTINEL)
    }

    /// The position after `pos`. The end position wraps to the first element
    /// and a stale position leads to the end.
    pub fn next(&self, pos: Position) -> Position {
        if !self.is_current(pos) {
            return self.end();
        }
        self.position(self.links[pos.slot].next)
    }

    /// The position before `pos`. The first element wraps to the end and a
    /// stale position leads to the end.
    pub fn prev(&self, pos: Position) -> Position {
        if !self.is_current(pos) {
            return self.end();
        }
        self.position(self.links[pos.slot].prev)
    }

    /// Element at `pos`, or `None` for the end or a stale position.
    pub fn get(&self, pos: Position) -> Option<&T> {
        if !self.is_element(pos) {
            return None;
        }
        self.values[pos.slot].as_ref()
    }

    /// Mutable element at `pos`.
    pub fn get_mut(&mut self, pos: Position) -> Option<&mut T> {
        if !self.is_element(pos) {
            return None;
        }
        self.values[pos.slot].as_mut()
    }

    /// Insert `value` before `pos` and return the new element's position.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is neither an element of this list nor its end.
    pub fn insert(&mut self, pos: Position, value: T) -> Result<Position, PushError<T>> {
        assert!(
            self.is_current(pos),
            "insert position does not belong to this list"
        );
        self.insert_before(pos.slot, value)
            .map(|slot| self.position(slot))
    }

    /// Remove the element at `pos` and return the position that followed it.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is not an element of this list.
    pub fn erase(&mut self, pos: Position) -> Position {
        assert!(self.is_element(pos), "erase position is not an element");
        let next = self.links[pos.slot].next;
        self.unlink(pos.slot);
        self.position(next)
    }

    /// Remove the element at `pos` and return it, or `None` if `pos` is the
    /// end or no longer names an element.
    pub fn remove(&mut self, pos: Position) -> Option<T> {
        if self.is_element(pos) {
            self.unlink(pos.slot)
        } else {
            None
        }
    }

    /// Remove every element, returning node blocks newest first.
    pub fn clear(&mut self) {
        let mut live: Vec<usize> = (1..self.links.len())
            .filter(|&slot| self.blocks[slot].is_some())
            .collect();
        live.sort_unstable_by_key(|&slot| Reverse(self.blocks[slot].map_or(0, |b| b.offset)));
        for slot in live {
            self.unlink(slot);
        }
        self.links.truncate(1);
        self.values.truncate(1);
        self.blocks.truncate(1);
        self.links[SENTINEL] = Link::detached(SENTINEL);
        self.vacant.clear();
    }

    /// Append every item, stopping at the first allocation failure.
    pub fn try_extend<I>(&mut self, iter: I) -> Result<(), PushError<T>>
    where
        I: IntoIterator<Item = T>,
    {
        iter.into_iter().try_for_each(|value| self.push_back(value))
    }

    /// Front-to-back iterator.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            links: &self.links,
            values: &self.values,
            front: self.links[SENTINEL].next,
            back: self.links[SENTINEL].prev,
            len: self.len,
        }
    }

    /// Front-to-back iterator yielding mutable references.
    ///
    /// Creating the iterator builds a table with one entry per slot, live or
    /// vacated, so it costs O(slots) time and memory. The slot count is the
    /// largest length the list reached since it was last cleared.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            front: self.links[SENTINEL].next,
            back: self.links[SENTINEL].prev,
            len: self.len,
            links: &self.links,
            values: self.values.iter_mut().map(Option::as_mut).collect(),
        }
    }

    /// Copy every element into a new list drawing from `alloc`.
    fn copy_in(&self, alloc: A) -> Result<Self, AllocError>
    where
        T: Clone,
    {
        let mut copy = Self::new_in(alloc);
        for value in self {
            copy.push_back(value.clone()).map_err(PushError::into_error)?;
        }
        Ok(copy)
    }

    /// Copy-construct, using the allocator chosen by
    /// [`select_on_container_copy`](Allocator::select_on_container_copy).
    pub fn try_clone(&self) -> Result<Self, AllocError>
    where
        T: Clone,
    {
        self.copy_in(self.alloc.select_on_container_copy())
    }

    /// Replace the contents with a copy of `source`.
    ///
    /// The copy draws from `source`'s allocator when the allocator propagates
    /// on copy assignment, otherwise from this list's. It is built completely
    /// before anything is replaced, so on failure `self` is untouched. The
    /// old nodes go back to the old allocator.
    pub fn assign_from(&mut self, source: &Self) -> Result<(), AllocError>
    where
        T: Clone,
    {
        let alloc = if A::PROPAGATE_ON_COPY_ASSIGNMENT {
            source.alloc.clone()
        } else {
            self.alloc.clone()
        };
        let mut copy = source.copy_in(alloc)?;
        std::mem::swap(self, &mut copy);
        Ok(())
    }
}

impl<T, A: Allocator<T>> Drop for List<T, A> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T, A, B> PartialEq<List<T, B>> for List<T, A>
where
    T: PartialEq,
    A: Allocator<T>,
    B: Allocator<T>,
{
    fn eq(&self, other: &List<T, B>) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq, A: Allocator<T>> Eq for List<T, A> {}

impl<T: fmt::Debug, A: Allocator<T>> fmt::Debug for List<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
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

impl<T, A: Allocator<T>> IntoIterator for List<T, A> {
    type Item = T;
    type IntoIter = IntoIter<T, A>;

    fn into_iter(self) -> IntoIter<T, A> {
        IntoIter { list: self }
    }
}

/// Borrowing iterator over a [`List`].
pub struct Iter<'a, T> {
    links: &'a [Link],
    values: &'a [Option<T>],
    front: usize,
    back: usize,
    len: usize,
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            links: self.links,
            values: self.values,
            front: self.front,
            back: self.back,
            len: self.len,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.len == 0 {
            return None;
        }
        let slot = self.front;
        self.front = self.links[slot].next;
        self.len -= 1;
        self.values[slot].as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.len == 0 {
            return None;
        }
        let slot = self.back;
        self.back = self.links[slot].prev;
        self.len -= 1;
        self.values[slot].as_ref()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

/// Mutably borrowing iterator over a [`List`].
///
/// Each slot's reference is handed out at most once, so the iterator follows
/// the shared links while taking references out of a per-slot table.
pub struct IterMut<'a, T> {
    links: &'a [Link],
    values: Vec<Option<&'a mut T>>,
    front: usize,
    back: usize,
    len: usize,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<&'a mut T> {
        if self.len == 0 {
            return None;
        }
        let slot = self.front;
        self.front = self.links[slot].next;
        self.len -= 1;
        self.values[slot].take()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    fn next_back(&mut self) -> Option<&'a mut T> {
        if self.len == 0 {
            return None;
        }
        let slot = self.back;
        self.back = self.links[slot].prev;
        self.len -= 1;
        self.values[slot].take()
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> FusedIterator for IterMut<'_, T> {}

/// Owning iterator over a [`List`].
pub struct IntoIter<T, A: Allocator<T>> {
    list: List<T, A>,
}

impl<T, A: Allocator<T>> Iterator for IntoIter<T, A> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.list.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len, Some(self.list.len))
    }
}

impl<T, A: Allocator<T>> DoubleEndedIterator for IntoIter<T, A> {
    fn next_back(&mut self) -> Option<T> {
        self.list.pop_back()
    }
}

impl<T, A: Allocator<T>> ExactSizeIterator for IntoIter<T, A> {}

impl<T, A: Allocator<T>> FusedIterator for IntoIter<T, A> {}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_memory::{StackAllocator, StackStorage};

    fn collect<T: Clone, A: Allocator<T>>(list: &List<T, A>) -> Vec<T> {
        list.iter().cloned().collect()
    }

    #[test]
    fn empty_list() {
        let list: List<i32> = List::new();
        assert!(list.is_empty());
        assert_eq!(list.begin(), list.end());
        assert_eq!(list.front(), None);
        assert_eq!(list.back(), None);
        assert_eq!(list.iter().next(), None);
    }

    #[test]
    fn push_and_pop_both_ends() {
        let mut list: List<i32> = List::new();
        list.push_back(2).unwrap();
        list.push_back(3).unwrap();
        list.push_front(1).unwrap();
        assert_eq!(collect(&list), [1, 2, 3]);
        assert_eq!(list.len(), 3);
        assert_eq!(list.pop_front(), Some(1));
        assert_eq!(list.pop_back(), Some(3));
        assert_eq!(list.pop_back(), Some(2));
        assert_eq!(list.pop_back(), None);
        assert!(list.is_empty());
    }

    #[test]
    fn slots_are_recycled() {
        let mut list: List<i32> = List::new();
        for i in 0..4 {
            list.push_back(i).unwrap();
        }
        list.pop_front();
        list.pop_front();
        list.push_back(10).unwrap();
        list.push_back(11).unwrap();
        assert_eq!(list.links.len(), 5);
        assert_eq!(collect(&list), [2, 3, 10, 11]);
    }

    #[test]
    fn positions_walk_and_edit() {
        let mut list: List<char> = List::new();
        list.try_extend("acd".chars()).unwrap();
        let c = list.next(list.begin());
        let b = list.insert(c, 'b').unwrap();
        assert_eq!(list.get(b), Some(&'b'));
        assert_eq!(collect(&list), ['a', 'b', 'c', 'd']);

        let after = list.erase(b);
        assert_eq!(list.get(after), Some(&'c'));
        *list.get_mut(after).unwrap() = 'C';
        assert_eq!(list.remove(list.begin()), Some('a'));
        assert_eq!(list.remove(list.end()), None);
        let end = list.insert(list.end(), 'e').unwrap();
        assert_eq!(list.next(end), list.end());
        assert_eq!(list.prev(list.begin()), list.end());
        assert_eq!(collect(&list), ['C', 'd', 'e']);
    }

    #[test]
    fn removed_position_stays_stale_after_slot_reuse() {
        let mut list: List<i32> = List::new();
        list.try_extend([1, 2, 3]).unwrap();
        let first = list.begin();
        assert_eq!(list.remove(first), Some(1));
        list.push_back(42).unwrap();
        assert_eq!(list.links.len(), 4, "the vacated slot is reused");

        assert_eq!(list.get(first), None);
        assert_eq!(list.remove(first), None);
        assert_eq!(list.next(first), list.end());
        assert_eq!(list.prev(first), list.end());
        assert_eq!(collect(&list), [2, 3, 42]);
    }

    #[test]
    fn positions_stay_stale_across_clear() {
        let mut list: List<i32> = List::new();
        list.push_back(7).unwrap();
        let old = list.begin();
        list.clear();
        list.push_back(8).unwrap();
        assert_ne!(list.begin(), old);
        assert_eq!(list.get(old), None);
        assert_eq!(list.front(), Some(&8));
    }

    #[test]
    #[should_panic(expected = "erase position is not an element")]
    fn erasing_stale_position_panics() {
        let mut list: List<i32> = List::new();
        list.push_back(1).unwrap();
        let pos = list.begin();
        list.pop_front();
        list.push_back(2).unwrap();
        list.erase(pos);
    }

    #[test]
    #[should_panic(expected = "insert position does not belong to this list")]
    fn inserting_at_stale_position_panics() {
        let mut list: List<i32> = List::new();
        list.push_back(1).unwrap();
        let pos = list.begin();
        list.pop_front();
        list.push_back(2).unwrap();
        let _pos = list.insert(pos, 3);
    }

    #[test]
    fn iter_mut_skips_vacated_slots() {
        let mut list: List<i32> = List::new();
        list.try_extend(0..8).unwrap();
        let mut pos = list.begin();
        while pos != list.end() {
            pos = if list.get(pos).is_some_and(|v| v % 2 == 0) {
                list.erase(pos)
            } else {
                list.next(pos)
            };
        }
        for value in &mut list {
            *value *= 10;
        }
        assert_eq!(collect(&list), [10, 30, 50, 70]);
        assert_eq!(list.iter_mut().len(), 4);
    }

    #[test]
    #[should_panic(expected = "erase position is not an element")]
    fn erasing_end_panics() {
        let mut list: List<u8> = List::new();
        let end = list.end();
        list.erase(end);
    }

    #[test]
    fn iteration_both_ways() {
        let mut list = List::from_elem(0, &0).unwrap();
        list.try_extend(1..=6).unwrap();
        let forward: Vec<i32> = list.iter().copied().collect();
        let mut backward: Vec<i32> = list.iter().rev().copied().collect();
        backward.reverse();
        assert_eq!(forward, backward);

        for value in list.iter_mut().rev().take(2) {
            *value *= 10;
        }
        assert_eq!(collect(&list), [1, 2, 3, 4, 50, 60]);
        let mut iter = list.iter();
        assert_eq!(iter.len(), 6);
        assert_eq!(iter.next_back(), Some(&60));
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.len(), 4);
        assert!(list.into_iter().rev().eq([60, 50, 4, 3, 2, 1]));
    }

    #[test]
    fn sized_constructors() {
        let zeros: List<u64> = List::with_len(3).unwrap();
        assert_eq!(collect(&zeros), [0, 0, 0]);
        let words = List::from_elem(2, &String::from("hi")).unwrap();
        assert_eq!(collect(&words), ["hi", "hi"]);
        assert_eq!(format!("{words:?}"), r#"["hi", "hi"]"#);
    }

    #[test]
    fn stack_arena_bounds_node_count() {
        let storage = StackStorage::<256>::new();
        let alloc = StackAllocator::<u64, 256>::new(&storage);
        let node = std::mem::size_of::<Node<u64>>();
        let mut list = List::new_in(alloc);
        let mut pushed = 0;
        while list.push_back(pushed).is_ok() {
            pushed += 1;
        }
        assert_eq!(list.len(), 256 / node);
        let err = list.push_back(99).unwrap_err();
        assert!(matches!(err.error(), AllocError::Exhausted { .. }));
        assert_eq!(err.into_inner(), 99);

        while list.pop_back().is_some() {}
        assert_eq!(storage.used(), 0);
    }

    #[test]
    fn drop_returns_every_block() {
        let storage = StackStorage::<1024>::new();
        {
            let mut list = List::new_in(StackAllocator::<String, 1024>::new(&storage));
            list.try_extend(["a", "b", "c"].map(String::from)).unwrap();
            list.push_front("z".to_string()).unwrap();
            list.pop_front();
            list.push_front("y".to_string()).unwrap();
            assert!(storage.used() > 0);
        }
        assert_eq!(storage.used(), 0);
    }

    #[test]
    fn failing_constructor_returns_reservation() {
        let storage = StackStorage::<512>::new();
        let mut list = List::new_in(StackAllocator::<u32, 512>::new(&storage));
        list.push_back(1).unwrap();
        let used = storage.used();
        let err = list
            .try_push_back_with(|| "nope".parse::<u32>())
            .unwrap_err();
        assert!(matches!(err, ContainerError::Construct(_)));
        assert_eq!(storage.used(), used);
        assert_eq!(list.len(), 1);
        list.try_push_front_with(|| "7".parse::<u32>()).unwrap();
        assert_eq!(collect(&list), [7, 1]);
    }

    #[test]
    fn clone_and_assign() {
        let mut source: List<i32> = List::new();
        source.try_extend([1, 2, 3]).unwrap();
        let copy = source.try_clone().unwrap();
        assert_eq!(copy, source);

        let mut target = List::with_len(10).unwrap();
        target.assign_from(&source).unwrap();
        assert_eq!(collect(&target), [1, 2, 3]);
        assert_eq!(collect(&source), [1, 2, 3]);
        source.clear();
        assert_eq!(target.len(), 3);
        assert!(source.is_empty());
    }
}
