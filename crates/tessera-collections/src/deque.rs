//! Double-ended queue built from fixed 16-slot blocks.
//!
//! Elements live in boxed blocks referenced from a growable map. Live elements
//! occupy the absolute slot run `[head, head + len)`; logical index `i` lives
//! in block `(head + i) / BLOCK_SIZE` at offset `(head + i) % BLOCK_SIZE`.
//! Growing at either end either recycles vacated blocks from the other end or
//! adds blocks to the map. Elements never move between slots, so pushes at
//! both ends are amortized O(1) and indexing is O(1).

use std::fmt;
use std::iter::FusedIterator;
use std::ops::{Index, IndexMut};

use crate::error::{BoxError, ContainerError};

/// Number of element slots per block.
pub const BLOCK_SIZE: usize = 16;

type Slots<T> = Box<[Option<T>]>;

fn empty_block<T>() -> Slots<T> {
    (0..BLOCK_SIZE).map(|_| None).collect()
}

/// A double-ended queue with stable block storage.
pub struct Deque<T> {
    map: Vec<Slots<T>>,
    head: usize,
    len: usize,
}

impl<T> Deque<T> {
    /// Create an empty deque. No blocks are allocated until the first push.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            map: Vec::new(),
            head: 0,
            len: 0,
        }
    }

    /// Create a deque holding `n` clones of `value`.
    #[must_use]
    pub fn with_len(n: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::packed(n, std::iter::repeat(value))
    }

    /// Create a deque holding `n` default values.
    #[must_use]
    pub fn with_default(n: usize) -> Self
    where
        T: Default,
    {
        Self::packed(n, std::iter::repeat_with(T::default))
    }

    /// Lay out the first `len` items of `values` from slot 0 in exactly as
    /// many blocks as they need.
    fn packed(len: usize, values: impl Iterator<Item = T>) -> Self {
        let mut values = values.take(len);
        let map = (0..len.div_ceil(BLOCK_SIZE))
            .map(|_| (0..BLOCK_SIZE).map(|_| values.next()).collect())
            .collect();
        Self { map, head: 0, len }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the deque holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of slots in the mapped blocks.
    pub fn capacity(&self) -> usize {
        self.map.len() * BLOCK_SIZE
    }

    /// Number of mapped blocks.
    pub fn block_count(&self) -> usize {
        self.map.len()
    }

    fn slot(&self, abs: usize) -> &Option<T> {
        &self.map[abs / BLOCK_SIZE][abs % BLOCK_SIZE]
    }

    fn slot_mut(&mut self, abs: usize) -> &mut Option<T> {
        &mut self.map[abs / BLOCK_SIZE][abs % BLOCK_SIZE]
    }

    /// Put the cursor in the middle of the map so both ends have room.
    fn recenter(&mut self) {
        debug_assert_eq!(self.len, 0);
        if self.map.is_empty() {
            self.map.push(empty_block());
        }
        self.head = self.capacity() / 2;
    }

    /// Make room after the last slot. Vacated blocks in front of `head` are
    /// recycled to the back when they make up at least half of the map;
    /// otherwise the map grows by its own size.
    fn grow_back(&mut self) {
        let spare = self.head / BLOCK_SIZE;
        if spare > 0 && spare * 2 >= self.map.len() {
            self.map.rotate_left(spare);
            self.head -= spare * BLOCK_SIZE;
            tracing::trace!(spare, blocks = self.map.len(), "deque blocks recycled to back");
            return;
        }
        let extra = self.map.len().max(1);
        self.map.extend((0..extra).map(|_| empty_block()));
        tracing::trace!(extra, blocks = self.map.len(), "deque map grown at back");
    }

    /// Make room before `head`, recycling vacated blocks past the last
    /// element the same way.
    fn grow_front(&mut self) {
        let used_end = (self.head + self.len).div_ceil(BLOCK_SIZE);
        let spare = self.map.len() - used_end;
        if spare > 0 && spare * 2 >= self.map.len() {
            self.map.rotate_right(spare);
            self.head += spare * BLOCK_SIZE;
            tracing::trace!(spare, blocks = self.map.len(), "deque blocks recycled to front");
            return;
        }
        let extra = self.map.len().max(1);
        let mut map: Vec<Slots<T>> = (0..extra).map(|_| empty_block()).collect();
        map.append(&mut self.map);
        self.map = map;
        self.head += extra * BLOCK_SIZE;
        tracing::trace!(extra, blocks = self.map.len(), "deque map grown at front");
    }

    /// Append an element.
    pub fn push_back(&mut self, value: T) {
        if self.len == 0 {
            self.recenter();
        }
        if self.head + self.len == self.capacity() {
            self.grow_back();
        }
        let abs = self.head + self.len;
        *self.slot_mut(abs) = Some(value);
        self.len += 1;
    }

    /// Prepend an element.
    pub fn push_front(&mut self, value: T) {
        if self.len == 0 {
            self.recenter();
        }
        if self.head == 0 {
            self.grow_front();
        }
        self.head -= 1;
        let abs = self.head;
        *self.slot_mut(abs) = Some(value);
        self.len += 1;
    }

    /// Append the result of a fallible constructor.
    ///
    /// The constructor runs before the deque is touched, so on failure the
    /// deque is unchanged.
    pub fn try_push_back_with<F, E>(&mut self, f: F) -> Result<(), ContainerError>
    where
        F: FnOnce() -> Result<T, E>,
        E: Into<BoxError>,
    {
        let value = f().map_err(|err| ContainerError::Construct(err.into()))?;
        self.push_back(value);
        Ok(())
    }

    /// Prepend the result of a fallible constructor.
    pub fn try_push_front_with<F, E>(&mut self, f: F) -> Result<(), ContainerError>
    where
        F: FnOnce() -> Result<T, E>,
        E: Into<BoxError>,
    {
        let value = f().map_err(|err| ContainerError::Construct(err.into()))?;
        self.push_front(value);
        Ok(())
    }

    /// Remove and return the last element.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        let abs = self.head + self.len;
        self.slot_mut(abs).take()
    }

    /// Remove and return the first element.
    pub fn pop_front(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let abs = self.head;
        let value = self.slot_mut(abs).take();
        self.head += 1;
        self.len -= 1;
        value
    }

    /// Element at `index`, or `None` if out of range.
    pub fn get(&self, index: usize) -> Option<&T> {
        if index < self.len {
            self.slot(self.head + index).as_ref()
        } else {
            None
        }
    }

    /// Mutable element at `index`, or `None` if out of range.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index < self.len {
            let abs = self.head + index;
            self.slot_mut(abs).as_mut()
        } else {
            None
        }
    }

    /// Checked access.
    pub fn at(&self, index: usize) -> Result<&T, ContainerError> {
        self.get(index).ok_or(ContainerError::IndexOutOfBounds {
            index,
            len: self.len,
        })
    }

    /// Checked mutable access.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, ContainerError> {
        let len = self.len;
        self.get_mut(index)
            .ok_or(ContainerError::IndexOutOfBounds { index, len })
    }

    /// First element.
    pub fn front(&self) -> Option<&T> {
        self.get(0)
    }

    /// Last element.
    pub fn back(&self) -> Option<&T> {
        self.len.checked_sub(1).and_then(|last| self.get(last))
    }

    /// Mutable first element.
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.get_mut(0)
    }

    /// Mutable last element.
    pub fn back_mut(&mut self) -> Option<&mut T> {
        let last = self.len.checked_sub(1)?;
        self.get_mut(last)
    }

    /// Drop every element. Mapped blocks are kept for reuse.
    pub fn clear(&mut self) {
        for abs in self.head..self.head + self.len {
            *self.slot_mut(abs) = None;
        }
        self.len = 0;
    }

    /// Exchange the elements at `i` and `j`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    pub fn swap(&mut self, i: usize, j: usize) {
        assert!(
            i < self.len && j < self.len,
            "swap indices ({i}, {j}) out of range for length {}",
            self.len
        );
        if i == j {
            return;
        }
        let (a, b) = (self.head + i, self.head + j);
        let first = self.slot_mut(a).take();
        let second = std::mem::replace(self.slot_mut(b), first);
        *self.slot_mut(a) = second;
    }

    /// Insert `value` so that it ends up at `index`, shifting later elements
    /// back. Costs O(`index`).
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, value: T) {
        assert!(
            index <= self.len,
            "insertion index (is {index}) should be <= len (is {})",
            self.len
        );
        self.push_front(value);
        for i in 0..index {
            self.swap(i, i + 1);
        }
    }

    /// Remove and return the element at `index`, shifting earlier elements
    /// forward. Costs O(`index`).
    pub fn remove(&mut self, index: usize) -> Option<T> {
        if index >= self.len {
            return None;
        }
        for i in (0..index).rev() {
            self.swap(i, i + 1);
        }
        self.pop_front()
    }

    /// Front-to-back iterator.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            deque: self,
            front: 0,
            back: self.len,
        }
    }

    /// Front-to-back iterator yielding mutable references.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        let len = self.len;
        if len == 0 {
            return IterMut::default();
        }
        let (start, end) = (self.head, self.head + len - 1);
        let (first_block, last_block) = (start / BLOCK_SIZE, end / BLOCK_SIZE);
        let blocks = &mut self.map[first_block..=last_block];
        let Some((first, rest)) = blocks.split_first_mut() else {
            return IterMut::default();
        };
        match rest.split_last_mut() {
            None => IterMut {
                front: first[start % BLOCK_SIZE..=end % BLOCK_SIZE].iter_mut(),
                len,
                ..IterMut::default()
            },
            Some((last, middle)) => IterMut {
                front: first[start % BLOCK_SIZE..].iter_mut(),
                blocks: middle.iter_mut(),
                back: last[..=end % BLOCK_SIZE].iter_mut(),
                len,
            },
        }
    }
}

impl<T> Default for Deque<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for Deque<T> {
    fn clone(&self) -> Self {
        Self::packed(self.len, self.iter().cloned())
    }

    fn clone_from(&mut self, source: &Self) {
        let mut copy = source.clone();
        std::mem::swap(self, &mut copy);
    }
}

impl<T: PartialEq> PartialEq for Deque<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for Deque<T> {}

impl<T: fmt::Debug> fmt::Debug for Deque<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Index<usize> for Deque<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Some(value) => value,
            None => panic!(
                "index out of bounds: the len is {} but the index is {index}",
                self.len
            ),
        }
    }
}

impl<T> IndexMut<usize> for Deque<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        let len = self.len;
        match self.get_mut(index) {
            Some(value) => value,
            None => panic!("index out of bounds: the len is {len} but the index is {index}"),
        }
    }
}

impl<T> Extend<T> for Deque<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<T> FromIterator<T> for Deque<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut deque = Self::new();
        deque.extend(iter);
        deque
    }
}

impl<'a, T> IntoIterator for &'a Deque<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Deque<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}

impl<T> IntoIterator for Deque<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter { deque: self }
    }
}

/// Borrowing iterator over a [`Deque`].
///
/// Holds a pair of logical indices; each step translates one to its block and
/// offset, so `nth` and `nth_back` are O(1).
pub struct Iter<'a, T> {
    deque: &'a Deque<T>,
    front: usize,
    back: usize,
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            deque: self.deque,
            front: self.front,
            back: self.back,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.front == self.back {
            return None;
        }
        let item = self.deque.get(self.front);
        self.front += 1;
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.back - self.front;
        (n, Some(n))
    }

    fn nth(&mut self, n: usize) -> Option<&'a T> {
        self.front = self.front.saturating_add(n).min(self.back);
        self.next()
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        self.deque.get(self.back)
    }

    fn nth_back(&mut self, n: usize) -> Option<&'a T> {
        self.back = self.back.saturating_sub(n).max(self.front);
        self.next_back()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

/// Mutably borrowing iterator over a [`Deque`].
///
/// Walks a partial first block, whole middle blocks, and a partial last block.
pub struct IterMut<'a, T> {
    front: std::slice::IterMut<'a, Option<T>>,
    blocks: std::slice::IterMut<'a, Slots<T>>,
    back: std::slice::IterMut<'a, Option<T>>,
    len: usize,
}

impl<T> Default for IterMut<'_, T> {
    fn default() -> Self {
        Self {
            front: Default::default(),
            blocks: Default::default(),
            back: Default::default(),
            len: 0,
        }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<&'a mut T> {
        if self.len == 0 {
            return None;
        }
        loop {
            if let Some(slot) = self.front.next() {
                self.len -= 1;
                return slot.as_mut();
            }
            match self.blocks.next() {
                Some(block) => self.front = block.iter_mut(),
                None => break,
            }
        }
        let slot = self.back.next()?;
        self.len -= 1;
        slot.as_mut()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }

    fn nth(&mut self, n: usize) -> Option<&'a mut T> {
        if n >= self.len {
            *self = Self::default();
            return None;
        }
        let mut skip = n;
        if skip >= self.front.len() {
            skip -= self.front.len();
            self.len -= self.front.len();
            let whole = (skip / BLOCK_SIZE).min(self.blocks.len());
            if whole > 0 {
                self.blocks.nth(whole - 1);
            }
            skip -= whole * BLOCK_SIZE;
            self.len -= whole * BLOCK_SIZE;
            self.front = match self.blocks.next() {
                Some(block) => block.iter_mut(),
                None => std::mem::take(&mut self.back),
            };
        }
        if skip > 0 {
            self.front.nth(skip - 1);
            self.len -= skip;
        }
        self.next()
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    fn next_back(&mut self) -> Option<&'a mut T> {
        if self.len == 0 {
            return None;
        }
        loop {
            if let Some(slot) = self.back.next_back() {
                self.len -= 1;
                return slot.as_mut();
            }
            match self.blocks.next_back() {
                Some(block) => self.back = block.iter_mut(),
                None => break,
            }
        }
        let slot = self.front.next_back()?;
        self.len -= 1;
        slot.as_mut()
    }

    fn nth_back(&mut self, n: usize) -> Option<&'a mut T> {
        if n >= self.len {
            *self = Self::default();
            return None;
        }
        let mut skip = n;
        if skip >= self.back.len() {
            skip -= self.back.len();
            self.len -= self.back.len();
            let whole = (skip / BLOCK_SIZE).min(self.blocks.len());
            if whole > 0 {
                self.blocks.nth_back(whole - 1);
            }
            skip -= whole * BLOCK_SIZE;
            self.len -= whole * BLOCK_SIZE;
            self.back = match self.blocks.next_back() {
                Some(block) => block.iter_mut(),
                None => std::mem::take(&mut self.front),
            };
        }
        if skip > 0 {
            self.back.nth_back(skip - 1);
            self.len -= skip;
        }
        self.next_back()
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> FusedIterator for IterMut<'_, T> {}

/// Owning iterator over a [`Deque`].
pub struct IntoIter<T> {
    deque: Deque<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.deque.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.deque.len, Some(self.deque.len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.deque.pop_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}
