/*!
Ordered sequences of elements owned by a [`crate::Metrics`] tree.
*/

use std::{fmt, ops, slice, vec};

/**
An ordered, growable sequence of elements.

Elements are addressed by position. Accessing a position outside of `0..len` through [`Slice::at`] or indexing panics.
*/
#[derive(Clone, PartialEq)]
pub struct Slice<T>(pub(crate) Vec<T>);

impl<T> Slice<T> {
    /**
    Create an empty sequence.
    */
    pub const fn new() -> Self {
        Slice(Vec::new())
    }

    /**
    The number of elements.
    */
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /**
    Get the element at position `i`.

    # Panics

    This method panics if `i` is not less than [`Slice::len`].
    */
    #[track_caller]
    pub fn at(&self, i: usize) -> &T {
        match self.0.get(i) {
            Some(v) => v,
            None => out_of_range(i, self.0.len()),
        }
    }

    /**
    Get the element at position `i` mutably.

    # Panics

    This method panics if `i` is not less than [`Slice::len`].
    */
    #[track_caller]
    pub fn at_mut(&mut self, i: usize) -> &mut T {
        let len = self.0.len();

        match self.0.get_mut(i) {
            Some(v) => v,
            None => out_of_range(i, len),
        }
    }

    pub fn get(&self, i: usize) -> Option<&T> {
        self.0.get(i)
    }

    pub fn get_mut(&mut self, i: usize) -> Option<&mut T> {
        self.0.get_mut(i)
    }

    /**
    Reserve space so that at least `capacity` elements fit without reallocating.
    */
    pub fn ensure_capacity(&mut self, capacity: usize) {
        self.0.reserve(capacity.saturating_sub(self.0.len()));
    }

    /**
    Move every element to the end of `dest`, leaving this sequence empty.
    */
    pub fn move_and_append_to(&mut self, dest: &mut Slice<T>) {
        if dest.0.is_empty() {
            // Keep whichever allocation is larger
            if dest.0.capacity() < self.0.capacity() {
                std::mem::swap(&mut self.0, &mut dest.0);
                return;
            }
        }

        dest.0.append(&mut self.0);
    }

    /**
    Remove every element matching `f`, preserving the order of the rest.
    */
    pub fn remove_if(&mut self, mut f: impl FnMut(&T) -> bool) {
        self.0.retain(|v| !f(v));
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.0.iter_mut()
    }
}

impl<T: Default> Slice<T> {
    /**
    Append a new empty element, returning it for population.
    */
    pub fn append_empty(&mut self) -> &mut T {
        let i = self.0.len();
        self.0.push(T::default());

        &mut self.0[i]
    }
}

impl<T: Clone> Slice<T> {
    /**
    Replace the contents of `dest` with a deep copy of this sequence.
    */
    pub fn copy_to(&self, dest: &mut Slice<T>) {
        dest.0.clone_from(&self.0);
    }
}

#[cold]
#[track_caller]
fn out_of_range(i: usize, len: usize) -> ! {
    panic!("index {i} is out of range for a sequence of length {len}")
}

impl<T> Default for Slice<T> {
    fn default() -> Self {
        Slice::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Slice<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.0).finish()
    }
}

impl<T> ops::Index<usize> for Slice<T> {
    type Output = T;

    #[track_caller]
    fn index(&self, i: usize) -> &T {
        self.at(i)
    }
}

impl<T> ops::IndexMut<usize> for Slice<T> {
    #[track_caller]
    fn index_mut(&mut self, i: usize) -> &mut T {
        self.at_mut(i)
    }
}

impl<T> From<Vec<T>> for Slice<T> {
    fn from(v: Vec<T>) -> Self {
        Slice(v)
    }
}

impl<T> FromIterator<T> for Slice<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Slice(iter.into_iter().collect())
    }
}

impl<T> Extend<T> for Slice<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.0.extend(iter)
    }
}

impl<T> IntoIterator for Slice<T> {
    type Item = T;
    type IntoIter = vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Slice<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Slice<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter_mut()
    }
}

impl<T: sval::Value> sval::Value for Slice<T> {
    fn stream<'sval, S: sval::Stream<'sval> + ?Sized>(&'sval self, stream: &mut S) -> sval::Result {
        stream.seq_begin(Some(self.0.len()))?;

        for v in &self.0 {
            stream.seq_value_begin()?;
            stream.value(v)?;
            stream.seq_value_end()?;
        }

        stream.seq_end()
    }
}
