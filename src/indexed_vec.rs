//! Type-safe indexing for board cells and seams.  Each kind of object gets its own index type,
//! which is an opaque new-type over integers, and its own replacement for [`Vec`] which can only
//! be indexed by that index type.  This stops a seam index from ever being used to look up a
//! piece (or vice versa).

use std::{
    fmt::{Debug, Formatter},
    iter::FromIterator,
    marker::PhantomData,
    ops::{Index, IndexMut},
};

/// A new-type over [`Vec`] which will only accept indices of an opaque index type
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct TypedVec<Idx, T> {
    inner: Vec<T>,
    _phantom_data: PhantomData<Idx>,
}

impl<Idx, T> TypedVec<Idx, T> {
    /// Creates a new, empty type-safe collection
    pub fn new() -> Self {
        Self {
            inner: Vec::new(),
            _phantom_data: PhantomData,
        }
    }

    /// Creates a new, empty type-safe collection which can take `cap` items without reallocating.
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            inner: Vec::with_capacity(cap),
            _phantom_data: PhantomData,
        }
    }

    pub fn repeat(elem: T, len: usize) -> Self
    where
        T: Clone,
    {
        Self {
            inner: vec![elem; len],
            _phantom_data: PhantomData,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Gets the index of the next element to be [`push`](Self::push)ed to this collection.
    pub fn next_idx(&self) -> Idx
    where
        Idx: IdxType,
    {
        Idx::from_idx(self.inner.len())
    }

    /// Adds a new element to this collection, returning its opaque index
    pub fn push(&mut self, t: T) -> Idx
    where
        Idx: IdxType,
    {
        let idx = self.next_idx();
        self.inner.push(t);
        idx
    }

    pub fn get(&self, idx: Idx) -> Option<&T>
    where
        Idx: IdxType,
    {
        self.inner.get(idx.to_idx())
    }

    pub fn get_mut(&mut self, idx: Idx) -> Option<&mut T>
    where
        Idx: IdxType,
    {
        self.inner.get_mut(idx.to_idx())
    }

    /// Swaps the elements at two indices.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds
    pub fn swap(&mut self, a: Idx, b: Idx)
    where
        Idx: IdxType,
    {
        self.inner.swap(a.to_idx(), b.to_idx())
    }

    pub fn as_slice(&self) -> &[T] {
        self.inner.as_slice()
    }

    /* ITER FUNCTIONS */

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.inner.iter()
    }

    pub fn indexed_iter(&self) -> impl Iterator<Item = (Idx, &T)>
    where
        Idx: IdxType,
    {
        self.inner
            .iter()
            .enumerate()
            .map(|(i, v)| (Idx::from_idx(i), v))
    }

    /// Iterates over every valid index of this collection, in order
    pub fn indices(&self) -> impl Iterator<Item = Idx>
    where
        Idx: IdxType,
    {
        (0..self.inner.len()).map(Idx::from_idx)
    }
}

impl<Idx, T> Default for TypedVec<Idx, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Idx, T: Debug> Debug for TypedVec<Idx, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.inner.iter()).finish()
    }
}

impl<IdxT: IdxType, T> Index<IdxT> for TypedVec<IdxT, T> {
    type Output = T;

    fn index(&self, index: IdxT) -> &Self::Output {
        &self.inner[index.to_idx()]
    }
}

impl<IdxT: IdxType, T> IndexMut<IdxT> for TypedVec<IdxT, T> {
    fn index_mut(&mut self, index: IdxT) -> &mut Self::Output {
        &mut self.inner[index.to_idx()]
    }
}

impl<Idx, T> FromIterator<T> for TypedVec<Idx, T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().collect(),
            _phantom_data: PhantomData,
        }
    }
}

impl<Idx, T> IntoIterator for TypedVec<Idx, T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

///////////////////////////
// MACRO/TRAIT MACHINERY //
///////////////////////////

macro_rules! idx_impl {
    ($idx_name: ident, $vec_name: ident) => {
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $idx_name {
            idx: usize,
        }

        impl IdxType for $idx_name {
            fn from_idx(idx: usize) -> Self {
                Self { idx }
            }

            fn to_idx(self) -> usize {
                self.idx
            }
        }

        impl Debug for $idx_name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}({})", stringify!($idx_name), self.idx)
            }
        }

        pub type $vec_name<T> = TypedVec<$idx_name, T>;
    };
}

idx_impl!(CellIdx, CellVec); // Linear `row * cols + col` positions on a board
idx_impl!(SeamIdx, SeamVec); // Internal seams, counted separately for each orientation

/// A common trait implemented by all custom index types
pub trait IdxType {
    fn from_idx(idx: usize) -> Self;

    fn to_idx(self) -> usize;
}
