//! Dense 3D array storage.
//!
//! Elements are stored with X fastest, then Y, then Z, matching the
//! `k * width * height + j * width + i` cell indexing used everywhere else.

use std::ops::{Index, IndexMut};

use glam::UVec3;
use rayon::prelude::*;

/// Dense 3D array of `T` with a fixed `(width, height, depth)` size.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Array3<T> {
    size: UVec3,
    data: Vec<T>,
}

impl<T: Clone> Array3<T> {
    /// Create an array of the given size filled with `value`.
    ///
    /// Panics if the element count of `size` overflows `usize`.
    pub fn new(size: UVec3, value: T) -> Self {
        Self {
            size,
            data: vec![value; element_count(size)],
        }
    }

    /// Reallocate to `size` and fill every element with `value`.
    ///
    /// Old contents are discarded, never resampled. Panics like
    /// [`Array3::new`] on an element count that overflows `usize`.
    pub fn resize(&mut self, size: UVec3, value: T) {
        self.data.clear();
        self.data.resize(element_count(size), value);
        self.size = size;
    }

    /// Overwrite every element with `value`.
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }
}

impl<T> Array3<T> {
    /// Number of elements along each axis.
    #[inline]
    pub fn size(&self) -> UVec3 {
        self.size
    }

    /// Number of elements along X.
    #[inline]
    pub fn width(&self) -> usize {
        self.size.x as usize
    }

    /// Number of elements along Y.
    #[inline]
    pub fn height(&self) -> usize {
        self.size.y as usize
    }

    /// Number of elements along Z.
    #[inline]
    pub fn depth(&self) -> usize {
        self.size.z as usize
    }

    /// Total number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when the array holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Linear index of element (i, j, k).
    #[inline]
    pub fn linear_index(&self, i: usize, j: usize, k: usize) -> usize {
        k * self.width() * self.height() + j * self.width() + i
    }

    /// Element at (i, j, k), or `None` when out of range.
    pub fn get(&self, i: usize, j: usize, k: usize) -> Option<&T> {
        if i < self.width() && j < self.height() && k < self.depth() {
            self.data.get(self.linear_index(i, j, k))
        } else {
            None
        }
    }

    /// Elements in linear (X fastest) order.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Mutable elements in linear (X fastest) order.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Exchange size and contents with `other`.
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(self, other);
    }

    /// Visit every (i, j, k) exactly once, X fastest, then Y, then Z.
    pub fn for_each_index<F>(&self, mut visit: F)
    where
        F: FnMut(usize, usize, usize),
    {
        for k in 0..self.depth() {
            for j in 0..self.height() {
                for i in 0..self.width() {
                    visit(i, j, k);
                }
            }
        }
    }

    /// Visit every (i, j, k) exactly once from rayon workers, in no particular order.
    pub fn par_for_each_index<F>(&self, visit: F)
    where
        F: Fn(usize, usize, usize) + Send + Sync,
    {
        let (width, height) = (self.width(), self.height());
        (0..self.len()).into_par_iter().for_each(|idx| {
            let (i, j, k) = unravel(idx, width, height);
            visit(i, j, k);
        });
    }
}

impl<T: Send> Array3<T> {
    /// Mutate every element in parallel, given its (i, j, k).
    pub fn par_for_each_mut<F>(&mut self, visit: F)
    where
        F: Fn(usize, usize, usize, &mut T) + Send + Sync,
    {
        let (width, height) = (self.width(), self.height());
        self.data.par_iter_mut().enumerate().for_each(|(idx, value)| {
            let (i, j, k) = unravel(idx, width, height);
            visit(i, j, k, value);
        });
    }
}

impl<T> Array3<T> {
    // A wrapped-around (i, j) still lands inside `data`, so each axis is checked.
    #[inline]
    fn check_bounds(&self, i: usize, j: usize, k: usize) {
        assert!(
            i < self.width() && j < self.height() && k < self.depth(),
            "index ({}, {}, {}) out of range for size {}",
            i,
            j,
            k,
            self.size
        );
    }
}

impl<T> Index<(usize, usize, usize)> for Array3<T> {
    type Output = T;

    #[inline]
    fn index(&self, (i, j, k): (usize, usize, usize)) -> &T {
        self.check_bounds(i, j, k);
        &self.data[self.linear_index(i, j, k)]
    }
}

impl<T> IndexMut<(usize, usize, usize)> for Array3<T> {
    #[inline]
    fn index_mut(&mut self, (i, j, k): (usize, usize, usize)) -> &mut T {
        self.check_bounds(i, j, k);
        let idx = self.linear_index(i, j, k);
        &mut self.data[idx]
    }
}

/// Element count of an array of `size`, or `None` if it overflows `usize`.
pub fn checked_len(size: UVec3) -> Option<usize> {
    (size.x as usize)
        .checked_mul(size.y as usize)?
        .checked_mul(size.z as usize)
}

fn element_count(size: UVec3) -> usize {
    match checked_len(size) {
        Some(len) => len,
        None => panic!("array size {} overflows usize", size),
    }
}

/// Inverse of the linear index: (i, j, k) for element `idx`.
#[inline]
pub(crate) fn unravel(idx: usize, width: usize, height: usize) -> (usize, usize, usize) {
    let i = idx % width;
    let j = (idx / width) % height;
    let k = idx / (width * height);
    (i, j, k)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resize_discards_contents() {
        let mut array = Array3::new(UVec3::new(2, 2, 2), 1.0f32);
        array[(1, 1, 1)] = 5.0;

        array.resize(UVec3::new(3, 1, 2), 7.0);

        assert_eq!(array.size(), UVec3::new(3, 1, 2));
        assert_eq!(array.len(), 6);
        assert!(array.as_slice().iter().all(|&v| v == 7.0));
    }

    #[test]
    fn test_index_layout_x_fastest() {
        let mut array = Array3::new(UVec3::new(3, 4, 5), 0usize);
        for k in 0..5 {
            for j in 0..4 {
                for i in 0..3 {
                    let idx = array.linear_index(i, j, k);
                    array[(i, j, k)] = idx;
                }
            }
        }
        assert_eq!(array.as_slice(), (0..60).collect::<Vec<_>>().as_slice());
        assert_eq!(array[(1, 2, 3)], 3 * 12 + 2 * 3 + 1);
    }

    #[test]
    fn test_for_each_index_order() {
        let array = Array3::new(UVec3::new(2, 2, 2), 0u8);
        let mut visited = Vec::new();
        array.for_each_index(|i, j, k| visited.push((i, j, k)));
        assert_eq!(
            visited,
            vec![
                (0, 0, 0),
                (1, 0, 0),
                (0, 1, 0),
                (1, 1, 0),
                (0, 0, 1),
                (1, 0, 1),
                (0, 1, 1),
                (1, 1, 1),
            ]
        );
    }

    #[test]
    fn test_unravel_matches_linear_index() {
        let array = Array3::new(UVec3::new(4, 3, 2), 0u8);
        array.for_each_index(|i, j, k| {
            let idx = array.linear_index(i, j, k);
            assert_eq!(unravel(idx, 4, 3), (i, j, k));
        });
    }

    #[test]
    fn test_par_for_each_mut_writes_every_element() {
        let mut array = Array3::new(UVec3::new(5, 6, 7), 0usize);
        array.par_for_each_mut(|i, j, k, v| *v = i + 10 * j + 100 * k);
        array.for_each_index(|i, j, k| {
            assert_eq!(array[(i, j, k)], i + 10 * j + 100 * k);
        });
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_index_past_width_panics() {
        let array = Array3::new(UVec3::new(2, 2, 2), 0.0f32);
        let _ = array[(2, 0, 0)];
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_index_mut_past_height_panics() {
        let mut array = Array3::new(UVec3::new(2, 2, 2), 0.0f32);
        array[(0, 2, 0)] = 9.0;
    }

    #[test]
    fn test_checked_len() {
        assert_eq!(checked_len(UVec3::new(3, 4, 5)), Some(60));
        assert_eq!(checked_len(UVec3::ZERO), Some(0));
        if usize::BITS == 64 {
            assert_eq!(checked_len(UVec3::new(1 << 22, 1 << 21, 1 << 21)), None);
        }
    }

    #[test]
    fn test_get_out_of_range() {
        let array = Array3::new(UVec3::new(2, 2, 2), 1.0f32);
        assert_eq!(array.get(1, 1, 1), Some(&1.0));
        assert_eq!(array.get(2, 0, 0), None);
        assert_eq!(array.get(0, 0, 2), None);
    }
}
