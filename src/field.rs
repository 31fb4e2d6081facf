use crate::error::{Error, Result};

/// `Vec<T>` that represents an n-dimensional field
///
/// Elements are stored in row-major order with dimension 0 varying fastest,
/// so a 2D field of `[width, height]` is laid out as `width * y + x`.
#[derive(Clone, Default, Debug)]
pub struct Field<T> {
    data: Vec<T>,
    dimensions: Vec<usize>,
    strides: Vec<usize>,
}

/// Number of elements of a field with the given extents
pub fn num_elements(dimensions: &[usize]) -> usize {
    dimensions.iter().product()
}

fn strides_of(dimensions: &[usize]) -> Vec<usize> {
    let mut strides = Vec::with_capacity(dimensions.len());
    let mut step = 1;
    for &extent in dimensions {
        strides.push(step);
        step *= extent;
    }
    strides
}

/// The base implementation of `Field`
impl<T> Field<T> {
    /// Constructs a field with extents `dimensions` over `data`.
    /// Fails if the size of `data` does not equal the product of the extents.
    pub fn with_vec(dimensions: &[usize], data: Vec<T>) -> Result<Self> {
        let expected = num_elements(dimensions);
        if data.len() != expected {
            return Err(Error::DimensionMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            dimensions: dimensions.to_vec(),
            strides: strides_of(dimensions),
        })
    }

    /// Returns the extents of the field.
    pub fn dimensions(&self) -> &[usize] {
        &self.dimensions
    }

    pub fn num_dimensions(&self) -> usize {
        self.dimensions.len()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns a reference to an element.
    pub fn peek(&self, index: usize) -> Option<&T> {
        self.data.get(index)
    }

    /// Returns a mutable reference to an element.
    pub fn peek_mut(&mut self, index: usize) -> Option<&mut T> {
        self.data.get_mut(index)
    }

    /// Replaces an element with `value` and returns the element.
    pub fn replace(&mut self, index: usize, value: T) -> Option<T> {
        self.data
            .get_mut(index)
            .map(|elem| std::mem::replace(elem, value))
    }

    /// Returns the index of a coordinate in the field,
    /// or `None` if it is outside of the extents.
    pub fn index_of(&self, position: &[usize]) -> Option<usize> {
        if position.len() != self.dimensions.len() {
            return None;
        }
        let mut index = 0;
        for ((&p, &extent), &stride) in position.iter().zip(&self.dimensions).zip(&self.strides) {
            if p >= extent {
                return None;
            }
            index += p * stride;
        }
        Some(index)
    }

    /// Writes the coordinate of an index in the field into `position`.
    pub fn locate(&self, mut index: usize, position: &mut [usize]) {
        for (p, &extent) in position.iter_mut().zip(&self.dimensions) {
            *p = index % extent;
            index /= extent;
        }
    }

    /// Elementwise conversion into a field of the same shape
    pub fn map<U, F>(&self, f: F) -> Field<U>
    where
        F: FnMut(&T) -> U,
    {
        Field {
            data: self.data.iter().map(f).collect(),
            dimensions: self.dimensions.clone(),
            strides: self.strides.clone(),
        }
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.data.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> + '_ {
        self.data.iter_mut()
    }
}

impl<T> Field<T>
where
    T: Default,
{
    /// Constructs a field, with each slot filled with the default value of its element type.
    pub fn with_default(dimensions: &[usize]) -> Self {
        let size = num_elements(dimensions);
        let mut data = Vec::with_capacity(size);
        data.resize_with(size, T::default);
        Self {
            data,
            dimensions: dimensions.to_vec(),
            strides: strides_of(dimensions),
        }
    }
}

impl<T> Field<T>
where
    T: Clone,
{
    /// Constructs a field, with each slot filled with `value`.
    pub fn with_initial(dimensions: &[usize], value: T) -> Self {
        Self {
            data: vec![value; num_elements(dimensions)],
            dimensions: dimensions.to_vec(),
            strides: strides_of(dimensions),
        }
    }

    /// Returns a copy of an element.
    pub fn get(&self, index: usize) -> Option<T> {
        self.peek(index).cloned()
    }
}

impl<T> IntoIterator for Field<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty() {
        let mut field = Field::<i32>::default();
        assert_eq!(field.num_dimensions(), 0);
        assert_eq!(field.peek(0), None);
        assert_eq!(field.peek_mut(0), None);
    }

    #[test]
    fn two_by_three() {
        let mut field = Field::with_initial(&[3, 2], 1);

        for i in 0..6 {
            assert_eq!(field.replace(i, i), Some(1));
        }

        for i in 0..6 {
            assert_eq!(field.peek(i), Some(&i));
        }
    }

    #[test]
    fn size_mismatch() {
        let field = Field::with_vec(&[2, 2], vec![0u8; 3]);
        assert_eq!(field.err(), Some(Error::DimensionMismatch { expected: 4, actual: 3 }));
    }

    #[test]
    fn index_and_locate() {
        let field = Field::<u8>::with_default(&[4, 3, 2]);
        assert_eq!(field.index_of(&[0, 0, 0]), Some(0));
        assert_eq!(field.index_of(&[1, 0, 0]), Some(1));
        assert_eq!(field.index_of(&[0, 1, 0]), Some(4));
        assert_eq!(field.index_of(&[3, 2, 1]), Some(23));
        assert_eq!(field.index_of(&[4, 0, 0]), None);
        assert_eq!(field.index_of(&[0, 0]), None);

        let mut position = [0; 3];
        for index in 0..field.len() {
            field.locate(index, &mut position);
            assert_eq!(field.index_of(&position), Some(index));
        }
    }
}
