use std::fmt;
use std::fmt::Write;

pub use bit_vec::BitVec;

use crate::error::{Error, Result};
use crate::field::{num_elements, Field};

/// Read-only random access to the scalar values of an n-dimensional image
pub trait ImageAccess {
    type Pixel: Copy;

    /// Extent of every dimension
    fn dimensions(&self) -> &[usize];

    /// Minimum corner of the image. Only zero origins are supported by the builder.
    fn origin(&self) -> Vec<i64> {
        vec![0; self.dimensions().len()]
    }

    /// Value at `position`, or `None` when it is outside of the extents
    fn get(&self, position: &[usize]) -> Option<Self::Pixel>;

    fn num_dimensions(&self) -> usize {
        self.dimensions().len()
    }

    fn num_pixels(&self) -> usize {
        num_elements(self.dimensions())
    }
}

/// n-dimensional image with one scalar value per pixel
#[derive(Clone, Default, Debug)]
pub struct ScalarImage<T> {
    field: Field<T>,
}

/// Component of `MonoImage`
pub type MonoImageItem = u16;
/// Image with grayscale values
pub type MonoImage = ScalarImage<MonoImageItem>;

/// n-dimensional image with 1 bit per pixel
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BinaryImage {
    pub pixels: BitVec,
    dimensions: Vec<usize>,
}

impl<T> ScalarImage<T> {
    /// Wraps `pixels` laid out with dimension 0 varying fastest.
    pub fn from_vec(dimensions: &[usize], pixels: Vec<T>) -> Result<Self> {
        Ok(Self {
            field: Field::with_vec(dimensions, pixels)?,
        })
    }

    pub fn len(&self) -> usize {
        self.field.len()
    }

    pub fn is_empty(&self) -> bool {
        self.field.is_empty()
    }

    pub fn pixels(&self) -> &[T] {
        self.field.as_slice()
    }

    pub fn field(&self) -> &Field<T> {
        &self.field
    }
}

impl<T> ScalarImage<T> where T: Default {
    pub fn new(dimensions: &[usize]) -> Self {
        Self {
            field: Field::with_default(dimensions),
        }
    }
}

impl<T> ScalarImage<T> where T: Clone {
    pub fn get_pixel(&self, position: &[usize]) -> Option<T> {
        self.field.index_of(position).and_then(|i| self.field.get(i))
    }

    /// Returns false if `position` is outside of the image
    pub fn set_pixel(&mut self, position: &[usize], v: T) -> bool {
        match self.field.index_of(position) {
            Some(i) => self.field.replace(i, v).is_some(),
            None => false,
        }
    }

    /// Pixelwise conversion into a new image of the same shape
    pub fn map<U, F>(&self, f: F) -> ScalarImage<U>
    where
        F: Fn(T) -> U,
    {
        ScalarImage {
            field: self.field.map(|v| f(v.clone())),
        }
    }
}

impl<T> ImageAccess for ScalarImage<T> where T: Copy {
    type Pixel = T;

    fn dimensions(&self) -> &[usize] {
        self.field.dimensions()
    }

    fn get(&self, position: &[usize]) -> Option<T> {
        self.field.index_of(position).and_then(|i| self.field.peek(i).copied())
    }
}

impl BinaryImage {
    pub fn new(dimensions: &[usize]) -> BinaryImage {
        BinaryImage {
            pixels: BitVec::from_elem(num_elements(dimensions), false),
            dimensions: dimensions.to_vec(),
        }
    }

    pub fn new_w_h(width: usize, height: usize) -> BinaryImage {
        Self::new(&[width, height])
    }

    /// Wraps existing bits; fails if their count does not match the extents.
    pub fn from_bits(dimensions: &[usize], pixels: BitVec) -> Result<BinaryImage> {
        let expected = num_elements(dimensions);
        if pixels.len() != expected {
            return Err(Error::DimensionMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(BinaryImage {
            pixels,
            dimensions: dimensions.to_vec(),
        })
    }

    pub fn dimensions(&self) -> &[usize] {
        &self.dimensions
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn index_of(&self, position: &[usize]) -> Option<usize> {
        if position.len() != self.dimensions.len() {
            return None;
        }
        let mut index = 0;
        let mut stride = 1;
        for (&p, &extent) in position.iter().zip(&self.dimensions) {
            if p >= extent {
                return None;
            }
            index += p * stride;
            stride *= extent;
        }
        Some(index)
    }

    /// Out of bounds positions read as false
    pub fn get_pixel(&self, position: &[usize]) -> bool {
        self.index_of(position).map_or(false, |i| self.get_index(i))
    }

    pub fn get_index(&self, i: usize) -> bool {
        self.pixels.get(i).unwrap_or(false)
    }

    /// Returns false if `position` is outside of the image
    pub fn set_pixel(&mut self, position: &[usize], v: bool) -> bool {
        match self.index_of(position) {
            Some(i) => {
                self.pixels.set(i, v);
                true
            }
            None => false,
        }
    }

    pub fn set_index(&mut self, i: usize, v: bool) {
        self.pixels.set(i, v);
    }

    pub fn count_ones(&self) -> usize {
        self.pixels.iter().filter(|x| *x).count()
    }

    pub fn all(&self) -> bool {
        self.pixels.all()
    }

    pub fn from_string(string: &str) -> Self {
        let mut width = 0;
        let mut height = 0;
        for line in string.lines() {
            if height == 0 {
                width = line.len();
            }
            height += 1;
        }
        let mut image = Self::new_w_h(width, height);
        for (y, line) in string.lines().enumerate() {
            for (x, c) in line.chars().enumerate() {
                image.set_pixel(&[x, y], c == '*');
            }
        }
        image
    }
}

/// Renders 2D images row by row; other shapes are written as one line.
impl fmt::Display for BinaryImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = match self.dimensions.as_slice() {
            [width, _] => *width,
            _ => self.len().max(1),
        };
        for (i, bit) in self.pixels.iter().enumerate() {
            f.write_char(if bit { '*' } else { '-' })?;
            if (i + 1) % width == 0 {
                f.write_char('\n')?;
            }
        }
        Ok(())
    }
}
