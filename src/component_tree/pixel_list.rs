use super::{ComponentGenerator, NodeIndex, PartialComponent};

/// Partial component that records pixel positions for a `ComponentTree`
///
/// Only the positions added since the last emission are held here; older
/// pixels already belong to emitted nodes, which are referenced as children.
#[derive(Clone, Debug)]
pub struct PixelListComponent<T> {
    pub(crate) value: T,
    pub(crate) size: usize,
    pub(crate) num_dimensions: usize,
    /// flattened coordinates, `num_dimensions` per pixel
    pub(crate) pixels: Vec<usize>,
    pub(crate) children: Vec<NodeIndex>,
    pub(crate) emitted: Option<NodeIndex>,
}

impl<T> PixelListComponent<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            size: 0,
            num_dimensions: 0,
            pixels: Vec::new(),
            children: Vec::new(),
            emitted: None,
        }
    }

    /// Total number of pixels, including merged components
    pub fn size(&self) -> usize {
        self.size
    }

    /// Positions added since the last emission
    pub fn pending(&self) -> impl Iterator<Item = &[usize]> + '_ {
        self.pixels.chunks(self.num_dimensions.max(1))
    }
}

impl<T: Copy> PartialComponent<T> for PixelListComponent<T> {
    fn add_position(&mut self, position: &[usize]) {
        self.num_dimensions = position.len();
        self.pixels.extend_from_slice(position);
        self.size += 1;
    }

    fn merge(&mut self, mut other: Self) {
        if self.num_dimensions == 0 {
            self.num_dimensions = other.num_dimensions;
        }
        self.size += other.size;
        self.pixels.append(&mut other.pixels);
        self.children.append(&mut other.children);
        self.children.extend(other.emitted);
    }

    fn set_value(&mut self, value: T) {
        self.value = value;
    }

    fn value(&self) -> T {
        self.value
    }
}

/// Provides `PixelListComponent`s, with a fixed sentinel level
#[derive(Clone, Debug)]
pub struct PixelListGenerator<T> {
    max_value: T,
}

impl<T> PixelListGenerator<T> {
    /// `max_value` must rank at or after every level of the image,
    /// e.g. `Direction::max_level()`.
    pub fn new(max_value: T) -> Self {
        Self { max_value }
    }
}

impl<T: Copy> ComponentGenerator<T> for PixelListGenerator<T> {
    type Component = PixelListComponent<T>;

    fn create_max_component(&mut self) -> Self::Component {
        PixelListComponent::new(self.max_value)
    }

    fn create_component(&mut self, value: T) -> Self::Component {
        PixelListComponent::new(value)
    }
}
