use std::cmp::Ordering;
use std::fmt::Debug;

use log::{debug, trace};

use crate::error::{Error, Result};
use crate::{BinaryImage, ImageAccess};
use super::stack::ComponentStack;
use super::{BoundaryQueue, ComponentGenerator, ComponentHandler, Direction, Neighborhood, PartialComponent};

#[derive(Clone, Debug)]
pub struct BuilderConfig {
    pub(crate) direction: Direction,
    pub(crate) validate: bool,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            direction: Direction::default(),
            validate: true,
        }
    }
}

/// Counters collected over one run
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Pixels added to components
    pub pixels: usize,
    /// Calls to the handler
    pub emitted: usize,
    pub merges: usize,
    /// Largest number of pixels waiting on the boundary heap
    pub peak_boundary: usize,
}

type Cmp<'a, T> = Box<dyn Fn(&T, &T) -> Ordering + 'a>;

/// Builds the component tree of an image
///
/// ```
/// use componenttree::{Builder, ComponentTree, Direction, PixelListGenerator, ScalarImage};
///
/// let image = ScalarImage::from_vec(&[3], vec![5u8, 1, 5]).unwrap();
/// let mut generator = PixelListGenerator::new(255u8);
/// let mut tree = ComponentTree::new(&[3]);
/// let stats = Builder::new(&image)
///     .direction(Direction::DarkToBright)
///     .run(&mut generator, &mut tree)
///     .unwrap();
/// assert_eq!(stats.emitted, 2);
/// assert_eq!(tree.node(tree.root().unwrap()).size(), 3);
/// ```
pub struct Builder<'a, I: ImageAccess> {
    pub(crate) conf: BuilderConfig,
    pub(crate) comparator: Cmp<'a, I::Pixel>,
    pub(crate) image: &'a I,
}

macro_rules! config_setter {
    ($name:ident, $t:ty) => {
        pub fn $name(mut self, $name: $t) -> Self {
            self.conf.$name = $name;
            self
        }
    };
}

fn direction_order<'a, T: PartialOrd + 'a>(direction: Direction) -> Cmp<'a, T> {
    Box::new(move |a: &T, b: &T| direction.compare(a, b))
}

impl<'a, I> Builder<'a, I>
where
    I: ImageAccess,
    I::Pixel: PartialOrd + 'a,
{
    pub fn new(image: &'a I) -> Self {
        let conf = BuilderConfig::default();
        Self {
            comparator: direction_order(conf.direction),
            conf,
            image,
        }
    }

    /// Floods levels in `direction`, replacing any comparator set before.
    pub fn direction(mut self, direction: Direction) -> Self {
        self.conf.direction = direction;
        self.comparator = direction_order(direction);
        self
    }
}

impl<'a, I> Builder<'a, I>
where
    I: ImageAccess,
    I::Pixel: Debug,
{
    /// Builder for pixel types ordered only by `comparator`
    pub fn with_comparator(image: &'a I, comparator: impl Fn(&I::Pixel, &I::Pixel) -> Ordering + 'a) -> Self {
        Self {
            conf: BuilderConfig::default(),
            comparator: Box::new(comparator),
            image,
        }
    }

    config_setter!(validate, bool);

    /// Orders levels with `comparator` instead of the configured direction.
    /// `Less` means the first level is flooded earlier.
    pub fn comparator(mut self, comparator: impl Fn(&I::Pixel, &I::Pixel) -> Ordering + 'a) -> Self {
        self.comparator = Box::new(comparator);
        self
    }

    /// Runs the algorithm to completion. Completed components are emitted to `handler`.
    pub fn run<G, H>(self, generator: &mut G, handler: &mut H) -> Result<BuildStats>
    where
        G: ComponentGenerator<I::Pixel>,
        H: ComponentHandler<G::Component>,
    {
        let mut bimpl = BuilderImpl::new(self, generator, handler)?;
        while !bimpl.tick()? {}
        bimpl.result()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stage {
    Scan,
    Raise,
    Flush,
    Done,
}

struct BuilderImpl<'a, 'r, I, G, H>
where
    I: ImageAccess,
    G: ComponentGenerator<I::Pixel>,
{
    image: &'a I,
    compare: Cmp<'a, I::Pixel>,
    validate: bool,
    generator: &'r mut G,
    handler: &'r mut H,
    neighborhood: Neighborhood,
    visited: BinaryImage,
    boundary: BoundaryQueue<I::Pixel>,
    stack: ComponentStack<G::Component>,
    current: Vec<usize>,
    neighbor: Vec<usize>,
    current_level: I::Pixel,
    stage: Stage,
    stats: BuildStats,
}

impl<'a, 'r, I, G, H> BuilderImpl<'a, 'r, I, G, H>
where
    I: ImageAccess,
    I::Pixel: Debug,
    G: ComponentGenerator<I::Pixel>,
    H: ComponentHandler<G::Component>,
{
    fn new(builder: Builder<'a, I>, generator: &'r mut G, handler: &'r mut H) -> Result<Self> {
        let Builder { conf, comparator: compare, image } = builder;

        if image.origin().iter().any(|&o| o != 0) {
            return Err(Error::NonZeroOrigin);
        }
        let dimensions = image.dimensions().to_vec();
        if dimensions.is_empty() || dimensions.contains(&0) {
            return Err(Error::EmptyImage);
        }

        let visited = BinaryImage::new(&dimensions);

        let current = vec![0; dimensions.len()];
        let current_level = image.get(&current).ok_or(Error::EmptyImage)?;

        let mut stack = ComponentStack::new(generator.create_max_component());
        stack.push(generator.create_component(current_level));

        let mut bimpl = Self {
            image,
            compare,
            validate: conf.validate,
            generator,
            handler,
            neighborhood: Neighborhood::new(&dimensions),
            visited,
            boundary: BoundaryQueue::new(),
            stack,
            neighbor: current.clone(),
            current,
            current_level,
            stage: Stage::Scan,
            stats: BuildStats::default(),
        };
        bimpl.visited.set_index(0, true);

        debug!(
            "component tree: dimensions={:?} pixels={} start level={:?}",
            dimensions,
            bimpl.visited.len(),
            bimpl.current_level
        );
        Ok(bimpl)
    }

    /// Advances the state machine by one step. Returns true when finished.
    fn tick(&mut self) -> Result<bool> {
        match self.stage {
            Stage::Scan => {
                self.scan_neighbors();
                Ok(false)
            }
            Stage::Raise => {
                self.raise_level()?;
                Ok(false)
            }
            Stage::Flush => {
                self.flush()?;
                self.stage = Stage::Done;
                Ok(false)
            }
            Stage::Done => Ok(true),
        }
    }

    fn scan_neighbors(&mut self) {
        while self.neighborhood.has_next() {
            if !self.neighborhood.next(&self.current, &mut self.neighbor) {
                continue;
            }
            let index = match self.visited.index_of(&self.neighbor) {
                Some(index) => index,
                None => continue,
            };
            if self.visited.get_index(index) {
                continue;
            }
            let neighbor_level = match self.image.get(&self.neighbor) {
                Some(level) => level,
                None => continue,
            };
            self.visited.set_index(index, true);

            if (self.compare)(&neighbor_level, &self.current_level) != Ordering::Less {
                // none of its neighbours has been examined yet
                self.boundary.push(&self.neighbor, neighbor_level, 0, &*self.compare);
            } else {
                self.boundary.push(
                    &self.current,
                    self.current_level,
                    self.neighborhood.next_index(),
                    &*self.compare,
                );
                std::mem::swap(&mut self.current, &mut self.neighbor);
                self.current_level = neighbor_level;
                self.stack.push(self.generator.create_component(neighbor_level));
                self.neighborhood.reset();
            }
            self.stats.peak_boundary = self.stats.peak_boundary.max(self.boundary.len());
        }

        self.stack.top_mut().add_position(&self.current);
        self.stats.pixels += 1;

        self.stage = if self.boundary.is_empty() {
            Stage::Flush
        } else {
            Stage::Raise
        };
    }

    fn raise_level(&mut self) -> Result<()> {
        let slot = match self.boundary.pop(&*self.compare) {
            Some(slot) => slot,
            None => {
                self.stage = Stage::Flush;
                return Ok(());
            }
        };
        let pixel = self.boundary.pixel(slot);
        let level = pixel.value;
        let next_neighbor = pixel.next_neighbor;
        self.current.copy_from_slice(&pixel.position);
        self.boundary.release(slot);

        if (self.compare)(&level, &self.current_level) != Ordering::Equal {
            self.process_stack(level)?;
        }
        self.current_level = level;
        self.neighborhood.set_next_index(next_neighbor);
        self.stage = Stage::Scan;
        Ok(())
    }

    /// Emits every component below `new_level`, merging them downwards
    /// until the top of the stack sits at `new_level`.
    fn process_stack(&mut self, new_level: I::Pixel) -> Result<()> {
        trace!(
            "process stack: level={:?} stack={:?}",
            new_level,
            self.stack.iter().map(|c| c.value()).collect::<Vec<_>>()
        );
        loop {
            let mut component = self.stack.pop().ok_or(Error::StackExhausted)?;
            self.handler.emit(&mut component);
            self.stats.emitted += 1;

            let below = self.stack.top_mut();
            match (self.compare)(&new_level, &below.value()) {
                Ordering::Less => {
                    component.set_value(new_level);
                    self.stack.push(component);
                    return Ok(());
                }
                ordering => {
                    trace!("merging {:?} into {:?}", component.value(), below.value());
                    below.merge(component);
                    self.stats.merges += 1;
                    if ordering == Ordering::Equal {
                        return Ok(());
                    }
                }
            }
        }
    }

    fn flush(&mut self) -> Result<()> {
        if self.stack.is_floor_active() {
            // the image reached the sentinel level; the floor holds the root
            self.handler.emit(self.stack.top_mut());
            self.stats.emitted += 1;
            return Ok(());
        }
        self.process_stack(self.current_level)
    }

    fn result(self) -> Result<BuildStats> {
        let unvisited = self.visited.len() - self.visited.count_ones();
        debug!(
            "component tree: pixels={} emitted={} merges={} peak boundary={} unvisited={}",
            self.stats.pixels,
            self.stats.emitted,
            self.stats.merges,
            self.stats.peak_boundary,
            unvisited
        );
        if self.validate && unvisited > 0 {
            return Err(Error::Unvisited { count: unvisited });
        }
        Ok(self.stats)
    }
}
