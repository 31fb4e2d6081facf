use std::cmp::Ordering;
use std::convert::TryFrom;
use std::fmt::Debug;

use crate::error::Result;
use crate::{BinaryImage, ImageAccess};
use super::{Builder, ComponentHandler, Direction, Extreme, PixelListComponent, PixelListGenerator};

#[derive(Copy, Clone, Debug, Default, Eq, Ord, Hash, PartialEq, PartialOrd)]
pub struct NodeIndex(pub NodeIndexElem);

pub type NodeIndexElem = u32;

impl NodeIndex {
    /// `None` past the last index representable by `NodeIndexElem`
    pub fn try_from_usize(index: usize) -> Option<Self> {
        NodeIndexElem::try_from(index).ok().map(NodeIndex)
    }

    /// Panics in debug builds past the last representable index
    pub fn from_usize(index: usize) -> Self {
        debug_assert!(
            Self::try_from_usize(index).is_some(),
            "node index {} exceeds NodeIndexElem",
            index
        );
        NodeIndex(index as NodeIndexElem)
    }
}

/// A completed component
#[derive(Clone, Debug)]
pub struct Node<T> {
    value: T,
    size: usize,
    num_dimensions: usize,
    /// pixels not covered by any child, flattened
    pixels: Vec<usize>,
    parent: Option<NodeIndex>,
    children: Vec<NodeIndex>,
}

impl<T: Copy> Node<T> {
    /// Threshold level of the component
    pub fn value(&self) -> T {
        self.value
    }

    /// Number of pixels, including those of all descendants
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn parent(&self) -> Option<NodeIndex> {
        self.parent
    }

    pub fn children(&self) -> &[NodeIndex] {
        &self.children
    }

    /// Pixels that belong to this node but to none of its children
    pub fn own_pixels(&self) -> impl Iterator<Item = &[usize]> + '_ {
        self.pixels.chunks(self.num_dimensions.max(1))
    }
}

/// Component tree assembled from emitted `PixelListComponent`s
///
/// Nodes are stored in emission order, so every child precedes its parent
/// and the last node is the root.
#[derive(Clone, Debug, Default)]
pub struct ComponentTree<T> {
    dimensions: Vec<usize>,
    nodes: Vec<Node<T>>,
}

impl<T> ComponentTree<T>
where
    T: Copy + PartialOrd + Debug + Extreme,
{
    /// Builds the tree of `image`, flooding levels in `direction`.
    ///
    /// ```
    /// use componenttree::{ComponentTree, Direction, ScalarImage};
    ///
    /// let image = ScalarImage::from_vec(&[4], vec![0u8, 1, 2, 3]).unwrap();
    /// let tree = ComponentTree::build(&image, Direction::DarkToBright).unwrap();
    /// assert_eq!(tree.len(), 4);
    /// ```
    pub fn build<I>(image: &I, direction: Direction) -> Result<Self>
    where
        I: ImageAccess<Pixel = T>,
    {
        let mut generator = PixelListGenerator::new(direction.max_level());
        let mut tree = Self::new(image.dimensions());
        Builder::new(image)
            .direction(direction)
            .run(&mut generator, &mut tree)?;
        Ok(tree)
    }
}

impl<T> ComponentTree<T>
where
    T: Copy + Debug,
{
    /// Builds the tree of `image` with a custom level order. `max_value` must
    /// rank at or after every level of the image under `comparator`.
    /// The pixel type needs no ordering of its own.
    pub fn build_with<'a, I, F>(image: &'a I, comparator: F, max_value: T) -> Result<Self>
    where
        I: ImageAccess<Pixel = T>,
        F: Fn(&T, &T) -> Ordering + 'a,
    {
        let mut generator = PixelListGenerator::new(max_value);
        let mut tree = Self::new(image.dimensions());
        Builder::with_comparator(image, comparator)
            .run(&mut generator, &mut tree)?;
        Ok(tree)
    }
}

impl<T: Copy> ComponentTree<T> {
    pub fn new(dimensions: &[usize]) -> Self {
        Self {
            dimensions: dimensions.to_vec(),
            nodes: Vec::new(),
        }
    }

    pub fn dimensions(&self) -> &[usize] {
        &self.dimensions
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root(&self) -> Option<NodeIndex> {
        if self.nodes.is_empty() {
            None
        } else {
            Some(NodeIndex::from_usize(self.nodes.len() - 1))
        }
    }

    pub fn node(&self, index: NodeIndex) -> &Node<T> {
        &self.nodes[index.0 as usize]
    }

    pub fn get(&self, index: NodeIndex) -> Option<&Node<T>> {
        self.nodes.get(index.0 as usize)
    }

    /// Nodes in emission order
    pub fn iter(&self) -> impl Iterator<Item = (NodeIndex, &Node<T>)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeIndex::from_usize(i), node))
    }

    pub fn children(&self, index: NodeIndex) -> &[NodeIndex] {
        self.node(index).children()
    }

    pub fn parent(&self, index: NodeIndex) -> Option<NodeIndex> {
        self.node(index).parent()
    }

    /// All pixels of the component at `index`, depth first
    pub fn pixels(&self, index: NodeIndex) -> Vec<&[usize]> {
        let mut pixels = Vec::with_capacity(self.node(index).size());
        let mut pending = vec![index];
        while let Some(next) = pending.pop() {
            let node = self.node(next);
            pixels.extend(node.own_pixels());
            pending.extend_from_slice(node.children());
        }
        pixels
    }

    /// Mask of the component at `index`
    pub fn to_binary_image(&self, index: NodeIndex) -> BinaryImage {
        let mut image = BinaryImage::new(&self.dimensions);
        for position in self.pixels(index) {
            image.set_pixel(position, true);
        }
        image
    }
}

impl<T: Copy> ComponentHandler<PixelListComponent<T>> for ComponentTree<T> {
    fn emit(&mut self, component: &mut PixelListComponent<T>) {
        let index = NodeIndex::from_usize(self.nodes.len());

        let mut children = std::mem::take(&mut component.children);
        // the same component completed at a lower level before
        children.extend(component.emitted);
        for child in children.iter() {
            self.nodes[child.0 as usize].parent = Some(index);
        }

        self.nodes.push(Node {
            value: component.value,
            size: component.size,
            num_dimensions: component.num_dimensions,
            pixels: std::mem::take(&mut component.pixels),
            parent: None,
            children,
        });
        component.emitted = Some(index);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::ScalarImage;

    fn tree_1d(values: Vec<i32>, direction: Direction) -> ComponentTree<i32> {
        let image = ScalarImage::from_vec(&[values.len()], values).unwrap();
        ComponentTree::build(&image, direction).unwrap()
    }

    fn members(tree: &ComponentTree<i32>, index: NodeIndex) -> BTreeSet<Vec<usize>> {
        tree.pixels(index).into_iter().map(|p| p.to_vec()).collect()
    }

    /// Distinct member sets of all nodes
    fn partition(tree: &ComponentTree<i32>) -> BTreeSet<BTreeSet<Vec<usize>>> {
        tree.iter().map(|(i, _)| members(tree, i)).collect()
    }

    #[test]
    fn valley() {
        let tree = tree_1d(vec![5, 1, 5], Direction::DarkToBright);
        assert_eq!(tree.len(), 2);

        let first = tree.node(NodeIndex(0));
        assert_eq!(first.value(), 1);
        assert_eq!(first.size(), 1);
        assert_eq!(members(&tree, NodeIndex(0)), [vec![1]].iter().cloned().collect());

        let root = tree.root().unwrap();
        assert_eq!(root, NodeIndex(1));
        assert_eq!(tree.node(root).value(), 5);
        assert_eq!(tree.node(root).size(), 3);
        assert_eq!(tree.children(root), &[NodeIndex(0)]);
        assert_eq!(tree.parent(NodeIndex(0)), Some(root));
        assert_eq!(tree.parent(root), None);
    }

    #[test]
    fn flat_image() {
        let image = ScalarImage::from_vec(&[3, 4], vec![7u8; 12]).unwrap();
        let tree = ComponentTree::build(&image, Direction::DarkToBright).unwrap();
        assert_eq!(tree.len(), 1);
        let root = tree.root().unwrap();
        assert_eq!(tree.node(root).value(), 7);
        assert_eq!(tree.node(root).size(), 12);
        assert!(tree.children(root).is_empty());
        assert!(tree.to_binary_image(root).all());
    }

    #[test]
    fn flat_image_at_sentinel_level() {
        let image = ScalarImage::from_vec(&[2, 2], vec![255u8; 4]).unwrap();
        let tree = ComponentTree::build(&image, Direction::DarkToBright).unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.node(tree.root().unwrap()).size(), 4);
    }

    #[test]
    fn ramp() {
        let n = 6;
        let tree = tree_1d((0..n as i32).collect(), Direction::DarkToBright);
        assert_eq!(tree.len(), n);
        for (i, node) in tree.iter() {
            let k = i.0 as usize;
            assert_eq!(node.value(), k as i32);
            assert_eq!(node.size(), k + 1);
            if k > 0 {
                assert_eq!(node.children(), &[NodeIndex(k as u32 - 1)]);
            }
        }
        let root = tree.root().unwrap();
        assert_eq!(tree.node(root).value(), n as i32 - 1);
        assert_eq!(members(&tree, root).len(), n);
    }

    #[test]
    fn reaches_sentinel_level() {
        let image = ScalarImage::from_vec(&[3], vec![0u8, 255, 255]).unwrap();
        let tree = ComponentTree::build(&image, Direction::DarkToBright).unwrap();
        assert_eq!(tree.len(), 2);
        let root = tree.root().unwrap();
        assert_eq!(tree.node(root).value(), 255);
        assert_eq!(tree.node(root).size(), 3);
        assert_eq!(tree.children(root), &[NodeIndex(0)]);
    }

    #[test]
    fn two_basins() {
        // two minima separated by a ridge, on a 5x3 image
        #[rustfmt::skip]
        let values = vec![
            1, 1, 9, 3, 3,
            1, 2, 9, 3, 4,
            8, 8, 9, 8, 8,
        ];
        let image = ScalarImage::from_vec(&[5, 3], values).unwrap();
        let tree = ComponentTree::build(&image, Direction::DarkToBright).unwrap();
        let root = tree.root().unwrap();
        assert_eq!(tree.node(root).size(), 15);
        assert_eq!(tree.node(root).value(), 9);

        let left = tree
            .iter()
            .find(|(_, n)| n.value() == 2)
            .map(|(i, _)| i)
            .unwrap();
        assert_eq!(
            members(&tree, left),
            [vec![0, 0], vec![1, 0], vec![0, 1], vec![1, 1]].iter().cloned().collect()
        );
        let right = tree
            .iter()
            .find(|(_, n)| n.value() == 4)
            .map(|(i, _)| i)
            .unwrap();
        assert_eq!(tree.node(right).size(), 4);

        let mask = tree.to_binary_image(left);
        assert_eq!(mask.to_string(),
            "**---\n".to_owned()+
            "**---\n"+
            "-----\n");
    }

    #[test]
    fn coverage_and_monotonic_levels() {
        #[rustfmt::skip]
        let values = vec![
            3, 7, 2, 2, 9, 0,
            4, 7, 1, 8, 9, 0,
            4, 6, 6, 5, 1, 3,
            0, 2, 8, 5, 1, 7,
        ];
        let image = ScalarImage::from_vec(&[6, 4], values).unwrap();
        for &direction in &[Direction::DarkToBright, Direction::BrightToDark] {
            let tree = ComponentTree::build(&image, direction).unwrap();
            let root = tree.root().unwrap();

            let mut seen = BTreeSet::new();
            for position in tree.pixels(root) {
                assert!(seen.insert(position.to_vec()), "pixel {:?} counted twice", position);
            }
            assert_eq!(seen.len(), 24);

            for (index, node) in tree.iter() {
                let own: usize = node.own_pixels().count();
                let below: usize = node.children().iter().map(|&c| tree.node(c).size()).sum();
                assert_eq!(node.size(), own + below);
                if let Some(parent) = node.parent() {
                    assert!(parent > index);
                    assert_ne!(
                        direction.compare(&tree.node(parent).value(), &node.value()),
                        Ordering::Less
                    );
                }
                for position in node.own_pixels() {
                    let level = image.get(position).unwrap();
                    assert_ne!(direction.compare(&level, &node.value()), Ordering::Greater);
                }
            }
        }
    }

    #[test]
    fn direction_symmetry() {
        #[rustfmt::skip]
        let values = vec![
            5, 3, 3, 8,
            5, 1, 6, 8,
            2, 2, 6, 0,
        ];
        let image = ScalarImage::from_vec(&[4, 3], values).unwrap();
        let negated = image.map(|v: i32| -v);

        let up = ComponentTree::build(&image, Direction::DarkToBright).unwrap();
        let down = ComponentTree::build(&negated, Direction::BrightToDark).unwrap();
        assert_eq!(up.len(), down.len());
        assert_eq!(partition(&up), partition(&down));
        for ((_, a), (_, b)) in up.iter().zip(down.iter()) {
            assert_eq!(a.value(), -b.value());
        }
    }

    #[test]
    fn custom_comparator() {
        let image = ScalarImage::from_vec(&[3], vec![5, 1, 5]).unwrap();
        let tree = ComponentTree::build_with(&image, |a: &i32, b: &i32| b.cmp(a), i32::MIN).unwrap();
        let expected = tree_1d(vec![5, 1, 5], Direction::BrightToDark);
        assert_eq!(partition(&tree), partition(&expected));
        assert_eq!(tree.node(tree.root().unwrap()).value(), 1);
    }

    #[test]
    fn infinite_float_levels() {
        let image = ScalarImage::from_vec(&[4], vec![0.0f32, f32::INFINITY, 2.0, f32::NEG_INFINITY]).unwrap();

        let tree = ComponentTree::build(&image, Direction::DarkToBright).unwrap();
        let root = tree.root().unwrap();
        assert_eq!(tree.node(root).value(), f32::INFINITY);
        assert_eq!(tree.node(root).size(), 4);
        assert!(tree.iter().any(|(_, n)| n.value() == f32::NEG_INFINITY && n.size() == 1));

        let tree = ComponentTree::build(&image, Direction::BrightToDark).unwrap();
        let root = tree.root().unwrap();
        assert_eq!(tree.node(root).value(), f32::NEG_INFINITY);
        assert_eq!(tree.node(root).size(), 4);
        assert_eq!(tree.node(NodeIndex(0)).value(), f32::INFINITY);

        let pair = ScalarImage::from_vec(&[2], vec![0.0f64, f64::INFINITY]).unwrap();
        let tree = ComponentTree::build(&pair, Direction::DarkToBright).unwrap();
        assert_eq!(tree.len(), 2);
    }

    /// Level type with no ordering of its own
    #[derive(Clone, Copy, Debug, PartialEq)]
    struct Depth(u8);

    #[test]
    fn unordered_pixel_type() {
        let image = ScalarImage::from_vec(&[3], vec![Depth(5), Depth(1), Depth(5)]).unwrap();
        let tree = ComponentTree::build_with(&image, |a: &Depth, b: &Depth| a.0.cmp(&b.0), Depth(u8::MAX)).unwrap();
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.node(NodeIndex(0)).value(), Depth(1));
        assert_eq!(tree.node(tree.root().unwrap()).value(), Depth(5));
        assert_eq!(tree.node(tree.root().unwrap()).size(), 3);
    }

    #[test]
    fn node_index_conversion() {
        assert_eq!(NodeIndex::from_usize(7), NodeIndex(7));
        assert_eq!(NodeIndex::try_from_usize(NodeIndexElem::MAX as usize), Some(NodeIndex(NodeIndexElem::MAX)));
        #[cfg(target_pointer_width = "64")]
        assert_eq!(NodeIndex::try_from_usize(NodeIndexElem::MAX as usize + 1), None);
    }

    #[test]
    #[cfg(all(debug_assertions, target_pointer_width = "64"))]
    #[should_panic(expected = "exceeds NodeIndexElem")]
    fn node_index_overflow() {
        NodeIndex::from_usize(NodeIndexElem::MAX as usize + 1);
    }

    #[test]
    fn volume() {
        let mut values = vec![0u16; 27];
        values[13] = 10; // centre of the cube
        let image = ScalarImage::from_vec(&[3, 3, 3], values).unwrap();
        let tree = ComponentTree::build(&image, Direction::BrightToDark).unwrap();
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.node(NodeIndex(0)).size(), 1);
        assert_eq!(tree.node(NodeIndex(0)).own_pixels().next(), Some(&[1usize, 1, 1][..]));
        assert_eq!(tree.node(NodeIndex(1)).size(), 27);
    }
}
