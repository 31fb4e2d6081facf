/// A connected component that is still growing
///
/// Partial components live on the builder's stack. Pixels are added as they
/// are absorbed, finished components are merged into the component below
/// them, and the level is raised whenever the flood passes it.
pub trait PartialComponent<T> {
    /// Adds a pixel position.
    fn add_position(&mut self, position: &[usize]);

    /// Absorbs `other`, which becomes a child of `self` in the tree.
    fn merge(&mut self, other: Self)
    where
        Self: Sized;

    fn set_value(&mut self, value: T);

    fn value(&self) -> T;
}

/// Provides new `PartialComponent` instances
pub trait ComponentGenerator<T> {
    type Component: PartialComponent<T>;

    /// The stack floor. Its level must rank at or after every pixel of the image.
    fn create_max_component(&mut self) -> Self::Component;

    fn create_component(&mut self, value: T) -> Self::Component;
}

/// Receives completed components
///
/// `emit` is called once per completed component, children before the
/// components they are merged into. The component keeps growing on the
/// builder's stack afterwards, so handlers take a snapshot of what they need.
pub trait ComponentHandler<C> {
    fn emit(&mut self, component: &mut C);
}

impl<C, F> ComponentHandler<C> for F
where
    F: FnMut(&mut C),
{
    fn emit(&mut self, component: &mut C) {
        self(component)
    }
}
