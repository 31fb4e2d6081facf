/// Stack of partial components resting on a sentinel floor
///
/// The floor is held apart from the poppable entries, so the stack can never
/// run empty. When the image reaches the sentinel level the floor itself
/// becomes the active component.
pub(crate) struct ComponentStack<C> {
    floor: C,
    partial: Vec<C>,
}

impl<C> ComponentStack<C> {
    pub fn new(floor: C) -> Self {
        Self {
            floor,
            partial: Vec::new(),
        }
    }

    pub fn push(&mut self, component: C) {
        self.partial.push(component);
    }

    /// Pops the top component; the floor is never popped.
    pub fn pop(&mut self) -> Option<C> {
        self.partial.pop()
    }

    pub fn top_mut(&mut self) -> &mut C {
        match self.partial.last_mut() {
            Some(top) => top,
            None => &mut self.floor,
        }
    }

    pub fn is_floor_active(&self) -> bool {
        self.partial.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &C> + '_ {
        std::iter::once(&self.floor).chain(self.partial.iter())
    }
}
