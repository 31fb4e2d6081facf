use std::cmp::Ordering;

/// A pixel waiting on the heap of boundary pixels
#[derive(Debug, Clone)]
pub struct BoundaryPixel<T> {
    pub position: Vec<usize>,
    pub value: T,
    /// Neighbour index to resume from when this pixel becomes current again
    pub next_neighbor: usize,
}

/// Priority queue of boundary pixels, lowest level first under a comparator
///
/// Records are kept in a pool and recycled through a free list, so the
/// position buffers are allocated once per peak queue size rather than once
/// per pixel. Equal levels are popped in no particular order.
#[derive(Debug, Clone)]
pub struct BoundaryQueue<T> {
    pool: Vec<BoundaryPixel<T>>,
    free: Vec<usize>,
    heap: Vec<usize>,
}

impl<T> Default for BoundaryQueue<T> {
    fn default() -> Self {
        Self {
            pool: Vec::new(),
            free: Vec::new(),
            heap: Vec::new(),
        }
    }
}

impl<T: Copy> BoundaryQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Number of records ever allocated
    pub fn capacity(&self) -> usize {
        self.pool.len()
    }

    pub fn push(
        &mut self,
        position: &[usize],
        value: T,
        next_neighbor: usize,
        compare: &dyn Fn(&T, &T) -> Ordering,
    ) {
        let slot = match self.free.pop() {
            Some(slot) => {
                let pixel = &mut self.pool[slot];
                pixel.position.clear();
                pixel.position.extend_from_slice(position);
                pixel.value = value;
                pixel.next_neighbor = next_neighbor;
                slot
            }
            None => {
                self.pool.push(BoundaryPixel {
                    position: position.to_vec(),
                    value,
                    next_neighbor,
                });
                self.pool.len() - 1
            }
        };
        self.heap.push(slot);
        self.sift_up(self.heap.len() - 1, compare);
    }

    /// Removes the lowest pixel and returns its slot. The record stays readable
    /// through `pixel` until it is handed back with `release`.
    pub fn pop(&mut self, compare: &dyn Fn(&T, &T) -> Ordering) -> Option<usize> {
        if self.heap.is_empty() {
            return None;
        }
        let slot = self.heap.swap_remove(0);
        if !self.heap.is_empty() {
            self.sift_down(0, compare);
        }
        Some(slot)
    }

    pub fn pixel(&self, slot: usize) -> &BoundaryPixel<T> {
        &self.pool[slot]
    }

    pub fn release(&mut self, slot: usize) {
        self.free.push(slot);
    }

    fn less(&self, a: usize, b: usize, compare: &dyn Fn(&T, &T) -> Ordering) -> bool {
        compare(&self.pool[self.heap[a]].value, &self.pool[self.heap[b]].value) == Ordering::Less
    }

    fn sift_up(&mut self, mut i: usize, compare: &dyn Fn(&T, &T) -> Ordering) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if !self.less(i, parent, compare) {
                break;
            }
            self.heap.swap(i, parent);
            i = parent;
        }
    }

    fn sift_down(&mut self, mut i: usize, compare: &dyn Fn(&T, &T) -> Ordering) {
        let len = self.heap.len();
        loop {
            let left = 2 * i + 1;
            let right = left + 1;
            let mut smallest = i;
            if left < len && self.less(left, smallest, compare) {
                smallest = left;
            }
            if right < len && self.less(right, smallest, compare) {
                smallest = right;
            }
            if smallest == i {
                break;
            }
            self.heap.swap(i, smallest);
            i = smallest;
        }
    }
}
