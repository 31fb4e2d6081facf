/// Resumable walk over the 2n axis-aligned neighbours of a pixel
///
/// Index 0 is the pixel at x-1, 1 is x+1, 2 is y-1, 3 is y+1, and so on.
#[derive(Debug, Clone)]
pub struct Neighborhood {
    n: usize,
    bound: usize,
    dimensions: Vec<usize>,
}

impl Neighborhood {
    pub fn new(dimensions: &[usize]) -> Self {
        Self {
            n: 0,
            bound: dimensions.len() * 2,
            dimensions: dimensions.to_vec(),
        }
    }

    /// Index of the next neighbour to visit
    pub fn next_index(&self) -> usize {
        self.n
    }

    pub fn set_next_index(&mut self, n: usize) {
        self.n = n;
    }

    pub fn reset(&mut self) {
        self.n = 0;
    }

    pub fn has_next(&self) -> bool {
        self.n < self.bound
    }

    /// Writes the next neighbour of `current` into `neighbor` and advances.
    /// Returns false if that neighbour lies outside of the image.
    pub fn next(&mut self, current: &[usize], neighbor: &mut [usize]) -> bool {
        let d = self.n / 2;
        let backward = self.n % 2 == 0;
        self.n += 1;
        neighbor.copy_from_slice(current);
        if backward {
            if current[d] == 0 {
                return false;
            }
            neighbor[d] -= 1;
            true
        } else {
            neighbor[d] += 1;
            neighbor[d] < self.dimensions[d]
        }
    }
}
