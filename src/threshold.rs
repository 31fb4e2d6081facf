//! Pointwise thresholding of scalar images into binary images

use log::debug;
use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::{BinaryImage, BitVec, ScalarImage};

/// A contiguous range of pixel indices processed by one worker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk {
    pub start: usize,
    pub len: usize,
}

/// Splits `0..len` into at most `num_chunks` contiguous chunks of equal size.
/// The last chunk takes the remainder.
pub fn divide_into_chunks(len: usize, num_chunks: usize) -> Vec<Chunk> {
    let num_chunks = num_chunks.max(1).min(len.max(1));
    let step = len / num_chunks;
    (0..num_chunks)
        .map(|i| {
            let start = i * step;
            let end = if i + 1 == num_chunks { len } else { start + step };
            Chunk { start, len: end - start }
        })
        .collect()
}

/// Returns a binary image of the same shape as `source`.
///
/// With `above` set, a pixel is true when its value is greater than
/// `threshold`; otherwise when it is less. The pixels are divided into
/// `num_threads` chunks, each handled by its own worker.
pub fn threshold<T>(
    source: &ScalarImage<T>,
    threshold: T,
    above: bool,
    num_threads: usize,
) -> Result<BinaryImage>
where
    T: PartialOrd + Copy + Send + Sync,
{
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads.max(1))
        .build()
        .map_err(|e| Error::ThreadPool(e.to_string()))?;

    let pixels = source.pixels();
    let chunks = divide_into_chunks(pixels.len(), num_threads);
    debug!(
        "threshold: pixels={} chunks={} above={}",
        pixels.len(),
        chunks.len(),
        above
    );

    let parts: Vec<Vec<bool>> = pool.install(|| {
        chunks
            .par_iter()
            .map(|chunk| {
                pixels[chunk.start..chunk.start + chunk.len]
                    .iter()
                    .map(|v| if above { *v > threshold } else { *v < threshold })
                    .collect::<Vec<bool>>()
            })
            .collect()
    });

    let mut bits = BitVec::with_capacity(pixels.len());
    for part in parts {
        bits.extend(part);
    }
    BinaryImage::from_bits(source.field().dimensions(), bits)
}
