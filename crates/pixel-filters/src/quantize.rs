//! Region-mean color reduction.
//!
//! Each channel's `0..=255` range is cut into `N` equal regions of width
//! `step = 255 / N`. A value belongs to region `floor(v / step)`. Every
//! value is then replaced by the mean of all values in the image that fall
//! in the same region, per channel.
//!
//! Means depend on the whole image, so this takes two passes over the
//! pixels: one to accumulate per-region sums and counts, one to write.
//! The rounded mean of integers in a region stays inside that region,
//! which makes a second application a no-op.
//!
//! Only regions that some byte value can fall in are tracked, so at most
//! 256 per channel. Counts of 256 or more give one value per region and
//! leave the channel unchanged.

use crate::buffer::{clamp_byte, PixelBuffer, BLUE, BYTES_PER_PIXEL, GREEN, RED};
use crate::error::{Channel, FilterError};
use crate::filter::ImageFilter;

/// Number of regions per color channel. Fractional counts are allowed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionCounts {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl RegionCounts {
    pub const DEFAULT: f64 = 16.0;

    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// The same count for all three channels.
    pub fn uniform(n: f64) -> Self {
        Self::new(n, n, n)
    }
}

impl Default for RegionCounts {
    fn default() -> Self {
        Self::uniform(Self::DEFAULT)
    }
}

/// Per-channel region bookkeeping.
#[derive(Debug)]
struct Regions {
    /// Byte value to dense region index.
    lookup: [u8; 256],
    sums: Vec<f64>,
    counts: Vec<u64>,
}

impl Regions {
    fn new(count: f64) -> Self {
        let step = 255.0 / count;
        let mut lookup = [0u8; 256];
        let mut index = 0u8;
        let mut previous = None;
        for (v, slot) in lookup.iter_mut().enumerate() {
            let region = (v as f64 / step).floor();
            if previous.is_some_and(|p| p != region) {
                index += 1;
            }
            previous = Some(region);
            *slot = index;
        }

        let len = index as usize + 1;
        Self {
            lookup,
            sums: vec![0.0; len],
            counts: vec![0; len],
        }
    }

    #[inline]
    fn index(&self, v: u8) -> usize {
        self.lookup[v as usize] as usize
    }

    #[inline]
    fn add(&mut self, v: u8) {
        let i = self.index(v);
        self.sums[i] += v as f64;
        self.counts[i] += 1;
    }

    /// Replace sums with means. Empty regions keep a mean of zero.
    fn finish(&mut self) {
        for (sum, &count) in self.sums.iter_mut().zip(&self.counts) {
            if count > 0 {
                *sum /= count as f64;
            }
        }
    }

    #[inline]
    fn mean_of(&self, v: u8) -> u8 {
        clamp_byte(self.sums[self.index(v)])
    }
}

/// Uniform quantization to region means. Alpha is copied from the source.
///
/// # Example
///
/// ```
/// use pixel_filters::{ImageFilter, PixelBuffer, RegionCounts, UniformQuantization};
///
/// let filter = UniformQuantization::new(RegionCounts::uniform(2.0)).unwrap();
/// let source = PixelBuffer::from_packed(2, 1, vec![0, 0, 0, 255, 100, 100, 100, 255]).unwrap();
/// let out = filter.apply(&source);
///
/// // 0 and 100 share the lower region (step 127.5); both become 50
/// assert_eq!(out.pixel(0, 0).unwrap(), [50, 50, 50, 255]);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct UniformQuantization {
    regions: RegionCounts,
}

impl UniformQuantization {
    /// Rejects a zero count with [`FilterError::DivideByZero`] and a
    /// negative or non-finite one with [`FilterError::InvalidRegionCount`].
    pub fn new(regions: RegionCounts) -> Result<Self, FilterError> {
        for (channel, count) in [
            (Channel::Red, regions.r),
            (Channel::Green, regions.g),
            (Channel::Blue, regions.b),
        ] {
            if count == 0.0 {
                return Err(FilterError::DivideByZero { channel });
            }
            if !count.is_finite() || count < 0.0 {
                return Err(FilterError::InvalidRegionCount { channel, count });
            }
        }
        Ok(Self { regions })
    }

    pub fn regions(&self) -> RegionCounts {
        self.regions
    }
}

impl ImageFilter for UniformQuantization {
    fn apply(&self, source: &PixelBuffer) -> PixelBuffer {
        let mut output = source.to_packed();

        // Indexed like the pixel bytes: [BLUE, GREEN, RED]
        let mut regions = [
            Regions::new(self.regions.b),
            Regions::new(self.regions.g),
            Regions::new(self.regions.r),
        ];

        for px in output.data().chunks_exact(BYTES_PER_PIXEL) {
            for c in [BLUE, GREEN, RED] {
                regions[c].add(px[c]);
            }
        }

        for r in &mut regions {
            r.finish();
        }

        for px in output.data_mut().chunks_exact_mut(BYTES_PER_PIXEL) {
            for c in [BLUE, GREEN, RED] {
                px[c] = regions[c].mean_of(px[c]);
            }
        }

        output
    }

    fn label(&self) -> String {
        format!(
            "Quantization {}/{}/{}",
            self.regions.r, self.regions.g, self.regions.b
        )
    }
}
