//! Error diffusion kernel definitions.
//!
//! Each kernel is a causal [`FilterMatrix`] whose anchor (the center cell)
//! marks the pixel being quantized. Non-zero cells sit to the right of the
//! anchor or on rows below it, so error only ever flows to pixels that have
//! not been visited yet.
//!
//! The matrices keep the shape of the classic tables, padded with zero rows
//! above the anchor where needed to keep it centered. The padding widens the
//! untouched border (see [`crate::diffusion`]).

use std::fmt;
use std::str::FromStr;

use super::matrix::FilterMatrix;

/// Named error diffusion kernel.
///
/// # Example
///
/// ```
/// use pixel_filters::DiffusionKernel;
///
/// let fs: DiffusionKernel = "floyd-steinberg".parse().unwrap();
/// let matrix = fs.matrix();
/// assert_eq!((matrix.width(), matrix.height()), (3, 3));
/// assert!(matrix.check_causal().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiffusionKernel {
    /// Floyd-Steinberg, 4 neighbors, 100% propagation.
    ///
    /// ```text
    ///        X   7
    ///    3   5   1     (/16)
    /// ```
    #[default]
    FloydSteinberg,

    /// Burkes, 7 neighbors over 2 rows, 100% propagation.
    ///
    /// ```text
    ///            X   8   4
    ///    2   4   8   4   2     (/32)
    /// ```
    Burkes,

    /// Stucki, 12 neighbors over 3 rows, 100% propagation.
    ///
    /// ```text
    ///            X   8   4
    ///    2   4   8   4   2
    ///    1   2   4   2   1     (/42)
    /// ```
    Stucki,

    /// Sierra (full), 10 neighbors over 3 rows, 100% propagation.
    ///
    /// ```text
    ///            X   5   3
    ///    2   4   5   4   2
    ///        2   3   2         (/32)
    /// ```
    Sierra,

    /// Sierra two-row, 7 neighbors over 2 rows, 100% propagation.
    ///
    /// ```text
    ///            X   4   3
    ///    1   2   3   2   1     (/16)
    /// ```
    SierraTwoRow,

    /// Sierra lite, 3 neighbors, 100% propagation.
    ///
    /// ```text
    ///        X   2
    ///    1   1             (/4)
    /// ```
    SierraLite,

    /// Atkinson, 6 neighbors, 75% propagation.
    ///
    /// ```text
    ///            X   1   1
    ///        1   1   1
    ///            1             (/8)
    /// ```
    ///
    /// The lost quarter of the error is what gives Atkinson its
    /// high-contrast look.
    Atkinson,

    /// Jarvis-Judice-Ninke, 12 neighbors over 3 rows, 100% propagation.
    ///
    /// ```text
    ///            X   7   5
    ///    3   5   7   5   3
    ///    1   3   5   3   1     (/48)
    /// ```
    JarvisJudiceNinke,
}

impl DiffusionKernel {
    /// Every kernel, in catalogue order.
    pub const ALL: [DiffusionKernel; 8] = [
        DiffusionKernel::FloydSteinberg,
        DiffusionKernel::Burkes,
        DiffusionKernel::Stucki,
        DiffusionKernel::Sierra,
        DiffusionKernel::SierraTwoRow,
        DiffusionKernel::SierraLite,
        DiffusionKernel::Atkinson,
        DiffusionKernel::JarvisJudiceNinke,
    ];

    /// Config/CLI name of the kernel.
    pub fn name(self) -> &'static str {
        match self {
            DiffusionKernel::FloydSteinberg => "floyd-steinberg",
            DiffusionKernel::Burkes => "burkes",
            DiffusionKernel::Stucki => "stucki",
            DiffusionKernel::Sierra => "sierra",
            DiffusionKernel::SierraTwoRow => "sierra-two-row",
            DiffusionKernel::SierraLite => "sierra-lite",
            DiffusionKernel::Atkinson => "atkinson",
            DiffusionKernel::JarvisJudiceNinke => "jarvis-judice-ninke",
        }
    }

    /// Build the kernel's causal matrix.
    pub fn matrix(self) -> FilterMatrix {
        match self {
            DiffusionKernel::FloydSteinberg => scaled(
                3,
                3,
                16.0,
                &[
                    0.0, 0.0, 0.0, //
                    0.0, 0.0, 7.0, //
                    3.0, 5.0, 1.0,
                ],
            ),
            DiffusionKernel::Burkes => scaled(
                5,
                3,
                32.0,
                &[
                    0.0, 0.0, 0.0, 0.0, 0.0, //
                    0.0, 0.0, 0.0, 8.0, 4.0, //
                    2.0, 4.0, 8.0, 4.0, 2.0,
                ],
            ),
            DiffusionKernel::Stucki => scaled(
                5,
                5,
                42.0,
                &[
                    0.0, 0.0, 0.0, 0.0, 0.0, //
                    0.0, 0.0, 0.0, 0.0, 0.0, //
                    0.0, 0.0, 0.0, 8.0, 4.0, //
                    2.0, 4.0, 8.0, 4.0, 2.0, //
                    1.0, 2.0, 4.0, 2.0, 1.0,
                ],
            ),
            DiffusionKernel::Sierra => scaled(
                5,
                5,
                32.0,
                &[
                    0.0, 0.0, 0.0, 0.0, 0.0, //
                    0.0, 0.0, 0.0, 0.0, 0.0, //
                    0.0, 0.0, 0.0, 5.0, 3.0, //
                    2.0, 4.0, 5.0, 4.0, 2.0, //
                    0.0, 2.0, 3.0, 2.0, 0.0,
                ],
            ),
            DiffusionKernel::SierraTwoRow => scaled(
                5,
                3,
                16.0,
                &[
                    0.0, 0.0, 0.0, 0.0, 0.0, //
                    0.0, 0.0, 0.0, 4.0, 3.0, //
                    1.0, 2.0, 3.0, 2.0, 1.0,
                ],
            ),
            DiffusionKernel::SierraLite => scaled(
                3,
                3,
                4.0,
                &[
                    0.0, 0.0, 0.0, //
                    0.0, 0.0, 2.0, //
                    1.0, 1.0, 0.0,
                ],
            ),
            DiffusionKernel::Atkinson => scaled(
                5,
                5,
                8.0,
                &[
                    0.0, 0.0, 0.0, 0.0, 0.0, //
                    0.0, 0.0, 0.0, 0.0, 0.0, //
                    0.0, 0.0, 0.0, 1.0, 1.0, //
                    0.0, 1.0, 1.0, 1.0, 0.0, //
                    0.0, 0.0, 1.0, 0.0, 0.0,
                ],
            ),
            DiffusionKernel::JarvisJudiceNinke => scaled(
                5,
                5,
                48.0,
                &[
                    0.0, 0.0, 0.0, 0.0, 0.0, //
                    0.0, 0.0, 0.0, 0.0, 0.0, //
                    0.0, 0.0, 0.0, 7.0, 5.0, //
                    3.0, 5.0, 7.0, 5.0, 3.0, //
                    1.0, 3.0, 5.0, 3.0, 1.0,
                ],
            ),
        }
    }
}

fn scaled(width: usize, height: usize, divisor: f64, numerators: &[f64]) -> FilterMatrix {
    let weights: Vec<f64> = numerators.iter().map(|n| n / divisor).collect();
    FilterMatrix::from_static(width, height, &weights)
}

impl fmt::Display for DiffusionKernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for an unrecognised kernel name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown diffusion kernel '{0}'")]
pub struct UnknownKernel(pub String);

impl FromStr for DiffusionKernel {
    type Err = UnknownKernel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        match lower.as_str() {
            "floyd-steinberg" | "floydsteinberg" => Ok(DiffusionKernel::FloydSteinberg),
            "burkes" => Ok(DiffusionKernel::Burkes),
            // "Stucky" is a common misspelling
            "stucki" | "stucky" => Ok(DiffusionKernel::Stucki),
            "sierra" => Ok(DiffusionKernel::Sierra),
            "sierra-two-row" => Ok(DiffusionKernel::SierraTwoRow),
            "sierra-lite" => Ok(DiffusionKernel::SierraLite),
            "atkinson" => Ok(DiffusionKernel::Atkinson),
            "jarvis-judice-ninke" | "jjn" => Ok(DiffusionKernel::JarvisJudiceNinke),
            _ => Err(UnknownKernel(s.to_string())),
        }
    }
}
