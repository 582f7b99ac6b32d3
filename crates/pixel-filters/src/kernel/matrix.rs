//! FilterMatrix: the numeric kernel shared by convolution and diffusion.

use crate::error::FilterError;

/// A rectangular matrix of `f64` weights with odd dimensions.
///
/// The anchor is the exact center cell `((width - 1) / 2, (height - 1) / 2)`.
/// Convolution reads the matrix symmetrically around the anchor; error
/// diffusion requires it to be causal (see [`check_causal()`](Self::check_causal)).
///
/// Weights are stored row-major.
///
/// # Example
///
/// ```
/// use pixel_filters::FilterMatrix;
///
/// let sharpen = FilterMatrix::from_rows(&[
///     [0.0, -1.0, 0.0],
///     [-1.0, 5.0, -1.0],
///     [0.0, -1.0, 0.0],
/// ])
/// .unwrap();
/// assert_eq!(sharpen.anchor(), (1, 1));
/// assert_eq!(sharpen.get(1, 1), 5.0);
///
/// // Even dimensions have no center cell
/// assert!(FilterMatrix::from_rows(&[[1.0, 1.0], [1.0, 1.0]]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FilterMatrix {
    weights: Vec<f64>,
    width: usize,
    height: usize,
}

impl FilterMatrix {
    /// Create a matrix from row-major weights.
    ///
    /// # Errors
    ///
    /// [`FilterError::InvalidKernelShape`] if either dimension is zero or
    /// even, or if `weights.len() != width * height`.
    pub fn new(width: usize, height: usize, weights: Vec<f64>) -> Result<Self, FilterError> {
        if width == 0 || height == 0 || width % 2 == 0 || height % 2 == 0 {
            return Err(FilterError::InvalidKernelShape { width, height });
        }
        if weights.len() != width * height {
            return Err(FilterError::InvalidKernelShape {
                width: weights.len() / height,
                height,
            });
        }
        Ok(Self {
            weights,
            width,
            height,
        })
    }

    /// Create a matrix from a slice of equally long rows.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, FilterError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.as_ref().len());
        if let Some(bad) = rows.iter().find(|r| r.as_ref().len() != width) {
            return Err(FilterError::InvalidKernelShape {
                width: bad.as_ref().len(),
                height,
            });
        }
        let weights = rows.iter().flat_map(|r| r.as_ref().iter().copied()).collect();
        Self::new(width, height, weights)
    }

    /// The 1x1 identity matrix `[[1]]`.
    pub fn identity() -> Self {
        Self {
            weights: vec![1.0],
            width: 1,
            height: 1,
        }
    }

    /// Built-in matrices are known-good; skip validation.
    pub(crate) fn from_static(width: usize, height: usize, weights: &[f64]) -> Self {
        debug_assert!(width % 2 == 1 && height % 2 == 1);
        debug_assert_eq!(weights.len(), width * height);
        Self {
            weights: weights.to_vec(),
            width,
            height,
        }
    }

    /// Number of columns.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Horizontal distance from the anchor to the matrix edge.
    #[inline]
    pub fn radius_x(&self) -> usize {
        (self.width - 1) / 2
    }

    /// Vertical distance from the anchor to the matrix edge.
    #[inline]
    pub fn radius_y(&self) -> usize {
        (self.height - 1) / 2
    }

    /// Anchor cell as `(column, row)`.
    #[inline]
    pub fn anchor(&self) -> (usize, usize) {
        (self.radius_x(), self.radius_y())
    }

    /// Weight at `row`, `col`.
    ///
    /// # Panics
    ///
    /// If the cell lies outside the matrix.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        assert!(row < self.height && col < self.width, "matrix cell out of range");
        self.weights[row * self.width + col]
    }

    /// Row-major weights.
    #[inline]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Sum of all weights.
    pub fn sum(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// Non-zero cells as `(row, col, weight)`, in row-major order.
    pub fn nonzero_cells(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.weights
            .iter()
            .enumerate()
            .filter(|(_, w)| **w != 0.0)
            .map(move |(i, &w)| (i / self.width, i % self.width, w))
    }

    /// Verify that every non-zero cell lies after the anchor in raster order.
    ///
    /// Error diffusion only pushes error forward, onto pixels not yet
    /// visited: rows below the anchor, or cells to the right of it on the
    /// anchor row. The anchor itself must be zero.
    pub fn check_causal(&self) -> Result<(), FilterError> {
        let (ax, ay) = self.anchor();
        match self
            .nonzero_cells()
            .find(|&(row, col, _)| row < ay || (row == ay && col <= ax))
        {
            Some((row, col, _)) => Err(FilterError::NonCausalKernel { row, col }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_zero_and_even_dimensions() {
        assert!(matches!(
            FilterMatrix::new(0, 1, vec![]),
            Err(FilterError::InvalidKernelShape { width: 0, height: 1 })
        ));
        assert!(matches!(
            FilterMatrix::new(3, 2, vec![0.0; 6]),
            Err(FilterError::InvalidKernelShape { width: 3, height: 2 })
        ));
    }

    #[test]
    fn test_rejects_length_mismatch() {
        assert!(FilterMatrix::new(3, 3, vec![0.0; 8]).is_err());
    }

    #[test]
    fn test_rejects_ragged_rows() {
        let rows: Vec<Vec<f64>> = vec![vec![1.0, 2.0, 3.0], vec![1.0], vec![1.0, 2.0, 3.0]];
        assert!(FilterMatrix::from_rows(&rows).is_err());
    }

    #[test]
    fn test_rectangular_matrix_radii() {
        let m = FilterMatrix::new(5, 3, vec![0.0; 15]).unwrap();
        assert_eq!(m.radius_x(), 2);
        assert_eq!(m.radius_y(), 1);
        assert_eq!(m.anchor(), (2, 1));
    }

    #[test]
    fn test_identity() {
        let m = FilterMatrix::identity();
        assert_eq!(m.anchor(), (0, 0));
        assert_eq!(m.sum(), 1.0);
    }

    #[test]
    fn test_nonzero_cells_order() {
        let m = FilterMatrix::from_rows(&[[0.0, 2.0, 0.0], [0.0, 0.0, 0.0], [3.0, 0.0, 4.0]])
            .unwrap();
        let cells: Vec<_> = m.nonzero_cells().collect();
        assert_eq!(cells, vec![(0, 1, 2.0), (2, 0, 3.0), (2, 2, 4.0)]);
    }

    #[test]
    fn test_check_causal() {
        let forward =
            FilterMatrix::from_rows(&[[0.0, 0.0, 0.0], [0.0, 0.0, 0.5], [0.5, 0.0, 0.0]]).unwrap();
        assert!(forward.check_causal().is_ok());

        let left = FilterMatrix::from_rows(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 0.0]])
            .unwrap();
        assert_eq!(
            left.check_causal(),
            Err(FilterError::NonCausalKernel { row: 1, col: 0 })
        );

        let anchor =
            FilterMatrix::from_rows(&[[0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 0.0]]).unwrap();
        assert!(anchor.check_causal().is_err());

        let above =
            FilterMatrix::from_rows(&[[0.0, 0.0, 1.0], [0.0, 0.0, 0.0], [0.0, 0.0, 0.0]]).unwrap();
        assert!(above.check_causal().is_err());
    }
}
