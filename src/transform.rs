use crate::envelope::{self, LineScratch};
use crate::error::TransformError;
use crate::grid::ScalarGrid;
use crate::partition::split_lines;
use crate::shape::GridShape;
use rayon::prelude::*;

/// Output value type of the transform.
///
/// The sentinel is the maximum representable magnitude and marks cells no
/// feature has reached yet; the range validation at call entry guarantees
/// legitimate squared distances stay strictly below it. Per-line arithmetic
/// runs in `f64` and converts at the grid boundary.
pub trait Distance: Copy + PartialOrd + Send + Sync + 'static {
    const SENTINEL: Self;

    fn from_f64(value: f64) -> Self;
    fn to_f64(self) -> f64;
}

impl Distance for f32 {
    const SENTINEL: Self = f32::MAX;

    fn from_f64(value: f64) -> Self {
        value as f32
    }

    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl Distance for f64 {
    const SENTINEL: Self = f64::MAX;

    fn from_f64(value: f64) -> Self {
        value
    }

    fn to_f64(self) -> f64 {
        self
    }
}

/// Configuration of one transform invocation.
///
/// Cells whose label differs from `background` are the feature sites, i.e.
/// the zero-distance "inside" class; deciding what counts as a feature
/// (thresholding, border extraction) is the caller's job.
#[derive(Clone, Copy, Debug)]
pub struct TransformConfig<L> {
    /// Label value of the background class.
    pub background: L,
    /// Multiply axis offsets by the grid's spacing before squaring. When
    /// off, distances are purely index-based even on a spaced grid.
    pub use_spacing: bool,
    /// Skip the final square root and return squared distances.
    pub squared_distance: bool,
    /// Give the feature class positive sign. When off, features are
    /// negative and background is positive.
    pub inside_is_positive: bool,
}

impl<L: Default> Default for TransformConfig<L> {
    fn default() -> Self {
        TransformConfig {
            background: L::default(),
            use_spacing: false,
            squared_distance: false,
            inside_is_positive: false,
        }
    }
}

/// The signed exact Euclidean distance transform engine.
///
/// One call runs D sequential passes over a D-dimensional label grid, one
/// per axis. Each pass folds that axis into the per-cell squared distances
/// through a lower-envelope merge on every 1-D line, with lines fanned out
/// over the ambient rayon pool; passes are separated by a fork-join
/// barrier. Results are exact and independent of the worker count.
///
/// ```
/// use sweepdist::{DistanceTransform, GridShape, ScalarGrid, TransformConfig};
///
/// let labels = ScalarGrid::from_vec(GridShape::new(&[5]), vec![0u8, 0, 1, 0, 0]);
/// let engine = DistanceTransform::new(TransformConfig {
///     squared_distance: true,
///     ..TransformConfig::default()
/// });
/// let field = engine.transform::<f64>(&labels).unwrap();
/// assert_eq!(field.as_slice(), &[4.0, 1.0, 0.0, 1.0, 4.0]);
/// ```
pub struct DistanceTransform<L> {
    config: TransformConfig<L>,
}

/// Shares the distance buffer across the workers of one pass. Plain `&mut`
/// splitting does not fit here because regions interleave in memory
/// whenever the sweep axis is outermost.
#[derive(Clone, Copy)]
struct PassOutput<T>(*mut T);

// SAFETY: within one pass every worker owns a disjoint set of lines,
// guaranteed by the partitioner tiling the split axis exactly once, and no
// worker reads cells outside its own lines.
unsafe impl<T> Send for PassOutput<T> {}
unsafe impl<T> Sync for PassOutput<T> {}

impl<T: Distance> PassOutput<T> {
    /// # Safety
    ///
    /// `index` must lie on a line owned by the calling worker.
    unsafe fn load(&self, index: usize) -> f64 {
        unsafe { (*self.0.add(index)).to_f64() }
    }

    /// # Safety
    ///
    /// `index` must lie on a line owned by the calling worker.
    unsafe fn store(&self, index: usize, value: f64) {
        unsafe { *self.0.add(index) = T::from_f64(value) }
    }
}

impl<L: Copy + PartialEq + Send + Sync> DistanceTransform<L> {
    pub fn new(config: TransformConfig<L>) -> DistanceTransform<L> {
        DistanceTransform { config }
    }

    pub fn config(&self) -> &TransformConfig<L> {
        &self.config
    }

    /// Runs the transform, allocating the output grid.
    ///
    /// The output carries the same shape and spacing as the label grid. If
    /// the grid contains no feature cell at all, every output magnitude is
    /// the sentinel of `T` (or its square root).
    pub fn transform<T: Distance>(
        &self,
        labels: &ScalarGrid<L>,
    ) -> Result<ScalarGrid<T>, TransformError> {
        let mut output = ScalarGrid::new(labels.shape().clone(), T::SENTINEL);
        self.transform_into(labels, &mut output)?;
        Ok(output)
    }

    /// Runs the transform into a caller-provided grid of matching extents.
    pub fn transform_into<T: Distance>(
        &self,
        labels: &ScalarGrid<L>,
        output: &mut ScalarGrid<T>,
    ) -> Result<(), TransformError> {
        self.validate(labels, output)?;

        let shape = labels.shape();
        if shape.is_empty() {
            // Degenerate grid: nothing to compute, not an error.
            return Ok(());
        }

        let background = self.config.background;

        // Feature cells start at zero, everything else at the sentinel.
        output
            .as_mut_slice()
            .par_iter_mut()
            .zip(labels.as_slice().par_iter())
            .for_each(|(distance, label)| {
                *distance = if *label != background {
                    T::from_f64(0.0)
                } else {
                    T::SENTINEL
                };
            });

        let workers = rayon::current_num_threads();
        let sentinel = T::SENTINEL.to_f64();

        for axis in 0..shape.ndim() {
            let n = shape.extent(axis);
            if n <= 1 {
                // A single cell along an axis separates nothing.
                continue;
            }

            let step = self.step(axis, shape);
            let stride = shape.stride(axis);
            let pass = PassOutput(output.as_mut_slice().as_mut_ptr());

            // Fork-join barrier: the next axis must see this pass complete.
            split_lines(shape, axis, workers)
                .into_par_iter()
                .for_each_init(
                    || (LineScratch::new(), vec![0.0f64; n]),
                    |(scratch, line), region| {
                        // Going through the methods keeps the closure
                        // capturing the wrapper, not its raw pointer field,
                        // so the Send/Sync impls above apply.
                        region.for_each_line(shape, axis, |origin| {
                            for (i, cell) in line.iter_mut().enumerate() {
                                // SAFETY: this line belongs to exactly one
                                // region of the pass, see PassOutput.
                                *cell = unsafe { pass.load(origin + i * stride) };
                            }
                            envelope::update_line(line, step, sentinel, scratch);
                            for (i, cell) in line.iter().enumerate() {
                                // SAFETY: as above, writes stay on this line.
                                unsafe { pass.store(origin + i * stride, *cell) };
                            }
                        });
                    },
                );
        }

        self.finalize(labels, output);
        Ok(())
    }

    /// Weighted spacing of one axis: the physical step between neighboring
    /// cells, or 1 when spacing is disabled.
    fn step(&self, axis: usize, shape: &GridShape) -> f64 {
        if self.config.use_spacing {
            shape.spacing(axis)
        } else {
            1.0
        }
    }

    fn validate<T: Distance>(
        &self,
        labels: &ScalarGrid<L>,
        output: &ScalarGrid<T>,
    ) -> Result<(), TransformError> {
        let shape = labels.shape();

        if shape.ndim() == 0 {
            return Err(TransformError::ZeroDimensional);
        }

        if shape.extents() != output.shape().extents() {
            return Err(TransformError::ShapeMismatch {
                labels: shape.extents().to_vec(),
                output: output.shape().extents().to_vec(),
            });
        }

        if self.config.use_spacing {
            for axis in 0..shape.ndim() {
                let value = shape.spacing(axis);
                if !(value > 0.0) {
                    return Err(TransformError::InvalidSpacing { axis, value });
                }
            }
        }

        // The sentinel must stay distinguishable from every legitimate sum
        // of squared per-axis offsets, checked once here rather than
        // discovered mid-computation.
        let sentinel = T::SENTINEL.to_f64();
        let required: f64 = (0..shape.ndim())
            .map(|axis| {
                let reach = shape.extent(axis).saturating_sub(1) as f64 * self.step(axis, shape);
                reach * reach
            })
            .sum();
        if required >= sentinel {
            return Err(TransformError::InsufficientRange { required, sentinel });
        }

        Ok(())
    }

    /// Converts accumulated squared magnitudes into the requested output
    /// representation: optional square root, then the sign demanded by the
    /// cell's class and the `inside_is_positive` policy.
    fn finalize<T: Distance>(&self, labels: &ScalarGrid<L>, output: &mut ScalarGrid<T>) {
        let background = self.config.background;
        let squared = self.config.squared_distance;
        let inside_is_positive = self.config.inside_is_positive;

        output
            .as_mut_slice()
            .par_iter_mut()
            .zip(labels.as_slice().par_iter())
            .for_each(|(distance, label)| {
                let mut magnitude = distance.to_f64().abs();
                if !squared {
                    magnitude = magnitude.sqrt();
                }
                let inside = *label != background;
                *distance = T::from_f64(if inside == inside_is_positive {
                    magnitude
                } else {
                    -magnitude
                });
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::GridShape;

    #[test]
    fn test_zero_dimensional_grid_is_rejected() {
        let labels: ScalarGrid<u8> = ScalarGrid::new(GridShape::new(&[]), 0);
        let engine = DistanceTransform::new(TransformConfig::default());
        assert_eq!(
            engine.transform::<f64>(&labels).unwrap_err(),
            TransformError::ZeroDimensional
        );
    }

    #[test]
    fn test_non_positive_spacing_is_rejected() {
        let shape = GridShape::with_spacing(&[4, 4], &[1.0, -2.0]);
        let labels: ScalarGrid<u8> = ScalarGrid::new(shape, 0);
        let engine = DistanceTransform::new(TransformConfig {
            use_spacing: true,
            ..TransformConfig::default()
        });
        assert_eq!(
            engine.transform::<f64>(&labels).unwrap_err(),
            TransformError::InvalidSpacing {
                axis: 1,
                value: -2.0
            }
        );
    }

    #[test]
    fn test_spacing_ignored_when_disabled() {
        // A malformed spacing vector is not an input when spacing is off.
        let shape = GridShape::with_spacing(&[3], &[-1.0]);
        let labels = ScalarGrid::from_vec(shape, vec![0u8, 1, 0]);
        let engine = DistanceTransform::new(TransformConfig {
            squared_distance: true,
            ..TransformConfig::default()
        });
        let field = engine.transform::<f64>(&labels).unwrap();
        assert_eq!(field.as_slice(), &[1.0, -0.0, 1.0]);
    }

    #[test]
    fn test_mismatched_output_shape_is_rejected() {
        let labels: ScalarGrid<u8> = ScalarGrid::new(GridShape::new(&[4, 4]), 0);
        let mut output: ScalarGrid<f64> = ScalarGrid::new(GridShape::new(&[4, 5]), 0.0);
        let engine = DistanceTransform::new(TransformConfig::default());
        assert_eq!(
            engine.transform_into(&labels, &mut output).unwrap_err(),
            TransformError::ShapeMismatch {
                labels: vec![4, 4],
                output: vec![4, 5],
            }
        );
    }

    #[test]
    fn test_narrow_output_type_is_rejected_up_front() {
        // (4 * 1e19)^2 overflows the f32 sentinel, caught before any pass.
        let shape = GridShape::with_spacing(&[5], &[1e19]);
        let labels: ScalarGrid<u8> = ScalarGrid::new(shape.clone(), 0);
        let engine = DistanceTransform::new(TransformConfig {
            use_spacing: true,
            ..TransformConfig::default()
        });
        assert!(matches!(
            engine.transform::<f32>(&labels).unwrap_err(),
            TransformError::InsufficientRange { .. }
        ));

        // The same grid is fine with f64 output.
        assert!(engine.transform::<f64>(&labels).is_ok());
    }

    #[test]
    fn test_degenerate_empty_grid_is_a_no_op() {
        let labels: ScalarGrid<u8> = ScalarGrid::new(GridShape::new(&[0, 3]), 0);
        let engine = DistanceTransform::new(TransformConfig::default());
        let field = engine.transform::<f64>(&labels).unwrap();
        assert!(field.as_slice().is_empty());
        assert_eq!(field.shape().extents(), &[0, 3]);
    }
}
