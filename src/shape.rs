/// Geometry of an n-dimensional grid: per-axis extents, a row-major stride
/// table and a per-axis physical spacing.
///
/// Axis 0 is the outermost (slowest-varying) axis. All element access goes
/// through [`GridShape::offset`], so there is a single place where the
/// coordinate-to-memory mapping lives.
#[derive(Clone, Debug, PartialEq)]
pub struct GridShape {
    extents: Vec<usize>,
    strides: Vec<usize>,
    spacing: Vec<f64>,
}

impl GridShape {
    /// Creates a shape with unit spacing along every axis.
    pub fn new(extents: &[usize]) -> GridShape {
        Self::with_spacing(extents, &vec![1.0; extents.len()])
    }

    /// Creates a shape with an explicit per-axis spacing.
    ///
    /// `spacing` must have one entry per axis. Entries are validated for
    /// positivity by the transform, not here, so that a shape can be built
    /// before its configuration is known.
    pub fn with_spacing(extents: &[usize], spacing: &[f64]) -> GridShape {
        assert_eq!(
            extents.len(),
            spacing.len(),
            "one spacing entry required per axis"
        );

        let mut strides = vec![1usize; extents.len()];
        for d in (0..extents.len().saturating_sub(1)).rev() {
            strides[d] = strides[d + 1] * extents[d + 1].max(1);
        }

        GridShape {
            extents: extents.to_vec(),
            strides,
            spacing: spacing.to_vec(),
        }
    }

    /// Number of axes.
    pub fn ndim(&self) -> usize {
        self.extents.len()
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        if self.extents.is_empty() {
            return 0;
        }
        self.extents.iter().product()
    }

    /// True when the grid holds no cells at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Extent along one axis.
    pub fn extent(&self, axis: usize) -> usize {
        self.extents[axis]
    }

    /// All extents, outermost axis first.
    pub fn extents(&self) -> &[usize] {
        &self.extents
    }

    /// Flat-index step between neighboring cells along one axis.
    pub fn stride(&self, axis: usize) -> usize {
        self.strides[axis]
    }

    /// Physical spacing along one axis.
    pub fn spacing(&self, axis: usize) -> f64 {
        self.spacing[axis]
    }

    /// All spacing entries, outermost axis first.
    pub fn spacings(&self) -> &[f64] {
        &self.spacing
    }

    /// Flat index of a coordinate tuple.
    pub fn offset(&self, coord: &[usize]) -> usize {
        debug_assert_eq!(coord.len(), self.extents.len());
        coord
            .iter()
            .zip(&self.strides)
            .map(|(c, s)| c * s)
            .sum()
    }
}
