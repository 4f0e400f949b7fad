use thiserror::Error;

/// Contract violations detected before the first sweep pass starts.
///
/// The engine never begins a partial computation: every variant here is
/// reported synchronously from the transform entry point.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransformError {
    /// The label grid has no axes at all.
    #[error("grid must have at least one axis")]
    ZeroDimensional,

    /// A spacing entry is zero, negative or NaN while spacing is in use.
    #[error("spacing along axis {axis} must be positive, got {value}")]
    InvalidSpacing { axis: usize, value: f64 },

    /// Label and output grids disagree on their extents.
    #[error("label grid extents {labels:?} do not match output extents {output:?}")]
    ShapeMismatch {
        labels: Vec<usize>,
        output: Vec<usize>,
    },

    /// The worst-case accumulated squared distance would reach the sentinel
    /// of the output value type, so a legitimate value could be mistaken
    /// for "no feature reached". The output type is too narrow for this
    /// grid extent and spacing.
    #[error(
        "worst-case squared distance {required:e} reaches the sentinel {sentinel:e} of the output type"
    )]
    InsufficientRange { required: f64, sentinel: f64 },
}
