use crate::shape::GridShape;

/// An n-dimensional array stored as a flat buffer, addressed through a
/// [`GridShape`].
///
/// The transform uses two of these over the same shape: the caller's label
/// grid (read-only) and the distance grid it mutates in place. The shape,
/// including its spacing metadata, travels with the output so that
/// downstream consumers can interpret the values geometrically.
#[derive(Clone, Debug)]
pub struct ScalarGrid<T> {
    shape: GridShape,
    data: Vec<T>,
}

impl<T: Clone> ScalarGrid<T> {
    /// Creates a grid with every cell set to `fill`.
    pub fn new(shape: GridShape, fill: T) -> ScalarGrid<T> {
        let len = shape.len();
        ScalarGrid {
            shape,
            data: vec![fill; len],
        }
    }

    /// Creates a grid by evaluating `f` at every coordinate, outermost axis
    /// varying slowest.
    pub fn from_fn(shape: GridShape, mut f: impl FnMut(&[usize]) -> T) -> ScalarGrid<T> {
        let len = shape.len();
        let mut data = Vec::with_capacity(len);
        let mut coord = vec![0usize; shape.ndim()];
        for _ in 0..len {
            data.push(f(&coord));
            for d in (0..shape.ndim()).rev() {
                coord[d] += 1;
                if coord[d] < shape.extent(d) {
                    break;
                }
                coord[d] = 0;
            }
        }
        ScalarGrid { shape, data }
    }

    /// Wraps an existing flat buffer.
    ///
    /// `data` is laid out row-major with axis 0 outermost and must contain
    /// exactly `shape.len()` elements.
    pub fn from_vec(shape: GridShape, data: Vec<T>) -> ScalarGrid<T> {
        assert_eq!(
            data.len(),
            shape.len(),
            "buffer length must match the shape"
        );
        ScalarGrid { shape, data }
    }
}

impl<T> ScalarGrid<T> {
    pub fn shape(&self) -> &GridShape {
        &self.shape
    }

    pub fn get(&self, coord: &[usize]) -> &T {
        &self.data[self.shape.offset(coord)]
    }

    pub fn set(&mut self, coord: &[usize], value: T) {
        let offset = self.shape.offset(coord);
        self.data[offset] = value;
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consumes the grid, returning the flat buffer.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}
