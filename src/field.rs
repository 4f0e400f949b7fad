use crate::grid::ScalarGrid;
use crate::shape::GridShape;
use crate::transform::{DistanceTransform, TransformConfig};
use rand::prelude::*;
use rand::rngs::StdRng;
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen_rayon::init_thread_pool;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn init_threads(n: usize) -> js_sys::Promise {
    init_thread_pool(n)
}

/// A 2-D signed distance field over a `u8` label mask.
///
/// This is the JavaScript/TypeScript-facing wrapper around the generic
/// engine: labels go in as a flat row-major array (`y` outermost), signed
/// `f32` distances come out the same way. Cells with a non-background label
/// are the feature class.
#[wasm_bindgen]
pub struct DistanceField2 {
    labels: ScalarGrid<u8>,
    config: TransformConfig<u8>,
    distances: Vec<f32>,
}

#[wasm_bindgen]
impl DistanceField2 {
    /// Creates an all-background field of `ny` rows by `nx` columns.
    #[wasm_bindgen(constructor)]
    pub fn new(ny: usize, nx: usize) -> DistanceField2 {
        DistanceField2 {
            labels: ScalarGrid::new(GridShape::new(&[ny, nx]), 0),
            config: TransformConfig::default(),
            distances: Vec::new(),
        }
    }

    /// Replaces the label mask. Ignored if the length does not match the
    /// field's cell count.
    pub fn set_labels(&mut self, labels: &[u8]) {
        if labels.len() == self.labels.shape().len() {
            self.labels.as_mut_slice().copy_from_slice(labels);
        }
    }

    /// Sets the physical spacing per axis and enables spacing-aware
    /// distances.
    pub fn set_spacing(&mut self, sy: f64, sx: f64) {
        let shape = GridShape::with_spacing(self.labels.shape().extents(), &[sy, sx]);
        self.labels = ScalarGrid::from_vec(shape, self.labels.as_slice().to_vec());
        self.config.use_spacing = true;
    }

    pub fn set_background(&mut self, background: u8) {
        self.config.background = background;
    }

    pub fn set_squared_distance(&mut self, squared: bool) {
        self.config.squared_distance = squared;
    }

    pub fn set_inside_is_positive(&mut self, inside_is_positive: bool) {
        self.config.inside_is_positive = inside_is_positive;
    }

    #[wasm_bindgen(getter)]
    pub fn count_cells(&self) -> usize {
        self.labels.shape().len()
    }

    /// Scatters `count` random feature cells over the mask.
    pub fn random_labels(&mut self, count: usize) {
        let mut rng = StdRng::seed_from_u64(get_seed());
        let len = self.labels.shape().len();
        if len == 0 {
            return;
        }
        for _ in 0..count {
            let cell = rng.gen_range(0..len);
            self.labels.as_mut_slice()[cell] = 1;
        }
    }

    /// Runs the transform on the current labels.
    pub fn compute(&mut self) -> Result<(), JsError> {
        let engine = DistanceTransform::new(self.config);
        let field = engine
            .transform::<f32>(&self.labels)
            .map_err(|e| JsError::new(&e.to_string()))?;
        self.distances = field.into_vec();
        Ok(())
    }

    /// The signed distances from the last `compute` call, flat row-major.
    #[wasm_bindgen(getter)]
    pub fn distances(&self) -> Vec<f32> {
        self.distances.clone()
    }
}

/// A 3-D signed distance field over a `u8` label mask, `z` outermost.
#[wasm_bindgen]
pub struct DistanceField3 {
    labels: ScalarGrid<u8>,
    config: TransformConfig<u8>,
    distances: Vec<f32>,
}

#[wasm_bindgen]
impl DistanceField3 {
    #[wasm_bindgen(constructor)]
    pub fn new(nz: usize, ny: usize, nx: usize) -> DistanceField3 {
        DistanceField3 {
            labels: ScalarGrid::new(GridShape::new(&[nz, ny, nx]), 0),
            config: TransformConfig::default(),
            distances: Vec::new(),
        }
    }

    pub fn set_labels(&mut self, labels: &[u8]) {
        if labels.len() == self.labels.shape().len() {
            self.labels.as_mut_slice().copy_from_slice(labels);
        }
    }

    pub fn set_spacing(&mut self, sz: f64, sy: f64, sx: f64) {
        let shape = GridShape::with_spacing(self.labels.shape().extents(), &[sz, sy, sx]);
        self.labels = ScalarGrid::from_vec(shape, self.labels.as_slice().to_vec());
        self.config.use_spacing = true;
    }

    pub fn set_background(&mut self, background: u8) {
        self.config.background = background;
    }

    pub fn set_squared_distance(&mut self, squared: bool) {
        self.config.squared_distance = squared;
    }

    pub fn set_inside_is_positive(&mut self, inside_is_positive: bool) {
        self.config.inside_is_positive = inside_is_positive;
    }

    #[wasm_bindgen(getter)]
    pub fn count_cells(&self) -> usize {
        self.labels.shape().len()
    }

    pub fn random_labels(&mut self, count: usize) {
        let mut rng = StdRng::seed_from_u64(get_seed());
        let len = self.labels.shape().len();
        if len == 0 {
            return;
        }
        for _ in 0..count {
            let cell = rng.gen_range(0..len);
            self.labels.as_mut_slice()[cell] = 1;
        }
    }

    pub fn compute(&mut self) -> Result<(), JsError> {
        let engine = DistanceTransform::new(self.config);
        let field = engine
            .transform::<f32>(&self.labels)
            .map_err(|e| JsError::new(&e.to_string()))?;
        self.distances = field.into_vec();
        Ok(())
    }

    #[wasm_bindgen(getter)]
    pub fn distances(&self) -> Vec<f32> {
        self.distances.clone()
    }
}

fn get_seed() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        (js_sys::Math::random() * 4294967296.0) as u64
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        123456789 // Fixed seed for tests
    }
}
