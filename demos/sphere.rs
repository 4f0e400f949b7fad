//! Computes the signed distance field of a voxelized ball and prints the
//! middle slice as ASCII, negative outside and positive inside.

use sweepdist::{DistanceTransform, GridShape, ScalarGrid, TransformConfig};

const N: usize = 40;
const RADIUS: f64 = 12.0;

fn main() {
    let center = (N / 2) as f64;
    let labels = ScalarGrid::from_fn(GridShape::new(&[N, N, N]), |c| {
        let r2: f64 = c
            .iter()
            .map(|&x| (x as f64 - center) * (x as f64 - center))
            .sum();
        u8::from(r2 <= RADIUS * RADIUS)
    });

    let engine = DistanceTransform::new(TransformConfig::<u8> {
        inside_is_positive: true,
        ..TransformConfig::default()
    });
    let field = engine.transform::<f32>(&labels).expect("transform failed");

    let z = N / 2;
    for y in 0..N {
        let row: String = (0..N)
            .map(|x| {
                let d = *field.get(&[z, y, x]);
                if d > RADIUS as f32 / 2.0 {
                    '#'
                } else if d > 0.0 {
                    '+'
                } else if d > -3.0 {
                    '.'
                } else {
                    ' '
                }
            })
            .collect();
        println!("{}", row);
    }

    let min = field.as_slice().iter().cloned().fold(f32::MAX, f32::min);
    let max = field.as_slice().iter().cloned().fold(f32::MIN, f32::max);
    println!("\n{} voxels, signed distance range [{:.2}, {:.2}]", field.shape().len(), min, max);
}
