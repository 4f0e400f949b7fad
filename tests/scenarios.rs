use sweepdist::{DistanceTransform, GridShape, ScalarGrid, TransformConfig};

fn squared_engine() -> DistanceTransform<u8> {
    DistanceTransform::new(TransformConfig {
        squared_distance: true,
        ..TransformConfig::default()
    })
}

#[test]
fn test_line_with_single_feature() {
    let labels = ScalarGrid::from_vec(GridShape::new(&[5]), vec![0u8, 0, 1, 0, 0]);
    let field = squared_engine().transform::<f64>(&labels).unwrap();
    assert_eq!(field.as_slice(), &[4.0, 1.0, 0.0, 1.0, 4.0]);
}

#[test]
fn test_corner_feature_2d() {
    let labels = ScalarGrid::from_vec(GridShape::new(&[2, 2]), vec![1u8, 0, 0, 0]);
    let field = squared_engine().transform::<f64>(&labels).unwrap();
    assert_eq!(field.as_slice(), &[0.0, 1.0, 1.0, 2.0]);
}

#[test]
fn test_spacing_doubles_axis_contribution() {
    // Spacing (1, 2): the offset from (0,0) to (0,1) is 2 units long, so
    // its squared contribution is 4, not 1.
    let shape = GridShape::with_spacing(&[1, 2], &[1.0, 2.0]);
    let labels = ScalarGrid::from_vec(shape, vec![1u8, 0]);
    let engine = DistanceTransform::new(TransformConfig {
        use_spacing: true,
        squared_distance: true,
        ..TransformConfig::default()
    });
    let field = engine.transform::<f64>(&labels).unwrap();
    assert_eq!(field.as_slice()[1], 4.0);
}

#[test]
fn test_spacing_off_ignores_grid_spacing() {
    let shape = GridShape::with_spacing(&[1, 2], &[1.0, 2.0]);
    let labels = ScalarGrid::from_vec(shape, vec![1u8, 0]);
    let field = squared_engine().transform::<f64>(&labels).unwrap();
    assert_eq!(field.as_slice()[1], 1.0);
}

#[test]
fn test_symmetry_around_isolated_feature() {
    // 7x7x7 grid, single feature at the center: squared distances must be
    // the exact squared Euclidean norm of the offset, along axes and
    // diagonals alike.
    let center = [3usize, 3, 3];
    let labels = ScalarGrid::from_fn(GridShape::new(&[7, 7, 7]), |c| u8::from(c == center.as_slice()));
    let field = squared_engine().transform::<f64>(&labels).unwrap();

    for offset in [
        [0isize, 0, 0],
        [2, 0, 0],
        [0, 3, 0],
        [0, 0, 1],
        [1, 1, 0],
        [1, 1, 1],
        [2, 2, 2],
        [-3, 2, -1],
        [3, 3, 3],
    ] {
        let coord: Vec<usize> = center
            .iter()
            .zip(&offset)
            .map(|(&c, &o)| (c as isize + o) as usize)
            .collect();
        let expected: f64 = offset.iter().map(|&o| (o * o) as f64).sum();
        assert_eq!(
            *field.get(&coord),
            expected,
            "wrong squared distance at offset {:?}",
            offset
        );
    }
}

#[test]
fn test_sign_follows_classification_policy() {
    let labels = ScalarGrid::from_vec(GridShape::new(&[4]), vec![0u8, 1, 1, 0]);

    for inside_is_positive in [false, true] {
        let engine = DistanceTransform::new(TransformConfig {
            inside_is_positive,
            ..TransformConfig::<u8>::default()
        });
        let field = engine.transform::<f64>(&labels).unwrap();
        for (value, label) in field.as_slice().iter().zip(labels.as_slice()) {
            let positive = value.is_sign_positive();
            assert_eq!(
                positive,
                (*label != 0) == inside_is_positive,
                "sign policy violated for label {} with inside_is_positive={}",
                label,
                inside_is_positive
            );
        }
    }
}

#[test]
fn test_unsquared_output_is_signed_root_of_squared() {
    let labels = ScalarGrid::from_fn(GridShape::new(&[6, 9]), |c| {
        u8::from((c[0] + 2 * c[1]) % 5 == 0)
    });

    let squared = squared_engine().transform::<f64>(&labels).unwrap();
    let rooted = DistanceTransform::new(TransformConfig::<u8>::default())
        .transform::<f64>(&labels)
        .unwrap();

    for (i, (r, s)) in rooted
        .as_slice()
        .iter()
        .zip(squared.as_slice())
        .enumerate()
    {
        let expected = s.signum() * s.abs().sqrt();
        assert!(
            (r - expected).abs() < 1e-12,
            "cell {}: expected {}, got {}",
            i,
            expected,
            r
        );
    }
}

#[test]
fn test_nonbackground_value_is_configurable() {
    let labels = ScalarGrid::from_vec(GridShape::new(&[3]), vec![7u8, 7, 9]);
    let engine = DistanceTransform::new(TransformConfig {
        background: 7u8,
        squared_distance: true,
        inside_is_positive: true,
        ..TransformConfig::default()
    });
    let field = engine.transform::<f64>(&labels).unwrap();
    assert_eq!(field.as_slice(), &[-4.0, -1.0, 0.0]);
}

#[test]
fn test_unit_axes_contribute_nothing() {
    // Same line embedded in a grid padded with size-1 axes.
    let labels = ScalarGrid::from_vec(GridShape::new(&[1, 5, 1]), vec![0u8, 0, 1, 0, 0]);
    let field = squared_engine().transform::<f64>(&labels).unwrap();
    assert_eq!(field.as_slice(), &[4.0, 1.0, 0.0, 1.0, 4.0]);
}

#[test]
fn test_all_background_grid_keeps_sentinel_magnitude() {
    let labels: ScalarGrid<u8> = ScalarGrid::new(GridShape::new(&[3, 3]), 0);
    let field = squared_engine().transform::<f64>(&labels).unwrap();
    // No feature anywhere: nothing tightens the initial sentinel.
    assert!(field.as_slice().iter().all(|&v| v == f64::MAX));
}

#[test]
fn test_f32_output_matches_f64_on_small_grid() {
    let labels = ScalarGrid::from_fn(GridShape::new(&[8, 8]), |c| u8::from(c[0] == c[1]));
    let engine = squared_engine();
    let coarse = engine.transform::<f32>(&labels).unwrap();
    let fine = engine.transform::<f64>(&labels).unwrap();
    for (a, b) in coarse.as_slice().iter().zip(fine.as_slice()) {
        assert_eq!(*a as f64, *b);
    }
}

#[test]
fn test_output_carries_shape_and_spacing() {
    let shape = GridShape::with_spacing(&[2, 3], &[0.5, 0.25]);
    let labels = ScalarGrid::new(shape.clone(), 1u8);
    let field = squared_engine().transform::<f64>(&labels).unwrap();
    assert_eq!(field.shape(), &shape);
}
