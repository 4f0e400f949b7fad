use crate::shape::GridShape;

/// A contiguous hyper-rectangular block of the grid, assigned to one worker
/// for the duration of one sweep pass.
///
/// Bounds are half-open per axis. Regions produced by [`split_lines`] for
/// the same pass never overlap, which is what lets workers write their lines
/// without synchronization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Region {
    start: Vec<usize>,
    end: Vec<usize>,
}

impl Region {
    /// The region covering the whole grid.
    pub fn full(shape: &GridShape) -> Region {
        Region {
            start: vec![0; shape.ndim()],
            end: shape.extents().to_vec(),
        }
    }

    pub fn start(&self, axis: usize) -> usize {
        self.start[axis]
    }

    pub fn end(&self, axis: usize) -> usize {
        self.end[axis]
    }

    /// Number of lines along `sweep_axis` contained in this region.
    pub fn line_count(&self, sweep_axis: usize) -> usize {
        let mut count = 1;
        for d in 0..self.start.len() {
            if d == sweep_axis {
                continue;
            }
            count *= self.end[d] - self.start[d];
        }
        count
    }

    /// Visits every 1-D line along `sweep_axis` in this region, passing the
    /// flat offset of the line's first cell. Cells along the line are then
    /// `shape.stride(sweep_axis)` apart.
    ///
    /// The sweep axis always spans its full extent: the partitioner never
    /// splits a line in half.
    pub fn for_each_line(&self, shape: &GridShape, sweep_axis: usize, mut f: impl FnMut(usize)) {
        let nd = shape.ndim();
        if (0..nd).any(|d| self.end[d] <= self.start[d]) {
            return;
        }

        let mut coord = self.start.clone();
        coord[sweep_axis] = 0;
        loop {
            f(shape.offset(&coord));

            // Odometer increment over every axis except the sweep axis.
            let mut rolled_over = true;
            for d in (0..nd).rev() {
                if d == sweep_axis {
                    continue;
                }
                coord[d] += 1;
                if coord[d] < self.end[d] {
                    rolled_over = false;
                    break;
                }
                coord[d] = self.start[d];
            }
            if rolled_over {
                break;
            }
        }
    }
}

/// Splits the iteration space of one sweep pass into disjoint regions of
/// whole lines, at most one per requested worker.
///
/// The split axis is the outermost axis whose extent is larger than one and
/// that is not the sweep axis itself. If no axis qualifies the whole grid
/// becomes a single region and the pass runs on one worker. Partitioning is
/// a pure function of the extents and the worker count, so identical inputs
/// always produce identical region boundaries regardless of scheduling.
pub fn split_lines(shape: &GridShape, sweep_axis: usize, workers: usize) -> Vec<Region> {
    let split_axis = (0..shape.ndim()).find(|&d| d != sweep_axis && shape.extent(d) > 1);

    let split_axis = match split_axis {
        Some(axis) => axis,
        None => return vec![Region::full(shape)],
    };

    let size = shape.extent(split_axis);
    let workers = workers.max(1);
    let chunk = size.div_ceil(workers);

    let mut regions = Vec::with_capacity(workers);
    let mut begin = 0;
    while begin < size {
        let mut region = Region::full(shape);
        region.start[split_axis] = begin;
        region.end[split_axis] = (begin + chunk).min(size);
        regions.push(region);
        begin += chunk;
    }
    regions
}
