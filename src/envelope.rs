//! Per-line lower-envelope merge, the core of the separable transform.
//!
//! Each feature site reached so far contributes an upward parabola
//! `f(x) = g + (x - h)^2` over the line, where `g` is its accumulated
//! squared distance from the axes already processed and `h` its weighted
//! position on this line. The squared distance after folding in this axis
//! is the pointwise minimum of those parabolas, their lower envelope. The
//! envelope is built with a stack in one forward walk, then evaluated with
//! a monotone cursor in a second walk, so a line of length n costs O(n).

/// Stack buffers for one line, reused by a worker across all lines of its
/// region to avoid per-line allocation.
pub(crate) struct LineScratch {
    /// Accumulated squared distance of each surviving site.
    g: Vec<f64>,
    /// Weighted line position of each surviving site.
    h: Vec<f64>,
}

impl LineScratch {
    pub(crate) fn new() -> LineScratch {
        LineScratch {
            g: Vec::new(),
            h: Vec::new(),
        }
    }
}

/// Decides whether the middle site `(g2, h2)` is dominated: its parabola is
/// nowhere below both the earlier site `(g1, h1)` and the new candidate
/// `(gf, hf)`, so it can never be the nearest for any position and is
/// dropped from the envelope. Positions are strictly increasing, so `a`,
/// `b` and `c` are all positive.
fn dominated(g1: f64, h1: f64, g2: f64, h2: f64, gf: f64, hf: f64) -> bool {
    let a = h2 - h1;
    let b = hf - h2;
    let c = hf - h1;
    c * g2.abs() - b * g1.abs() - a * gf.abs() - a * b * c > 0.0
}

/// Folds one axis into the squared distances along a single line.
///
/// `values` holds the current best squared distance at every cell of the
/// line; cells no feature has reached yet carry `sentinel`. `step` is the
/// weighted spacing of the sweep axis, so cell `i` sits at position
/// `i * step`. Lines of length one separate nothing and are skipped, as are
/// lines without a single finite site.
pub(crate) fn update_line(values: &mut [f64], step: f64, sentinel: f64, scratch: &mut LineScratch) {
    let n = values.len();
    if n <= 1 {
        return;
    }

    let LineScratch { g, h } = scratch;
    g.clear();
    h.clear();

    // Build the envelope: push each finite site after popping every stack
    // top it dominates together with the new entry.
    for (i, &value) in values.iter().enumerate() {
        if value >= sentinel {
            continue;
        }
        let position = i as f64 * step;
        while g.len() >= 2 {
            let m = g.len();
            if dominated(g[m - 2], h[m - 2], g[m - 1], h[m - 1], value, position) {
                g.pop();
                h.pop();
            } else {
                break;
            }
        }
        g.push(value);
        h.push(position);
    }

    if g.is_empty() {
        // Nothing on this line to propagate.
        return;
    }

    // Evaluate the envelope left to right. Envelope segments appear in the
    // same order as line positions, so the cursor only ever advances and the
    // whole walk stays linear.
    let mut l = 0;
    for (i, value) in values.iter_mut().enumerate() {
        let iw = i as f64 * step;
        while l + 1 < g.len() {
            let current = g[l].abs() + (h[l] - iw) * (h[l] - iw);
            let next = g[l + 1].abs() + (h[l + 1] - iw) * (h[l + 1] - iw);
            if next < current {
                l += 1;
            } else {
                break;
            }
        }
        *value = g[l].abs() + (h[l] - iw) * (h[l] - iw);
    }
}
