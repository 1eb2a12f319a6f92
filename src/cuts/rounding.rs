use itertools::Itertools;
use tracing::debug;

use crate::cuts::Cut;
use crate::graph::Graph;

/// Integral cut `S = {i : values[i] > threshold}` of a relaxed solution.
///
/// Any threshold of a monotone assignment gives a topological cut.
pub fn threshold_cut(graph: &Graph, values: &[f64], threshold: f64) -> Cut {
    let in_source_set: Vec<bool> = values.iter().map(|&x| x > threshold).collect();
    Cut::from_membership(graph, &in_source_set)
}

/// Best threshold cut of `values` with at most `budget` marked edges.
///
/// Values are first snapped to 0 and 1 within `tolerance`, then every distinct positive value
/// is tried as a threshold, from the largest to the smallest, along with the two extremes
/// "just above 0" and 1. Each candidate `t` selects the vertices whose value is at least
/// `t - tolerance / 2`, so the target (value 0) never joins the source side and the source
/// (value 1) always does. The heaviest feasible cut wins; ties keep the first one found, i.e.
/// the smallest source side.
///
/// When `values` is a feasible relaxed solution one candidate is always feasible, since the
/// marked-edge count of the relaxation is the average of the thresholded counts.
pub fn best_threshold_cut(
    graph: &Graph,
    values: &[f64],
    budget: usize,
    tolerance: f64,
) -> Option<Cut> {
    let snapped: Vec<f64> = values.iter().map(|&x| snap(x, tolerance)).collect();

    let candidates: Vec<f64> = snapped
        .iter()
        .copied()
        .filter(|&x| x > 0.0)
        .chain([tolerance, 1.0])
        .sorted_by(|a, b| b.total_cmp(a))
        .dedup_by(|a, b| (a - b).abs() <= tolerance / 2.0)
        .collect();

    let mut best: Option<(f64, Cut)> = None;
    for &candidate in &candidates {
        let cut = threshold_cut(graph, &snapped, candidate - tolerance / 2.0);
        if cut.marked > budget {
            continue;
        }
        if best.as_ref().map_or(true, |(_, b)| cut.value > b.value) {
            best = Some((candidate, cut));
        }
    }

    match &best {
        Some((threshold, cut)) => debug!(
            candidates = candidates.len(),
            threshold,
            value = cut.value,
            marked = cut.marked,
            "rounded relaxed cut"
        ),
        None => debug!(candidates = candidates.len(), budget, "no feasible threshold"),
    }
    best.map(|(_, cut)| cut)
}

fn snap(x: f64, tolerance: f64) -> f64 {
    if x <= tolerance {
        0.0
    } else if x >= 1.0 - tolerance {
        1.0
    } else {
        x
    }
}
