//! Helpers for consuming edge paths

use toposcope_core::Position;

/// Split a path at its breaks into drawable polylines.
///
/// Runs of fewer than two points draw nothing and are dropped.
pub fn path_segments(path: &[Option<Position>]) -> Vec<Vec<Position>> {
    path.split(Option::is_none)
        .map(|run| run.iter().flatten().copied().collect::<Vec<_>>())
        .filter(|polyline| polyline.len() >= 2)
        .collect()
}

pub fn distance(a: Position, b: Position) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum::<f64>().sqrt()
}

/// Total drawn length, not counting the jumps across breaks.
pub fn path_length(path: &[Option<Position>]) -> f64 {
    path_segments(path)
        .iter()
        .flat_map(|polyline| polyline.windows(2))
        .map(|pair| distance(pair[0], pair[1]))
        .sum()
}
