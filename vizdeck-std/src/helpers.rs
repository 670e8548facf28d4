//! Numeric helpers shared by the built-in units

use vizdeck_core::{Color, Dataset, UnitError};

/// Complete-rows view over the named columns: rows with any missing
/// value in those columns are dropped. Returns the surviving values
/// column-major, plus the indices of the surviving rows so callers can
/// align labels.
pub fn complete_rows(
    data: &Dataset,
    names: &[&str],
) -> Result<(Vec<Vec<f64>>, Vec<usize>), UnitError> {
    let mut columns: Vec<Vec<Option<f64>>> = Vec::with_capacity(names.len());
    for name in names {
        match data.numeric(name) {
            Ok(col) => columns.push(col),
            // an all-missing column leaves no complete rows at all
            Err(UnitError::EmptyColumn(_)) => return Err(UnitError::NoRows),
            Err(err) => return Err(err),
        }
    }

    let kept: Vec<usize> = (0..data.len())
        .filter(|&row| columns.iter().all(|col| col[row].is_some()))
        .collect();
    if kept.is_empty() {
        return Err(UnitError::NoRows);
    }

    let values = columns
        .iter()
        .map(|col| kept.iter().map(|&row| col[row].unwrap_or_default()).collect())
        .collect();
    Ok((values, kept))
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation.
pub fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    (values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64).sqrt()
}

/// Pearson correlation; 0 when either side has no variance.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    if n == 0 {
        return 0.0;
    }
    let (mx, my) = (mean(&x[..n]), mean(&y[..n]));
    let mut cov = 0.0;
    let mut vx = 0.0;
    let mut vy = 0.0;
    for i in 0..n {
        let dx = x[i] - mx;
        let dy = y[i] - my;
        cov += dx * dy;
        vx += dx * dx;
        vy += dy * dy;
    }
    let denom = (vx * vy).sqrt();
    if denom == 0.0 {
        0.0
    } else {
        cov / denom
    }
}

/// Pairwise Pearson matrix over column-major data.
pub fn correlation_matrix(columns: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let n = columns.len();
    let mut matrix = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in 0..n {
            matrix[i][j] = if i == j {
                1.0
            } else {
                pearson(&columns[i], &columns[j])
            };
        }
    }
    matrix
}

/// Z-score each column in place (population std); constant columns
/// become all zeros.
pub fn standardize(columns: &mut [Vec<f64>]) {
    for col in columns {
        let m = mean(col);
        let s = std_dev(col);
        for v in col.iter_mut() {
            *v = if s == 0.0 { 0.0 } else { (*v - m) / s };
        }
    }
}

/// Cosine similarity between two equal-length vectors.
pub fn cosine(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let na: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let nb: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    if na == 0.0 || nb == 0.0 {
        0.0
    } else {
        dot / (na * nb)
    }
}

/// Min-max scale to [0, 1]; a constant slice maps to 0.5.
pub fn unit_scale(values: &[f64]) -> Vec<f64> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() || !max.is_finite() || max == min {
        return vec![0.5; values.len()];
    }
    values.iter().map(|v| (v - min) / (max - min)).collect()
}

const VIRIDIS_STOPS: [(f64, Color); 5] = [
    (0.00, Color::rgb(0x44, 0x01, 0x54)),
    (0.25, Color::rgb(0x3b, 0x52, 0x8b)),
    (0.50, Color::rgb(0x21, 0x91, 0x8c)),
    (0.75, Color::rgb(0x5e, 0xc9, 0x62)),
    (1.00, Color::rgb(0xfd, 0xe7, 0x25)),
];

/// Viridis-style palette lookup, `t` clamped to [0, 1].
pub fn viridis(t: f64) -> Color {
    gradient(&VIRIDIS_STOPS, t)
}

const ORANGES_STOPS: [(f64, Color); 3] = [
    (0.0, Color::rgb(0xfd, 0xd0, 0xa2)),
    (0.5, Color::rgb(0xfd, 0x8d, 0x3c)),
    (1.0, Color::rgb(0x7f, 0x27, 0x04)),
];

/// Oranges-style palette lookup for network node emphasis.
pub fn oranges(t: f64) -> Color {
    gradient(&ORANGES_STOPS, t)
}

fn gradient(stops: &[(f64, Color)], t: f64) -> Color {
    let t = t.clamp(0.0, 1.0);
    for window in stops.windows(2) {
        let (t0, c0) = window[0];
        let (t1, c1) = window[1];
        if t <= t1 {
            let span = t1 - t0;
            let local = if span == 0.0 { 0.0 } else { (t - t0) / span };
            return c0.lerp(c1, local);
        }
    }
    stops.last().map(|&(_, c)| c).unwrap_or(Color::BLACK)
}

/// Evenly spaced positions on a unit circle, used as the deterministic
/// stand-in for a force-directed layout.
pub fn circular_layout(n: usize) -> Vec<(f64, f64)> {
    (0..n)
        .map(|i| {
            let angle = 2.0 * std::f64::consts::PI * i as f64 / n.max(1) as f64;
            (angle.cos(), angle.sin())
        })
        .collect()
}
