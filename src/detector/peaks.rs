//! Multi-scale peak search on closed 1D signals
//!
//! Continuous wavelet transform with a Ricker kernel, followed by ridge-line
//! tracking across scales. Every step treats the signal as periodic: index
//! `n - 1` neighbours index `0`.

use crate::config::CornerConfig;
use crate::utils::geometry::cyclic_distance;

/// Wavelet widths `1, 2, ...` strictly below `magic * n`, never empty
pub fn peak_widths(n: usize, magic: f64) -> Vec<usize> {
    let limit = magic * n as f64;
    let widths: Vec<usize> = (1..).take_while(|&w| (w as f64) < limit).collect();
    if widths.is_empty() { vec![1] } else { widths }
}

/// Zero-mean Ricker (Mexican hat) wavelet of width `width`, sampled at
/// integer offsets `-half_len..=half_len`
pub fn ricker(half_len: usize, width: f64) -> Vec<f64> {
    let amplitude = 2.0 / ((3.0 * width).sqrt() * std::f64::consts::PI.powf(0.25));
    let wsq = width * width;
    let mut kernel: Vec<f64> = (0..=2 * half_len)
        .map(|i| {
            let t = i as f64 - half_len as f64;
            let tsq = t * t;
            amplitude * (1.0 - tsq / wsq) * (-tsq / (2.0 * wsq)).exp()
        })
        .collect();

    let mean = kernel.iter().sum::<f64>() / kernel.len() as f64;
    for k in &mut kernel {
        *k -= mean;
    }
    kernel
}

/// Periodic convolution of `signal` with a symmetric odd-length kernel
fn convolve_periodic(signal: &[f64], kernel: &[f64]) -> Vec<f64> {
    let n = signal.len();
    let half = kernel.len() / 2;

    let mut extended = Vec::with_capacity(n + 2 * half);
    extended.extend_from_slice(&signal[n - half..]);
    extended.extend_from_slice(signal);
    extended.extend_from_slice(&signal[..half]);

    (0..n)
        .map(|i| {
            extended[i..i + kernel.len()]
                .iter()
                .zip(kernel)
                .map(|(s, k)| s * k)
                .sum()
        })
        .collect()
}

/// One row of coefficients per width
pub fn cwt(signal: &[f64], widths: &[usize]) -> Vec<Vec<f64>> {
    let n = signal.len();
    if n == 0 {
        return vec![Vec::new(); widths.len()];
    }
    widths
        .iter()
        .map(|&w| {
            let half = (5 * w).min((n - 1) / 2);
            convolve_periodic(signal, &ricker(half, w as f64))
        })
        .collect()
}

/// Strict local maxima of a cyclic sequence, ascending.
///
/// A run of equal values bounded by smaller values on both sides counts
/// once, at the middle of the run. A constant sequence has no maxima.
pub fn relative_maxima(row: &[f64]) -> Vec<usize> {
    let n = row.len();
    // Start at a run boundary so no run wraps past the end of the walk
    let Some(anchor) = (0..n).find(|&i| row[i] != row[(i + n - 1) % n]) else {
        return Vec::new();
    };

    let mut maxima = Vec::new();
    let mut walked = 0;
    while walked < n {
        let start = (anchor + walked) % n;
        let value = row[start];
        let mut run = 1;
        while run < n - walked && row[(start + run) % n] == value {
            run += 1;
        }

        let before = row[(start + n - 1) % n];
        let after = row[(start + run) % n];
        if before < value && after < value {
            maxima.push((start + (run - 1) / 2) % n);
        }
        walked += run;
    }

    maxima.sort_unstable();
    maxima
}

/// Percentile with linear interpolation between closest ranks
pub fn percentile(values: &mut [f64], pct: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.sort_unstable_by(f64::total_cmp);
    let pos = (pct / 100.0).clamp(0.0, 1.0) * (values.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = (lo + 1).min(values.len() - 1);
    values[lo] + (values[hi] - values[lo]) * (pos - lo as f64)
}

/// A maximum tracked across scales, coarse to fine
#[derive(Debug, Clone)]
struct Ridge {
    rows: Vec<usize>,
    cols: Vec<usize>,
    gap: usize,
}

impl Ridge {
    fn start(row: usize, col: usize) -> Self {
        Self {
            rows: vec![row],
            cols: vec![col],
            gap: 0,
        }
    }

    fn last_col(&self) -> usize {
        *self.cols.last().unwrap_or(&0)
    }

    /// Finest scale reached and the position there
    fn finest(&self) -> (usize, usize) {
        (
            *self.rows.last().unwrap_or(&0),
            self.last_col(),
        )
    }
}

/// Link per-scale maxima into ridges, walking from the coarsest scale that
/// has a maximum down to the finest
fn identify_ridges(maxima: &[Vec<usize>], widths: &[usize], n: usize) -> Vec<Ridge> {
    let Some(top) = (0..maxima.len()).rev().find(|&r| !maxima[r].is_empty()) else {
        return Vec::new();
    };
    let gap_thresh = widths[0];

    let mut active: Vec<Ridge> = maxima[top].iter().map(|&c| Ridge::start(top, c)).collect();
    let mut finished = Vec::new();

    for row in (0..top).rev() {
        let max_dist = widths[row] as f64 / 4.0;
        let cols = &maxima[row];

        let mut pairs: Vec<(usize, usize, usize)> = Vec::new();
        for (ri, ridge) in active.iter().enumerate() {
            for (ci, &col) in cols.iter().enumerate() {
                let d = cyclic_distance(col, ridge.last_col(), n);
                if d as f64 <= max_dist {
                    pairs.push((d, ri, ci));
                }
            }
        }
        pairs.sort_unstable();

        let mut ridge_taken = vec![false; active.len()];
        let mut col_taken = vec![false; cols.len()];
        for (_, ri, ci) in pairs {
            if ridge_taken[ri] || col_taken[ci] {
                continue;
            }
            ridge_taken[ri] = true;
            col_taken[ci] = true;
            let ridge = &mut active[ri];
            ridge.rows.push(row);
            ridge.cols.push(cols[ci]);
            ridge.gap = 0;
        }

        for (ridge, taken) in active.iter_mut().zip(&ridge_taken) {
            if !taken {
                ridge.gap += 1;
            }
        }
        for (ci, &col) in cols.iter().enumerate() {
            if !col_taken[ci] {
                active.push(Ridge::start(row, col));
            }
        }

        let (ended, alive): (Vec<Ridge>, Vec<Ridge>) =
            active.into_iter().partition(|r| r.gap > gap_thresh);
        finished.extend(ended);
        active = alive;
    }

    finished.extend(active);
    finished
}

/// Noise floor per sample: a percentile of the finest-scale coefficients in
/// a cyclic window around it
fn noise_floor(finest: &[f64], pct: f64) -> Vec<f64> {
    let n = finest.len();
    let window = n.div_ceil(20).max(1);
    let (half, odd) = (window / 2, window % 2);

    let mut scratch = Vec::with_capacity(window);
    (0..n)
        .map(|i| {
            scratch.clear();
            for k in 0..half + half + odd {
                scratch.push(finest[(i + n + k - half) % n]);
            }
            percentile(&mut scratch, pct)
        })
        .collect()
}

/// Indices of the peaks of a closed signal, ascending and distinct
pub fn find_peaks_cwt(signal: &[f64], config: &CornerConfig) -> Vec<usize> {
    let n = signal.len();
    if n < 3 {
        return Vec::new();
    }

    let widths = peak_widths(n, config.magic);
    let coefficients = cwt(signal, &widths);
    let maxima: Vec<Vec<usize>> = coefficients.iter().map(|r| relative_maxima(r)).collect();
    let ridges = identify_ridges(&maxima, &widths, n);

    let min_length = widths.len().div_ceil(4);
    let noise = noise_floor(&coefficients[0], config.noise_percentile);

    let mut peaks: Vec<usize> = ridges
        .iter()
        .filter(|ridge| ridge.rows.len() >= min_length)
        .filter_map(|ridge| {
            let (row, col) = ridge.finest();
            let value = coefficients[row][col];
            let snr = if noise[col] == 0.0 {
                if value == 0.0 { 0.0 } else { f64::INFINITY }
            } else {
                (value / noise[col]).abs()
            };
            tracing::trace!(
                coarsest = ridge.rows[0],
                finest = row,
                col,
                snr,
                "ridge"
            );
            if snr < config.min_snr {
                return None;
            }
            Some(snap_to_max(signal, col, widths[row]))
        })
        .collect();

    peaks.sort_unstable();
    peaks.dedup();
    peaks
}

/// Index of the largest value within `radius` samples of `center`,
/// preferring `center` and then the earliest offset on ties
fn snap_to_max(signal: &[f64], center: usize, radius: usize) -> usize {
    let n = signal.len();
    let radius = radius.min(n / 2);
    let mut best = center;
    for offset in 0..=2 * radius {
        let idx = (center + n + offset - radius) % n;
        if signal[idx] > signal[best] {
            best = idx;
        }
    }
    best
}
