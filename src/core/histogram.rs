use crate::domain::model::Bucket;
use crate::utils::error::{DashboardError, Result};

/// The two binning modes are intentionally distinct: fixed-width buckets
/// anchor the axis at zero, fixed-count buckets span `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BinningStrategy {
    FixedWidth { width: f64 },
    FixedCount { buckets: usize },
}

pub const DEFAULT_BUCKET_WIDTH: f64 = 10_000.0;
pub const DEFAULT_BUCKET_COUNT: usize = 30;

impl Default for BinningStrategy {
    fn default() -> Self {
        BinningStrategy::FixedWidth {
            width: DEFAULT_BUCKET_WIDTH,
        }
    }
}

/// Partitions `values` into contiguous equal-width buckets and counts
/// membership. Every valid observation lands in exactly one bucket; values
/// at the maximum fold into the last bucket.
pub fn bin(values: &[f64], strategy: BinningStrategy) -> Result<Vec<Bucket>> {
    if values.is_empty() {
        return Err(DashboardError::EmptyDataset);
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    match strategy {
        BinningStrategy::FixedWidth { width } => bin_fixed_width(values, max, width),
        BinningStrategy::FixedCount { buckets } => bin_fixed_count(values, min, max, buckets),
    }
}

fn bin_fixed_width(values: &[f64], max: f64, width: f64) -> Result<Vec<Bucket>> {
    if !(width > 0.0) || max <= 0.0 {
        return Ok(degenerate_bucket(values, 0.0, max.max(0.0)));
    }

    let bucket_count = (max / width).ceil() as usize;
    let bucket_count = bucket_count.max(1);
    let mut counts = vec![0u64; bucket_count];

    for &v in values {
        let index = ((v / width).floor() as usize).min(bucket_count - 1);
        counts[index] += 1;
    }

    Ok(counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| Bucket {
            lower: i as f64 * width,
            upper: (i + 1) as f64 * width,
            count,
        })
        .collect())
}

fn bin_fixed_count(values: &[f64], min: f64, max: f64, buckets: usize) -> Result<Vec<Bucket>> {
    let width = if buckets > 0 {
        (max - min) / buckets as f64
    } else {
        0.0
    };
    if !(width > 0.0) {
        // Single-valued dataset or zero bucket request: one bucket holding
        // every observation, guarding the division below.
        return Ok(degenerate_bucket(values, min, max));
    }

    let mut counts = vec![0u64; buckets];
    for &v in values {
        let raw = ((v - min) / width).floor();
        let index = (raw.max(0.0) as usize).min(buckets - 1);
        counts[index] += 1;
    }

    Ok(counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| Bucket {
            lower: min + i as f64 * width,
            upper: min + (i + 1) as f64 * width,
            count,
        })
        .collect())
}

fn degenerate_bucket(values: &[f64], lower: f64, upper: f64) -> Vec<Bucket> {
    vec![Bucket {
        lower,
        upper,
        count: values.len() as u64,
    }]
}
