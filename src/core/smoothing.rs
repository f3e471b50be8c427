use crate::domain::model::{Bucket, SmoothedPoint};

/// How the overlay curve is derived from bucket counts. Neither variant is a
/// statistical KDE; `MovingAverage` is a crude low-pass approximation and
/// `Passthrough` just re-plots the counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SmoothingKind {
    #[default]
    MovingAverage,
    Passthrough,
}

/// Derives one point per bucket, positioned at the bucket midpoint. The
/// moving average treats missing neighbors as zero, so boundary points are
/// pulled toward the axis.
pub fn smooth(buckets: &[Bucket], kind: SmoothingKind) -> Vec<SmoothedPoint> {
    buckets
        .iter()
        .enumerate()
        .map(|(i, bucket)| {
            let value = match kind {
                SmoothingKind::MovingAverage => {
                    let prev = if i > 0 { buckets[i - 1].count } else { 0 };
                    let next = buckets.get(i + 1).map_or(0, |b| b.count);
                    (prev + bucket.count + next) as f64 / 3.0
                }
                SmoothingKind::Passthrough => bucket.count as f64,
            };
            SmoothedPoint {
                position: bucket.midpoint(),
                value,
            }
        })
        .collect()
}
