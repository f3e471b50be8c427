use crate::core::fetch::FetchHandle;
use crate::core::histogram::{bin, BinningStrategy};
use crate::core::smoothing::{smooth, SmoothingKind};
use crate::domain::model::{Bucket, SmoothedPoint};
use crate::domain::ports::ObservationSource;
use crate::utils::error::{DashboardError, Result};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

/// Fixed dataset styling, registered once (see `ensure_chart_setup`).
#[derive(Debug)]
pub struct ChartDefaults {
    pub title: &'static str,
    pub bar_label: &'static str,
    pub line_label: &'static str,
    pub bar_color: &'static str,
    pub line_color: &'static str,
    pub point_color: &'static str,
}

static CHART_SETUP_DONE: AtomicBool = AtomicBool::new(false);
static CHART_DEFAULTS: OnceLock<ChartDefaults> = OnceLock::new();

/// One-time registration of chart dataset defaults. Explicitly invoked
/// before first render; repeated calls are no-ops guarded by a flag.
pub fn ensure_chart_setup() -> &'static ChartDefaults {
    if !CHART_SETUP_DONE.swap(true, Ordering::SeqCst) {
        tracing::debug!("Registering chart dataset defaults");
    }
    CHART_DEFAULTS.get_or_init(|| ChartDefaults {
        title: "Salary Distribution",
        bar_label: "Salary Frequency",
        // A 3-point moving average, not a statistical KDE.
        line_label: "Density curve (approximation)",
        bar_color: "#22c55e",
        line_color: "#4ade80",
        point_color: "#bbf7d0",
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetKind {
    Bar,
    Line,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    #[serde(rename = "type")]
    pub kind: DatasetKind,
    pub label: String,
    pub data: Vec<f64>,
    pub color: String,
}

/// The renderable chart model: bucket labels plus a bar dataset (raw counts)
/// and a line dataset (smoothed overlay). Pure presentation data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

fn compact_amount(v: f64) -> String {
    let rounded = v.round();
    if rounded.abs() >= 1000.0 && rounded % 1000.0 == 0.0 {
        format!("{}k", (rounded / 1000.0) as i64)
    } else {
        format!("{}", rounded as i64)
    }
}

fn bucket_label(bucket: &Bucket) -> String {
    format!(
        "{}-{}",
        compact_amount(bucket.lower),
        compact_amount(bucket.upper)
    )
}

pub fn build_spec(buckets: &[Bucket], smoothed: &[SmoothedPoint]) -> ChartSpec {
    let defaults = ensure_chart_setup();
    ChartSpec {
        title: defaults.title.to_string(),
        labels: buckets.iter().map(bucket_label).collect(),
        datasets: vec![
            Dataset {
                kind: DatasetKind::Bar,
                label: defaults.bar_label.to_string(),
                data: buckets.iter().map(|b| b.count as f64).collect(),
                color: defaults.bar_color.to_string(),
            },
            Dataset {
                kind: DatasetKind::Line,
                label: defaults.line_label.to_string(),
                data: smoothed.iter().map(|p| p.value).collect(),
                color: defaults.line_color.to_string(),
            },
        ],
    }
}

/// Render state of one chart panel. A panel transitions out of `Loading`
/// exactly once per fetch attempt; there is no built-in retry.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartState {
    Loading,
    Failed(String),
    Ready(ChartSpec),
    Empty,
}

pub struct ChartPanel {
    state: ChartState,
    resolved: bool,
}

impl Default for ChartPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartPanel {
    pub fn new() -> Self {
        Self {
            state: ChartState::Loading,
            resolved: false,
        }
    }

    pub fn state(&self) -> &ChartState {
        &self.state
    }

    /// Starts the fetch-bin-smooth pipeline in the background. The caller
    /// keeps the handle; cancelling it makes the eventual completion a no-op.
    pub fn begin_load(
        source: Arc<dyn ObservationSource>,
        strategy: BinningStrategy,
        smoothing: SmoothingKind,
    ) -> FetchHandle<ChartSpec> {
        FetchHandle::spawn(async move { build_chart(source.as_ref(), strategy, smoothing).await })
    }

    /// Waits for an in-flight load and commits the outcome. A stale handle
    /// (panel torn down mid-fetch) leaves the state untouched.
    pub async fn finish_load(&mut self, handle: FetchHandle<ChartSpec>) {
        if let Some(outcome) = handle.join().await {
            self.resolve(outcome);
        }
    }

    /// Runs one full load attempt in place. Convenience for callers that do
    /// not need cancellation.
    pub async fn load(
        &mut self,
        source: &dyn ObservationSource,
        strategy: BinningStrategy,
        smoothing: SmoothingKind,
    ) {
        if self.resolved {
            return;
        }
        let outcome = build_chart(source, strategy, smoothing).await;
        self.resolve(outcome);
    }

    /// Commits a fetch outcome. All data errors are absorbed here and turned
    /// into a displayable state; nothing propagates past the panel.
    pub fn resolve(&mut self, outcome: Result<ChartSpec>) {
        if self.resolved {
            return;
        }
        self.resolved = true;
        self.state = match outcome {
            Ok(spec) => ChartState::Ready(spec),
            Err(DashboardError::EmptyDataset) => ChartState::Empty,
            Err(e @ (DashboardError::CsvError(_) | DashboardError::ParseError { .. })) => {
                tracing::warn!("Chart data parse failure: {}", e);
                ChartState::Failed("Failed to parse chart data.".to_string())
            }
            Err(e) => {
                tracing::warn!("Chart data fetch failure: {}", e);
                ChartState::Failed("Could not load chart data.".to_string())
            }
        };
    }
}

async fn build_chart(
    source: &dyn ObservationSource,
    strategy: BinningStrategy,
    smoothing: SmoothingKind,
) -> Result<ChartSpec> {
    tracing::debug!("Fetching observations from {}", source.describe());
    let values = source.fetch().await?;
    tracing::debug!("Fetched {} observations", values.len());

    let buckets = bin(&values, strategy)?;
    let curve = smooth(&buckets, smoothing);
    Ok(build_spec(&buckets, &curve))
}

/// Plain-text rendering of the chart model for terminal output.
pub fn render_text(spec: &ChartSpec) -> String {
    let counts = &spec.datasets[0].data;
    let curve = &spec.datasets[1].data;
    let max_count = counts.iter().copied().fold(0.0_f64, f64::max).max(1.0);
    let label_width = spec.labels.iter().map(|l| l.len()).max().unwrap_or(0);

    let mut out = String::new();
    out.push_str(&spec.title);
    out.push('\n');
    for (i, label) in spec.labels.iter().enumerate() {
        let bar_len = ((counts[i] / max_count) * 40.0).round() as usize;
        out.push_str(&format!(
            "{:<width$} | {:<40} {:>5}  ~{:.1}\n",
            label,
            "#".repeat(bar_len),
            counts[i] as u64,
            curve[i],
            width = label_width,
        ));
    }
    out.push_str(&format!(
        "({} / {})\n",
        spec.datasets[0].label, spec.datasets[1].label
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct StaticSource(Vec<f64>);

    #[async_trait]
    impl ObservationSource for StaticSource {
        async fn fetch(&self) -> Result<Vec<f64>> {
            Ok(self.0.clone())
        }

        fn describe(&self) -> String {
            "static".to_string()
        }
    }

    struct FailingSource;

    #[async_trait]
    impl ObservationSource for FailingSource {
        async fn fetch(&self) -> Result<Vec<f64>> {
            Err(DashboardError::ParseError {
                message: "bad payload".to_string(),
            })
        }

        fn describe(&self) -> String {
            "failing".to_string()
        }
    }

    #[test]
    fn test_chart_setup_is_idempotent() {
        let first = ensure_chart_setup();
        let second = ensure_chart_setup();
        assert!(std::ptr::eq(first, second));
        assert_eq!(first.bar_color, "#22c55e");
    }

    #[test]
    fn test_spec_binds_counts_and_curve() {
        let buckets = vec![
            Bucket { lower: 0.0, upper: 10_000.0, count: 2 },
            Bucket { lower: 10_000.0, upper: 20_000.0, count: 5 },
        ];
        let curve = smooth(&buckets, SmoothingKind::MovingAverage);
        let spec = build_spec(&buckets, &curve);

        assert_eq!(spec.labels, vec!["0-10k", "10k-20k"]);
        assert_eq!(spec.datasets[0].kind, DatasetKind::Bar);
        assert_eq!(spec.datasets[0].data, vec![2.0, 5.0]);
        assert_eq!(spec.datasets[1].kind, DatasetKind::Line);
        assert_eq!(spec.datasets[1].data.len(), 2);
    }

    #[tokio::test]
    async fn test_panel_reaches_ready() {
        let mut panel = ChartPanel::new();
        assert_eq!(*panel.state(), ChartState::Loading);

        let source = StaticSource(vec![5000.0, 15000.0, 25000.0, 9000.0]);
        panel
            .load(
                &source,
                BinningStrategy::FixedWidth { width: 10_000.0 },
                SmoothingKind::MovingAverage,
            )
            .await;

        match panel.state() {
            ChartState::Ready(spec) => assert_eq!(spec.labels.len(), 3),
            other => panic!("expected Ready, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_panel_empty_dataset_is_not_an_error() {
        let mut panel = ChartPanel::new();
        let source = StaticSource(vec![]);
        panel
            .load(&source, BinningStrategy::default(), SmoothingKind::MovingAverage)
            .await;
        assert_eq!(*panel.state(), ChartState::Empty);
    }

    #[tokio::test]
    async fn test_panel_absorbs_fetch_failure() {
        let mut panel = ChartPanel::new();
        panel
            .load(&FailingSource, BinningStrategy::default(), SmoothingKind::MovingAverage)
            .await;
        assert_eq!(
            *panel.state(),
            ChartState::Failed("Failed to parse chart data.".to_string())
        );
    }

    #[tokio::test]
    async fn test_panel_resolves_exactly_once() {
        let mut panel = ChartPanel::new();
        panel.resolve(Err(DashboardError::EmptyDataset));
        assert_eq!(*panel.state(), ChartState::Empty);

        // A second outcome for the same attempt must not overwrite the state.
        panel.resolve(Ok(build_spec(&[], &[])));
        assert_eq!(*panel.state(), ChartState::Empty);
    }

    #[tokio::test]
    async fn test_cancelled_load_leaves_panel_loading() {
        let mut panel = ChartPanel::new();
        let source: Arc<dyn ObservationSource> = Arc::new(StaticSource(vec![1000.0]));
        let handle = ChartPanel::begin_load(
            source,
            BinningStrategy::default(),
            SmoothingKind::MovingAverage,
        );
        handle.cancel();
        panel.finish_load(handle).await;
        assert_eq!(*panel.state(), ChartState::Loading);
    }

    #[test]
    fn test_render_text_contains_labels_and_counts() {
        let buckets = vec![
            Bucket { lower: 0.0, upper: 10_000.0, count: 3 },
            Bucket { lower: 10_000.0, upper: 20_000.0, count: 1 },
        ];
        let curve = smooth(&buckets, SmoothingKind::Passthrough);
        let rendered = render_text(&build_spec(&buckets, &curve));
        assert!(rendered.contains("Salary Distribution"));
        assert!(rendered.contains("0-10k"));
        assert!(rendered.contains("####"));
    }
}
