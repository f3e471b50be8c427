use anyhow::Context;
use clap::Parser;
use salarycast::adapters::{CsvColumnSource, JsonArraySource};
use salarycast::config::{ChartArgs, Cli, Command, DashboardConfig, PredictArgs};
use salarycast::core::chart::{ensure_chart_setup, render_text, ChartPanel, ChartState};
use salarycast::core::form::{FormPhase, PredictionForm};
use salarycast::core::predict::PredictionClient;
use salarycast::domain::model::PredictionRequest;
use salarycast::domain::ports::{ConfigProvider, ObservationSource};
use salarycast::utils::validation::{validate_url, Validate};
use salarycast::utils::logger;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logger::init_cli_logger(cli.verbose);
    tracing::info!("Starting salarycast");

    let config = match &cli.config {
        Some(path) => DashboardConfig::from_file(path)
            .with_context(|| format!("could not load config from {}", path.display()))?,
        None => DashboardConfig::default(),
    };

    match cli.command {
        Command::Predict(args) => run_predict(args, &config).await,
        Command::Chart(args) => run_chart(args, &config).await,
    }
}

async fn run_predict(args: PredictArgs, config: &DashboardConfig) -> anyhow::Result<()> {
    let endpoint = args
        .endpoint
        .as_deref()
        .unwrap_or_else(|| config.predict_endpoint());

    if let Err(e) = validate_url("endpoint", endpoint) {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let request = PredictionRequest {
        age: args.age,
        gender: args.gender,
        education: args.education,
        job_title: args.job_title,
        experience_years: args.experience,
    };

    if let Err(e) = request.validate() {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let mut form = PredictionForm::new(PredictionClient::new(endpoint));
    form.submit(&request).await;

    match form.phase() {
        FormPhase::Succeeded(_) => {
            let line = form.display_result().unwrap_or_default();
            tracing::info!("Prediction succeeded");
            println!("✅ {}", line);
            Ok(())
        }
        FormPhase::Failed(message) => {
            eprintln!("❌ {}", message);
            std::process::exit(1);
        }
        // submit() always resolves to Succeeded or Failed for a valid request.
        other => anyhow::bail!("form ended in unexpected phase {:?}", other),
    }
}

async fn run_chart(args: ChartArgs, config: &DashboardConfig) -> anyhow::Result<()> {
    let source: Arc<dyn ObservationSource> = if let Some(path) = &args.csv {
        Arc::new(CsvColumnSource::with_column(path, &args.column))
    } else {
        let url = args
            .source_url
            .as_deref()
            .unwrap_or_else(|| config.salary_data_endpoint());
        if let Err(e) = validate_url("source-url", url) {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
        Arc::new(JsonArraySource::new(url))
    };

    let strategy = args.binning_or(config.binning());

    // Explicit one-time chart setup before the first render.
    ensure_chart_setup();

    let mut panel = ChartPanel::new();
    let handle = ChartPanel::begin_load(source, strategy, args.smoothing);
    panel.finish_load(handle).await;

    match panel.state() {
        ChartState::Ready(spec) => {
            print!("{}", render_text(spec));
            Ok(())
        }
        ChartState::Empty => {
            println!("No salary data available for chart.");
            Ok(())
        }
        ChartState::Failed(message) => {
            eprintln!("❌ {}", message);
            std::process::exit(1);
        }
        ChartState::Loading => anyhow::bail!("chart load never resolved"),
    }
}
