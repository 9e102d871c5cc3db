use clap::Parser;
use station_forecast::utils::{logger, validation::Validate};
use station_forecast::{
    CliArgs, ForecastEngine, ForecastPipeline, RunOutcome, StationConfig, StationStore,
    WeatherPredictor,
};

async fn run(args: &CliArgs) -> station_forecast::Result<RunOutcome> {
    tracing::info!("📁 Loading configuration from: {}", args.config);
    let mut config = StationConfig::from_file(&args.config)?;
    args.apply_overrides(&mut config);
    config.validate()?;
    tracing::info!("✅ Configuration loaded for station: {}", config.station.name);

    let store = StationStore::from_config(&config)?;
    tracing::debug!("Using {} store", store.describe());
    let predictor = WeatherPredictor::load(&config.model)?;

    let pipeline = ForecastPipeline::new(store, predictor, &config)?;
    ForecastEngine::new(pipeline)
        .with_dry_run(args.dry_run)
        .run()
        .await
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    logger::init_logger(args.verbose, args.log_format);

    // Every failure ends here: logged, never turned into an exit status.
    match run(&args).await {
        Ok(RunOutcome::Saved { path, .. }) => {
            tracing::info!("✅ Forecast saved to: {}", path);
        }
        Ok(RunOutcome::DryRun(report)) => {
            tracing::info!("✅ Dry run finished for slot: /{}", report.target_path);
        }
        Ok(RunOutcome::NoData) => {
            tracing::info!("Nothing to forecast");
        }
        Err(e) => {
            tracing::error!("❌ Forecast run failed: {} (Category: {:?})", e, e.category());
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("An error occurred in the main process: {}", e);
        }
    }

    Ok(())
}
