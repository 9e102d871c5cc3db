use crate::core::Pipeline;
use crate::domain::model::ForecastReport;
use crate::utils::error::Result;

#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// The source collection was empty; nothing was written.
    NoData,
    /// Computed but not written (`--dry-run`).
    DryRun(ForecastReport),
    Saved { report: ForecastReport, path: String },
}

pub struct ForecastEngine<P: Pipeline> {
    pipeline: P,
    dry_run: bool,
}

impl<P: Pipeline> ForecastEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self {
            pipeline,
            dry_run: false,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub async fn run(&self) -> Result<RunOutcome> {
        tracing::info!("🚀 Starting forecast run");

        let Some(latest) = self.pipeline.extract().await? else {
            println!("No sensor data found.");
            return Ok(RunOutcome::NoData);
        };
        println!("[INFO] Reading key: {}", latest.key);

        let report = self.pipeline.transform(latest).await?;
        print_report(&report);

        if self.dry_run {
            tracing::info!("🔍 DRY RUN MODE - forecast not saved (would write /{})", report.target_path);
            return Ok(RunOutcome::DryRun(report));
        }

        let path = self.pipeline.load(&report).await?;
        println!("\nForecast processed and saved at path: {}", path);
        Ok(RunOutcome::Saved { report, path })
    }
}

fn print_report(report: &ForecastReport) {
    let prediction = &report.prediction;
    let document = &report.document;

    println!(
        "Light intensity: {}, SS value: {}",
        report.light_intensity, report.input.ss
    );
    println!("Model input: {}", serde_json::to_string(&report.input).unwrap_or_default());

    println!("\n--- WEATHER FORECAST ---");
    println!("- Klasifikasi Cuaca: {}", document.classification);
    println!("- Suhu_AVG_C: {}", prediction.tavg);
    println!("- RH_AVG_Persen: {}", prediction.rh_avg);
    println!("- FF_AVG_kmh: {}", prediction.wind_kmh());
    println!(
        "- DDD_X_Derajat: {} ({})",
        prediction.ddd_x, document.prediction.wind_direction_text
    );

    println!("\n--- SOIL CONDITION ---");
    println!(
        "Rekomendasi Penyiraman: {} ({})",
        document.irrigation.recommendation, document.irrigation.score_detail
    );
}
