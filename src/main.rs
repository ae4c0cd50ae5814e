use std::sync::Arc;

use chrono::Utc;
use dotenv::dotenv;
use tracing::info;

use jobsieve::config::Config;
use jobsieve::report::JsonFileReporter;
use jobsieve::{run, scheduler};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::load();
    info!(
        "🔧 Config loaded. spool={} results={} cache={}",
        config.spool_dir.display(),
        config.results_dir.display(),
        config.cache_dir.display()
    );

    let reporter = Arc::new(JsonFileReporter::new(&config.results_dir));

    match config.cron_schedule.clone() {
        Some(schedule) => {
            let config = Arc::new(config);
            let _sched = scheduler::start(config, reporter, &schedule).await?;
            // Scheduled mode runs until the process is stopped.
            tokio::signal::ctrl_c().await?;
            info!("🏁 Shutting down");
        }
        None => {
            let delivered = tokio::task::spawn_blocking(move || {
                run::run_pass(&config, reporter.as_ref(), Utc::now())
            })
            .await??;
            info!("🏁 Execution finished. {delivered} jobs delivered");
        }
    }

    Ok(())
}
