use std::sync::Arc;

use chrono::Utc;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info};

use crate::config::Config;
use crate::report::Reporter;
use crate::run;

/// Runs the job-search pass on a cron schedule, plus a heartbeat so the
/// scheduler's liveness shows up in the logs. Returns once the scheduler is
/// started; jobs keep firing in the background.
pub async fn start(
    config: Arc<Config>,
    reporter: Arc<dyn Reporter>,
    schedule: &str,
) -> anyhow::Result<JobScheduler> {
    let sched = JobScheduler::new().await?;

    // Heartbeat every 5 minutes.
    sched
        .add(Job::new_async("0 */5 * * * *", |_uuid, _l| {
            Box::pin(async move {
                info!("⏰ [Scheduler] Heartbeat: job-search scheduler active");
            })
        })?)
        .await?;

    let pass_config = config.clone();
    let pass_reporter = reporter.clone();
    sched
        .add(Job::new_async(schedule, move |_uuid, _l| {
            let config = pass_config.clone();
            let reporter = pass_reporter.clone();
            Box::pin(async move {
                info!("⏰ [Scheduler] Triggering scheduled job-search pass");
                // The pass is blocking file I/O; keep it off the async workers.
                let result = tokio::task::spawn_blocking(move || {
                    run::run_pass(&config, reporter.as_ref(), Utc::now())
                })
                .await;
                match result {
                    Ok(Ok(delivered)) => info!("✅ [Scheduler] Pass delivered {delivered} jobs"),
                    Ok(Err(e)) => error!("❌ [Scheduler] Pass failed: {e}"),
                    Err(e) => error!("🔥 [Scheduler] Pass panicked: {e}"),
                }
            })
        })?)
        .await?;

    sched.start().await?;
    info!("✅ Scheduler started with schedule '{schedule}'");
    Ok(sched)
}
