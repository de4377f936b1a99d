//! Background expiry scheduler
//!
//! Runs the expiry sweep on a fixed interval. An event is archived on the
//! first sweep after its deadline, so expiry carries up to one interval of
//! slack. Sweep errors are logged and the schedule keeps running.

use std::time::Duration;
use chrono::Utc;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info};
use crate::services::EventService;
use crate::utils::errors::Result;

/// Starts the expiry scheduler
pub async fn start_scheduler(event_service: EventService, poll_interval: Duration) -> Result<()> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_repeated_async(poll_interval, move |_uuid, _lock| {
        let event_service = event_service.clone();

        Box::pin(async move {
            if let Err(e) = event_service.sweep(Utc::now()).await {
                error!(error = %e, "Error during expiry sweep");
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    info!(
        poll_interval_seconds = poll_interval.as_secs(),
        "Expiry scheduler started"
    );

    Ok(())
}
