use crate::{reminder::send_due_reminders::SendDueRemindersUseCase, shared::usecase::execute};
use remindr_infra::RemindrContext;
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};
use tracing::info;

/// Runs the delivery of due reminders at a fixed interval. A run is awaited
/// before the next tick, so runs never overlap and ticks missed while a slow
/// run was going on are skipped.
pub fn start_send_reminders_job(ctx: RemindrContext) {
    actix_web::rt::spawn(async move {
        let period = Duration::from_secs(ctx.config.delivery_interval_secs);
        info!("Delivering due reminders every {:?}", period);
        let mut interval = interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            interval.tick().await;
            let _ = execute(SendDueRemindersUseCase {}, &ctx).await;
        }
    });
}
