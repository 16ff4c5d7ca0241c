use super::sync_schedule::{SyncScheduleUseCase, SyncTrigger};
use crate::shared::usecase::{execute, Subscriber, UseCase};
use wakeup_scheduler_infra::SchedulerContext;

/// Regenerates the schedule after a use case changed alarms, overrides
/// or holidays
pub struct RegenerateScheduleSubscriber;

#[async_trait::async_trait(?Send)]
impl<U: UseCase> Subscriber<U> for RegenerateScheduleSubscriber {
    async fn notify(&self, _e: &U::Response, ctx: &SchedulerContext) {
        let usecase = SyncScheduleUseCase {
            trigger: SyncTrigger::Modified,
        };

        // Sideeffect, ignore result
        let _ = execute(usecase, ctx).await;
    }
}
