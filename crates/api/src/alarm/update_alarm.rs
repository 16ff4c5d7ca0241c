use crate::{
    error::SchedulerError,
    schedule::RegenerateScheduleSubscriber,
    shared::usecase::{execute, Subscriber, UseCase},
};
use actix_web::{web, HttpResponse};
use wakeup_scheduler_api_structs::update_alarm::{APIResponse, PathParams, RequestBody};
use wakeup_scheduler_domain::{AlarmRule, AlarmSound, InvalidTimeError, Recurrence, TimeOfDay, ID};
use wakeup_scheduler_infra::SchedulerContext;

fn handle_error(e: UseCaseErrors) -> SchedulerError {
    match e {
        UseCaseErrors::NotFound(alarm_id) => SchedulerError::NotFound(format!(
            "The alarm with id: {}, was not found.",
            alarm_id
        )),
        UseCaseErrors::InvalidTime(e) => SchedulerError::BadClientData(e.to_string()),
        UseCaseErrors::StorageError => SchedulerError::InternalError,
    }
}

pub async fn update_alarm_controller(
    path: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<SchedulerContext>,
) -> Result<HttpResponse, SchedulerError> {
    let body = body.0;
    let usecase = UpdateAlarmUseCase {
        alarm_id: path.alarm_id.clone(),
        hour: body.hour,
        minute: body.minute,
        recurrence: body.recurrence.map(|r| r.to_recurrence()),
        enabled: body.enabled,
        snooze_enabled: body.snooze_enabled,
        label: body.label,
        holiday_aware: body.holiday_aware,
        sound: body.sound,
    };

    execute(usecase, &ctx)
        .await
        .map(|alarm| HttpResponse::Ok().json(APIResponse::new(alarm)))
        .map_err(handle_error)
}

/// Changes the base rule. Fields left out keep their current value and
/// per-day overrides are left untouched.
#[derive(Debug, Default)]
pub struct UpdateAlarmUseCase {
    pub alarm_id: ID,
    pub hour: Option<u32>,
    pub minute: Option<u32>,
    pub recurrence: Option<Recurrence>,
    pub enabled: Option<bool>,
    pub snooze_enabled: Option<bool>,
    /// An empty label removes it
    pub label: Option<String>,
    /// `Some(None)` leaves holidays to the policy again
    pub holiday_aware: Option<Option<bool>>,
    pub sound: Option<AlarmSound>,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    NotFound(ID),
    InvalidTime(InvalidTimeError),
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateAlarmUseCase {
    type Response = AlarmRule;

    type Errors = UseCaseErrors;

    const NAME: &'static str = "UpdateAlarm";

    async fn execute(&mut self, ctx: &SchedulerContext) -> Result<Self::Response, Self::Errors> {
        let mut alarm = match ctx.repos.alarms.find(&self.alarm_id).await {
            Some(alarm) => alarm,
            None => return Err(UseCaseErrors::NotFound(self.alarm_id.clone())),
        };

        if self.hour.is_some() || self.minute.is_some() {
            alarm.time = TimeOfDay::new(
                self.hour.unwrap_or_else(|| alarm.time.hour()),
                self.minute.unwrap_or_else(|| alarm.time.minute()),
            )
            .map_err(UseCaseErrors::InvalidTime)?;
        }
        if let Some(recurrence) = &self.recurrence {
            alarm.recurrence = recurrence.clone();
        }
        if let Some(enabled) = self.enabled {
            alarm.enabled = enabled;
        }
        if let Some(snooze_enabled) = self.snooze_enabled {
            alarm.snooze_enabled = snooze_enabled;
        }
        if let Some(holiday_aware) = self.holiday_aware {
            alarm.holiday_aware = holiday_aware;
        }
        if let Some(sound) = self.sound {
            alarm.sound = sound;
        }
        if let Some(label) = &self.label {
            alarm.label = if label.trim().is_empty() {
                None
            } else {
                Some(label.clone())
            };
        }

        ctx.repos
            .alarms
            .save(&alarm)
            .await
            .map(|_| alarm)
            .map_err(|_| UseCaseErrors::StorageError)
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(RegenerateScheduleSubscriber)]
    }
}
