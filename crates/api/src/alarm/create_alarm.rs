use crate::{
    error::SchedulerError,
    schedule::RegenerateScheduleSubscriber,
    shared::usecase::{execute, Subscriber, UseCase},
};
use actix_web::{web, HttpResponse};
use wakeup_scheduler_api_structs::create_alarm::{APIResponse, RequestBody};
use wakeup_scheduler_domain::{AlarmRule, AlarmSound, InvalidTimeError, Recurrence, TimeOfDay};
use wakeup_scheduler_infra::SchedulerContext;

fn handle_error(e: UseCaseErrors) -> SchedulerError {
    match e {
        UseCaseErrors::InvalidTime(e) => SchedulerError::BadClientData(e.to_string()),
        UseCaseErrors::StorageError => SchedulerError::InternalError,
    }
}

pub async fn create_alarm_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<SchedulerContext>,
) -> Result<HttpResponse, SchedulerError> {
    let body = body.0;
    let usecase = CreateAlarmUseCase {
        hour: body.hour,
        minute: body.minute,
        recurrence: body.recurrence.to_recurrence(),
        enabled: body.enabled.unwrap_or(true),
        snooze_enabled: body.snooze_enabled.unwrap_or(false),
        label: body.label,
        holiday_aware: body.holiday_aware,
        sound: body.sound.unwrap_or_default(),
    };

    execute(usecase, &ctx)
        .await
        .map(|alarm| HttpResponse::Created().json(APIResponse::new(alarm)))
        .map_err(handle_error)
}

#[derive(Debug)]
pub struct CreateAlarmUseCase {
    pub hour: u32,
    pub minute: u32,
    pub recurrence: Recurrence,
    pub enabled: bool,
    pub snooze_enabled: bool,
    pub label: Option<String>,
    pub holiday_aware: Option<bool>,
    pub sound: AlarmSound,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    InvalidTime(InvalidTimeError),
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateAlarmUseCase {
    type Response = AlarmRule;

    type Errors = UseCaseErrors;

    const NAME: &'static str = "CreateAlarm";

    async fn execute(&mut self, ctx: &SchedulerContext) -> Result<Self::Response, Self::Errors> {
        let time = TimeOfDay::new(self.hour, self.minute).map_err(UseCaseErrors::InvalidTime)?;
        let mut alarm = AlarmRule::new(time, self.recurrence.clone());
        alarm.enabled = self.enabled;
        alarm.snooze_enabled = self.snooze_enabled;
        alarm.label = self.label.clone();
        alarm.holiday_aware = self.holiday_aware;
        alarm.sound = self.sound;

        ctx.repos
            .alarms
            .insert(&alarm)
            .await
            .map(|_| alarm)
            .map_err(|_| UseCaseErrors::StorageError)
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(RegenerateScheduleSubscriber)]
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn usecase(hour: u32, minute: u32) -> CreateAlarmUseCase {
        CreateAlarmUseCase {
            hour,
            minute,
            recurrence: Recurrence::Weekdays,
            enabled: true,
            snooze_enabled: true,
            label: Some("Work".into()),
            holiday_aware: None,
            sound: AlarmSound::Beep,
        }
    }

    #[actix_web::main]
    #[test]
    async fn creates_alarm() {
        let ctx = SchedulerContext::create_inmemory();
        let alarm = usecase(6, 30).execute(&ctx).await.unwrap();

        let stored = ctx.repos.alarms.find(&alarm.id).await.unwrap();
        assert_eq!(stored, alarm);
        assert_eq!(stored.time, TimeOfDay::new(6, 30).unwrap());
        assert!(stored.snooze_enabled);
        assert_eq!(stored.sound, AlarmSound::Beep);
    }

    #[actix_web::main]
    #[test]
    async fn rejects_invalid_time() {
        let ctx = SchedulerContext::create_inmemory();
        for (hour, minute) in [(24, 0), (7, 60)] {
            assert!(matches!(
                usecase(hour, minute).execute(&ctx).await,
                Err(UseCaseErrors::InvalidTime(_))
            ));
        }
        assert!(ctx.repos.alarms.find_all().await.is_empty());
    }
}
