use chrono::{TimeZone, Utc};
use std::{sync::Arc, time::Duration};
use wakeup_scheduler_api::Application;
use wakeup_scheduler_infra::{SchedulerContext, StaticTimeSys};

pub struct TestApp {
    pub ctx: SchedulerContext,
    pub address: String,
    pub client: reqwest::Client,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.address, path)
    }
}

/// Sunday 2026-10-18 06:00 in Tokyo
pub fn now_millis() -> i64 {
    Utc.with_ymd_and_hms(2026, 10, 17, 21, 0, 0)
        .unwrap()
        .timestamp_millis()
}

// Launch the application as a background task
pub async fn spawn_app() -> TestApp {
    let mut ctx = SchedulerContext::create_inmemory();
    ctx.config.port = 0; // Random port
    ctx.sys = Arc::new(StaticTimeSys::new(now_millis()));

    let application = Application::new(ctx.clone())
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });
    // Let the startup schedule passes finish before the first request
    actix_web::rt::time::sleep(Duration::from_millis(200)).await;

    TestApp {
        ctx,
        address,
        client: reqwest::Client::new(),
    }
}
