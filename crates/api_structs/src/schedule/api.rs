use crate::dtos::ScheduledEventDTO;
use serde::{Deserialize, Serialize};
use wakeup_scheduler_domain::ScheduledEvent;

pub mod get_schedule {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub generation: u64,
        pub generated_at: Option<i64>,
        /// Whether deliveries are permitted
        pub ready: bool,
        pub events: Vec<ScheduledEventDTO>,
    }

    impl APIResponse {
        pub fn new(
            generation: u64,
            generated_at: Option<i64>,
            ready: bool,
            events: Vec<ScheduledEvent>,
        ) -> Self {
            Self {
                generation,
                generated_at,
                ready,
                events: events.into_iter().map(ScheduledEventDTO::new).collect(),
            }
        }
    }
}

pub mod sync_schedule {
    use super::*;

    #[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
    #[serde(rename_all = "camelCase")]
    pub enum SyncStatus {
        Synced,
        /// Deliveries are not permitted yet
        NotReady,
        /// A newer pass took over
        Superseded,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub status: SyncStatus,
        pub scheduled: usize,
        pub rejected: usize,
    }
}
