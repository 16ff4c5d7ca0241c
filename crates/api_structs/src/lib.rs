mod alarm;
mod day;
mod holiday;
mod schedule;
mod shared;
mod status;

pub mod dtos {
    pub use crate::alarm::dtos::*;
    pub use crate::day::dtos::*;
    pub use crate::holiday::dtos::*;
    pub use crate::schedule::dtos::*;
}

pub use crate::alarm::api::*;
pub use crate::day::api::*;
pub use crate::holiday::api::*;
pub use crate::schedule::api::*;
pub use crate::status::api::*;
