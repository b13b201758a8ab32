//! Daily plan domain module.

mod model;

pub use model::{DailyPlan, PlanItem};
