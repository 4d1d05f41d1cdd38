pub mod scheduler;

pub use scheduler::{spawn_settlement_scheduler, SchedulerConfig};
