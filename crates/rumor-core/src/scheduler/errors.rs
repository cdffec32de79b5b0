#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
    #[error("scheduler inbox is full")]
    Full,

    #[error("scheduler is closed")]
    Closed,
}
