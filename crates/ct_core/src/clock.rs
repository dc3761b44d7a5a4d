use chrono::{DateTime, FixedOffset, Local};

pub trait Clock: Send + Sync {
    /// Current wall-clock time carrying the local UTC offset.
    fn now(&self) -> DateTime<FixedOffset>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        let now = Local::now();
        now.with_timezone(now.offset())
    }
}
