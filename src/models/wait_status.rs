/// Terminal outcome of a wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitStatus {
    /// The expected response was received `success_threshold` times in a row.
    Ready,
    /// The overall timeout elapsed before the expectations were met.
    TimedOut,
}

impl WaitStatus {
    pub fn is_ready(self) -> bool {
        self == WaitStatus::Ready
    }
}
