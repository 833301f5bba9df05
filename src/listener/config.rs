/// Maximum number of messages the queue service returns per receive call.
pub const MAX_BATCH_SIZE: i32 = 10;

/// Maximum long-poll wait the queue service accepts, in seconds.
pub const MAX_WAIT_TIME_SECONDS: i32 = 20;

/// Configuration for a [`Listener`](crate::listener::Listener).
///
/// Set once at construction and never re-read from the environment
/// afterwards.
///
/// # Fields
/// - `queue_url`: the queue to poll.
/// - `max_messages`: the maximum number of messages per receive call.
/// - `wait_time_seconds`: the long-poll wait per receive call.
/// - `max_polls`: the total number of poll iterations before the listener
///   stops on its own.
#[derive(Debug, Clone)]
pub struct Config {
    /// The URL of the queue to poll.
    pub queue_url: String,

    /// The maximum number of messages to receive in a single request.
    /// Values outside `1..=10` are clamped to the service limit.
    pub max_messages: i32,

    /// The wait time for long polling, in seconds. Values outside `0..=20`
    /// are clamped to the service limit.
    pub wait_time_seconds: i32,

    /// The number of poll iterations to run. Defaults to `usize::MAX`,
    /// which effectively means "run until shut down".
    pub max_polls: usize,
}

impl Config {
    /// Creates a configuration for the given queue with the service-limit
    /// defaults: batches of 10, 20-second long polling, unbounded polling.
    pub fn new(queue_url: impl Into<String>) -> Self {
        Config {
            queue_url: queue_url.into(),
            max_messages: MAX_BATCH_SIZE,
            wait_time_seconds: MAX_WAIT_TIME_SECONDS,
            max_polls: usize::MAX,
        }
    }

    pub(crate) fn clamped_max_messages(&self) -> i32 {
        self.max_messages.clamp(1, MAX_BATCH_SIZE)
    }

    pub(crate) fn clamped_wait_time_seconds(&self) -> i32 {
        self.wait_time_seconds.clamp(0, MAX_WAIT_TIME_SECONDS)
    }
}
