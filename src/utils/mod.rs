pub mod retry;
pub mod time;

pub use retry::{retry_with_backoff, DEFAULT_MAX_RETRIES};
pub use time::backoff_delay;
