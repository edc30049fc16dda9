//! Paced, lazy event sequences.
//!
//! Both producers are plain [`Stream`]s: nothing runs until the consumer
//! polls, and a consumer that stops polling drops the pending timer with the
//! stream, so no production continues in the background. Every call builds a
//! fresh sequence; there is no shared cursor between calls.

use std::time::Duration;

use tokio_stream::Stream;

/// Yield exactly `count` items built by `factory`, waiting `interval`
/// between successive items.
pub fn generate<T, F>(count: usize, interval: Duration, mut factory: F) -> impl Stream<Item = T>
where
    F: FnMut(usize) -> T,
{
    async_stream::stream! {
        for i in 0..count {
            if i > 0 {
                tokio::time::sleep(interval).await;
            }
            yield factory(i);
        }
    }
}

/// Time-bounded variant: yield items every `interval` until `duration` has
/// elapsed. The deadline is fixed when the stream is first polled.
pub fn generate_for<T, F>(
    duration: Duration,
    interval: Duration,
    mut factory: F,
) -> impl Stream<Item = T>
where
    F: FnMut(usize) -> T,
{
    async_stream::stream! {
        let deadline = tokio::time::Instant::now() + duration;
        let mut i = 0;
        while tokio::time::Instant::now() < deadline {
            yield factory(i);
            i += 1;
            tokio::time::sleep(interval).await;
        }
    }
}
