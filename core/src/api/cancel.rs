use std::future::Future;

pub use tokio_util::sync::CancellationToken;

use crate::api::error::Error;

/// Runs `future` until it completes or `token` is cancelled, whichever
/// comes first. On cancellation the in-flight request is dropped and
/// [`Error::Cancelled`] is returned.
pub async fn cancellable<F, T>(token: &CancellationToken, future: F) -> Result<T, Error>
where
    F: Future<Output = Result<T, Error>>,
{
    tokio::select! {
        biased;
        _ = token.cancelled() => Err(Error::Cancelled),
        result = future => result,
    }
}
