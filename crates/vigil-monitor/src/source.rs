//! Text source collaborator contract

use futures_util::future::BoxFuture;

use crate::error::SampleError;

/// Supplier of a session's most recent rendered text.
///
/// Implemented by the rendering collaborator's page handle. The returned
/// text is best effort and may be empty; the monitor additionally wraps the
/// call in a timeout, so implementations need not enforce their own.
pub trait TextSource: Send + Sync + 'static {
    fn current_text(&self) -> BoxFuture<'_, Result<String, SampleError>>;
}
