//! Rendering collaborator contracts
//!
//! The supervisor never talks to a concrete rendering backend. It asks a
//! `Renderer` for one `PageHandle` per session and drives it through this
//! interface; tests plug in in-memory fakes.

use std::sync::Arc;

use vigil_monitor::TextSource;
use vigil_sessions::SessionId;

/// One session's live page. Doubles as the monitor's text source.
pub trait PageHandle: TextSource {
    /// Navigate the page to `address`.
    fn load(&self, address: &str);

    /// Re-fetch the current address.
    fn reload(&self);

    /// Release backend resources. The handle must not be used afterwards.
    fn dispose(&self);
}

/// Factory for page handles, implemented by the rendering backend.
pub trait Renderer: Send + Sync {
    fn create_page(&self, id: &SessionId, address: &str) -> Arc<dyn PageHandle>;
}
