/// Error type collaborators return. Boxed so windows, worlds and renderers
/// can surface their own error types unchanged.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that end the engine loop.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("window initialization failed: {0}")]
    WindowInit(#[source] BoxError),
    #[error("renderer initialization failed: {0}")]
    RendererInit(#[source] BoxError),
    #[error("world initialization failed: {0}")]
    WorldInit(#[source] BoxError),
    #[error("input handling failed: {0}")]
    Input(#[source] BoxError),
    #[error("logic update failed: {0}")]
    Update(#[source] BoxError),
    #[error("engine loop panicked: {0}")]
    Panicked(String),
    #[error("failed to spawn engine thread: {0}")]
    Spawn(#[source] std::io::Error),
}

/// Best-effort text of a panic payload.
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "<non-string panic>".to_string()
    }
}
