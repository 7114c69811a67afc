// Error type for the setup path and the window.
// Every variant states *where* things went wrong. The drawing core never fails.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Asking the OS for the global cursor position failed
    #[error("Cursor query error: {0}")]
    CursorQuery(String),
    /// Enumerating displays failed
    #[error("Display query error: {0}")]
    DisplayQuery(String),
    /// No display bounds contain the cursor
    #[error("mouse not on any display (cursor at {x},{y})")]
    NoDisplayUnderCursor { x: i32, y: i32 },
    /// Grabbing the screenshot failed
    #[error("Screenshot capture error: {0}")]
    Capture(String),
    /// Creating the window failed
    #[error("Window init error: {0}")]
    WindowInit(String),
    /// Updating the window buffer failed
    #[error("Window update error: {0}")]
    WindowUpdate(String),
}
