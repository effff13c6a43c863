//! Browser session management, configuration and the page render hook

pub mod config;
pub mod hook;
pub mod session;

pub use config::{ConnectionOptions, LaunchOptions};
pub use hook::{RenderCallback, RenderHook, TabRenderHook};
pub use session::BrowserSession;
