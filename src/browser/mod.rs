//! Browser session management
//!
//! The crawler treats the browser as a scoped capability: it is launched once per run,
//! drives one tab, and is released when the [`BrowserSession`] is dropped.

pub mod config;
pub mod session;

pub use config::LaunchOptions;
pub use session::BrowserSession;
