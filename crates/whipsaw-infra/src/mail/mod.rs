//! Mail relay implementations - HTTPS relay and console fallback.

mod console;
#[cfg(feature = "mail")]
mod http;

pub use console::ConsoleMailRelay;
#[cfg(feature = "mail")]
pub use http::{DEFAULT_RELAY_URL, HttpMailRelay, HttpRelayConfig};
