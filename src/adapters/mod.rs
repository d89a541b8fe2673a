// Adapters layer: concrete implementations for external systems (Telegram, HTTP server, Lambda).

pub mod telegram;

#[cfg(feature = "server")]
pub mod http;

#[cfg(feature = "lambda")]
pub mod lambda;
