//! # `confab-openai` – OpenAI-compatible streaming backend
//!
//! Implements [`confab_core::ChatStreamProvider`] over HTTP:
//!
//! | Module        | What it provides                                               |
//! |---------------|----------------------------------------------------------------|
//! | [`api`]       | Wire-format structs for `POST {base_url}/chat/completions`     |
//! | [`sse`]       | The Server-Sent-Events decoder (bytes ▶ [`confab_core::StreamEvent`]) |
//! | `client`      | [`ChatClient`] – reqwest transport with bearer auth            |
//! | `config`      | [`ClientConfig`] + builder with environment loading            |
//! | `error`       | [`ApiError`], converted into `confab_core::ChatError`          |
//!
//! The backend is deliberately dumb: no retries, no caching, no session
//! state. Every call re-sends the full conversation and yields a lazy,
//! forward-only event stream.

mod client;
mod config;
mod provider;

pub mod api;
pub mod error;
pub mod sse;

pub use client::ChatClient;
pub use config::{
    ClientConfig, ClientConfigBuilder, DEFAULT_MODEL, ENV_API_KEY, ENV_BASE_URL, ENV_MODEL,
};
pub use error::ApiError;
