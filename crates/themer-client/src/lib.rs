#![forbid(unsafe_code)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::module_name_repetitions)]

//! # Themer Client
//!
//! An HTTP implementation of [`themer::ThemeGenerator`] and
//! [`themer::LogoGenerator`] built on `reqwest`.
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use themer::{GenerationMode, ThemeStore};
//! use themer_client::HttpThemeClient;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpThemeClient::builder("http://localhost:3000")
//!     .timeout(Duration::from_secs(30))
//!     .build()?;
//!
//! let mut store = ThemeStore::new();
//! store
//!     .generate_theme(&client, "calm ocean palette", false, GenerationMode::Create)
//!     .await?;
//! println!("{}", store.last_generation_text());
//! # Ok(())
//! # }
//! ```
//!
//! Failures map onto [`themer::GenerateError`]: error statuses become
//! `Upstream` (or `Configuration` for missing credentials), unreadable
//! bodies become `InvalidResponse`, and connection failures or timeouts
//! become `Transport`.

mod client;

pub use client::{
    ClientError, DEFAULT_TIMEOUT, HttpThemeClient, HttpThemeClientBuilder, LOGO_PATH, THEME_PATH,
};
