//! # mealfinder
//!
//! A hash-routed recipe browser over the TheMealDB JSON API.
//!
//! A URL fragment such as `#category/Seafood` is parsed into a [`Route`], dispatched to
//! the matching view handler, and the resulting page lands in the application [`Root`]
//! unless a newer navigation has started in the meantime. Every request goes through a
//! session-wide [`ResponseCache`] keyed by URL.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mealfinder::{App, Config, Renderer, TextRenderer};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let app = App::new(&Config::default())?;
//!     app.navigate("#category/Seafood").outcome().await;
//!     println!("{}", TextRenderer.render(&app.root().screen()));
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod app;
pub mod cache;
pub mod config;
pub mod context;
pub mod http;
pub mod render;
pub mod router;
pub mod view;

// ── Convenience re-exports ────────────────────────────────────────────────────
pub use api::{ApiError, MealDb};
pub use app::{App, AppError};
pub use cache::{CacheStats, ResponseCache};
pub use config::Config;
pub use http::{FetchError, Fetcher, HttpFetcher};
pub use render::{Format, HtmlRenderer, Renderer, TextRenderer};
pub use router::{Dispatch, Outcome, Route, Router, parse_route};
pub use view::{Root, Screen, View, ViewState};
