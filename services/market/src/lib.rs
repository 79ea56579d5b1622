//! # Produce Market API
//!
//! An HTTP front end for the [`produce`] registry, built on axum.
//!
//! ## Routes
//!
//! - `POST /add` (or `POST /produce`): add a record from a JSON body such as
//!   `{"name": "apple", "code": "YRT6-72AS-K736-L4AR", "price": "12.12"}`
//! - `DELETE /delete?code=...` (or `DELETE /produce?code=...`): remove a record
//! - `GET /fetch` (or `GET /produce`): list all records in insertion order
//!
//! ## Example
//!
//! ```no_run
//! use market::MarketBuilder;
//! use produce::Registry;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = Registry::new();
//! let app = MarketBuilder::new().registry(registry.clone()).build();
//!
//! // Serve `app` with axum or any tower-compatible server
//! # Ok(())
//! # }
//! ```

mod api;
mod config;
mod entries;
mod error;

pub use api::MarketBuilder;
pub use config::{ConfigError, MarketConfig};
pub use error::{MarketError, MarketResult};
