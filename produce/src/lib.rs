//! # Produce Registry
//!
//! An in-memory, concurrency-safe registry of produce records. Each record
//! has a unique code, a name and a price.
//!
//! ## Features
//!
//! - Validated, normalized field types ([`Code`], [`Name`], [`Price`])
//! - Fixed-point prices stored as whole cents
//! - Insertion-ordered storage with a membership index for duplicate checks
//! - Cheaply cloneable [`Registry`] handle for sharing across request handlers
//!
//! ## Example
//!
//! ```
//! use produce::{Code, Name, Price, Produce, Registry};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = Registry::new();
//!
//! let apple = Produce::new(
//!     Code::parse("YRT6-72AS-K736-L4AR")?,
//!     Name::parse("Apple")?,
//!     "12.12".parse::<Price>()?,
//! );
//! registry.add(apple)?;
//!
//! // Codes are case-insensitive.
//! registry.delete(&Code::parse("yrt6-72as-k736-l4ar")?)?;
//! assert!(registry.is_empty());
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

mod error;
mod record;
mod registry;
pub mod validate;

pub use error::{Field, InvalidField, RegistryError, RegistryResult};
pub use record::{Code, Name, Price, PriceInput, Produce};
pub use registry::Registry;
