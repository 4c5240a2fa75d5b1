//! Typed async client for the EpicSevenDB game-data API.
//!
//! # Overview
//! Wraps the API's loosely-structured JSON in typed hero records. A `Client`
//! builds requests relative to a base URL, executes them under a caller's
//! `Context`, classifies the status, and decodes the body.
//!
//! # Design
//! - `Client` is immutable after construction; `with_base_url` returns a new
//!   client sharing the same connection pool.
//! - Every call takes `Option<&Context>`; `None` is rejected before any I/O.
//! - Enumerations whose API names differ from ours (`Attribute`, `Role`,
//!   `Stat`, `Topic`) share one table-driven codec in `codec`.
//! - DTOs in `types` mirror the API schema and default missing fields.
//!
//! ```no_run
//! # async fn run() -> Result<(), e7_core::Error> {
//! use e7_core::{Client, Context};
//!
//! let client = Client::new();
//! let hero = client
//!     .heroes()
//!     .get_by_id(Some(&Context::background()), "aramintha")
//!     .await?;
//! println!("{} ({:?})", hero.name, hero.role);
//! # Ok(())
//! # }
//! ```

pub mod attribute;
pub mod client;
pub mod codec;
pub mod context;
pub mod error;
pub mod heroes;
pub mod http;
pub mod role;
pub mod stat;
pub mod topic;
pub mod types;

pub use attribute::Attribute;
pub use client::{check_response, Client, ClientBuilder, DEFAULT_BASE_URL};
pub use codec::{UnrecognizedValue, ValueKind, WireEnum};
pub use context::Context;
pub use error::{Cancelled, Error};
pub use heroes::{Heroes, HeroesResponse};
pub use http::{Destination, ErrorResponse, Metadata, Request, Response};
pub use role::Role;
pub use stat::Stat;
pub use topic::Topic;
pub use types::{CalculatedState, Hero};
