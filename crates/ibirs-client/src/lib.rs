//! Protocol adapter for the IBFS report platform's XML-over-HTTP API.
//!
//! The platform exposes one dispatcher URL; the `IBIRS_action` query
//! parameter selects the operation and every response is a small XML
//! document rooted at `ibfsrpc`. This crate covers the client side of that
//! contract:
//!
//! ```text
//! sign_on ──────────► Session (user metadata + CSRF token)
//! resource_items ───► Vec<ResourceItem>       folder browsing
//! content ──────────► String                  raw resource text
//! describe_fex ─────► ParameterSchema         report inputs
//! run_url / run_report                        execution
//! ```
//!
//! `ParameterSchema` is the hand-off point to the form synthesizer in
//! `ibirs-form`; everything else here is session plumbing around it.

pub mod client;
pub mod config;
pub mod describe;
pub mod error;
pub mod resources;
pub mod session;
mod xml;

pub use client::{IbfsClient, NULL_ARGS, SERVICE, SUCCESS_CODE};
pub use config::ClientConfig;
pub use describe::{ParameterDescriptor, ParameterKind, ParameterOption, ParameterSchema};
pub use error::ClientError;
pub use resources::ResourceItem;
pub use session::{CsrfToken, Session};
