//! Hotel booking backend.
//!
//! - [`domain`]: entities, the booking state machine, and driving/driven ports.
//! - [`inbound`]: the Actix HTTP adapter.
//! - [`outbound`]: in-memory and PostgreSQL store adapters.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
