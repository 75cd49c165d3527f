//! Accessibility settings backend library.
//!
//! Layout follows the hexagonal layering: `domain` holds the model, service,
//! and ports; `inbound` and `outbound` hold the adapters; `client` models the
//! browser-resident half of the subsystem.

pub mod client;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
