//! Kitchen staff and menu management service.
//!
//! Cooks log in, browse and search paginated listings of cooks, dishes, dish
//! types and ingredients, edit them, and toggle which dishes they cook. The
//! crate follows a hexagonal layout:
//!
//! - [`domain`]: value objects, records, ports and the kitchen services
//! - [`inbound`]: the actix-web JSON surface and cookie sessions
//! - [`outbound`]: in-memory and PostgreSQL stores
//! - [`middleware`]: request tracing

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
