//! API Module
//!
//! HTTP handlers and routing for the page cache REST API.
//!
//! # Endpoints
//! - `GET /page?url=` - Fetch a page, counting every request
//! - `GET /page/tracked?url=` - Fetch a page, counting refetches only
//! - `GET /count?url=` - Read a URL's request counter
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
