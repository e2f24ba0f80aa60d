//! Security Module
//!
//! Authentication is handled upstream of this service; this module only
//! hardens responses, tags them with a request id and configures CORS.

pub mod middleware;

pub use middleware::{
    REQUEST_ID_HEADER, cors_layer, request_id_middleware, security_headers_middleware,
};
