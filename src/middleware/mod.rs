//! Request preprocessing shared by the route handlers.

pub mod json_body;

pub use json_body::LenientJson;
