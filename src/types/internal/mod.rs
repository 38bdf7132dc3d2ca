// Internal types - never serialized onto the API surface directly
pub mod auth;
pub mod context;
pub mod order;
