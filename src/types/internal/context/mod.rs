pub mod request_context;
pub mod request_id;
pub mod request_source;

pub use {
    request_context::{ACCESS_TOKEN_COOKIE, RequestContext},
    request_id::RequestId,
    request_source::RequestSource,
};
