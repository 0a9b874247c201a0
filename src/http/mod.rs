//! HTTP protocol layer module
//!
//! Response builders, JSON envelopes, CORS headers and asset caching helpers,
//! kept apart from the glossary request handlers.

pub mod cache;
pub mod mime;
pub mod response;

pub use response::{
    apply_cors, apply_server_name, build_304_response, build_404_response, build_405_response,
    build_413_response, build_asset_response, build_health_response, build_html_response,
    build_options_response, json_error, json_message, json_response, strip_body,
};
