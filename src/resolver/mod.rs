//! Run-time endpoint resolution.
//!
//! Currently this covers one case: discovering the live address of a
//! rotating GitHub proxy (see [`dynamic`]).

pub mod dynamic;

pub use dynamic::{
    extract_proxy_url, is_valid_proxy_url, substitute, DynamicResolver, ResolveError,
    DYNAMIC_FETCH_TIMEOUT, DYNAMIC_PROXY_NAME, DYNAMIC_PROXY_SOURCE,
};
