//! API middleware

mod cors;
mod redirect;

pub use cors::cors_layer;
pub use redirect::canonical_host_redirect;
