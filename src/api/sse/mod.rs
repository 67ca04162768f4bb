//! Server-sent event handlers

pub mod slugs;
