//! Request middleware.
//!
//! Purpose: request lifecycle concerns shared by every route, currently
//! trace identifiers and request spans.

pub mod trace;

pub use trace::Trace;
