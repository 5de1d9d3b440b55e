//! # HTTP Message Module
//!
//! In-memory request and response values that flow through the application
//! pipeline. They carry no transport concerns: parsing, TLS and sockets live
//! outside this crate.
//!
//! Both types are immutable by convention. Every `with_*` method returns a new
//! value and leaves the receiver untouched, so a handler can never observe a
//! change made by another handler to "its" request.
//!
//! - [`Request`] - method, path, headers, request id and a routing attribute map
//! - [`Response`] - status, headers and a JSON body

mod request;
mod response;

pub use request::{attr, HeaderVec, Request, RequestId, MAX_INLINE_HEADERS};
pub use response::Response;
