//! Versioned façades over the transport.
//!
//! [`ClientV8`] targets the current API: signed requests, base64 uploads,
//! and both the plain and the confidence-scored document schema.
//! [`ClientV7`] targets the legacy API: unsigned requests, multipart uploads,
//! and the flat schema. Both map each operation onto one route and one
//! response type; neither holds state besides its configuration.

pub mod v7;
pub mod v8;

pub use v7::ClientV7;
pub use v8::ClientV8;
