//! # veryfi
//!
//! Typed async client for the Veryfi document-extraction API.
//!
//! ## Why this crate?
//!
//! Veryfi runs OCR and invoice-field extraction remotely; the work on this
//! side is getting every request authenticated and every answer typed. Two
//! API generations are in use and they disagree on almost everything: v7 is
//! unsigned, uploads multipart and returns flat documents, while v8 signs
//! each request with HMAC-SHA256, uploads base64 and can return every field
//! wrapped with confidence scores and bounding boxes. Each version gets its
//! own client and its own response types.
//!
//! ## Request Flow
//!
//! ```text
//! ClientV8::get_document(id, opts)
//!  │
//!  ├─ 1. Canonical  opts → ordered key/value list (zero values dropped)
//!  ├─ 2. Sign       HMAC-SHA256("timestamp:<ts>,k:v,...") → base64   (v8 only)
//!  ├─ 3. Send       auth headers, per-attempt timeout, backoff retry
//!  └─ 4. Decode     error body → VeryfiError::Api, else typed Document
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use veryfi::{ClientV8, Options};
//! use veryfi::scheme::DocumentUploadOptions;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let options = Options::builder()
//!         .client_id(std::env::var("VERYFI_CLIENT_ID")?)
//!         .client_secret(std::env::var("VERYFI_CLIENT_SECRET")?)
//!         .username(std::env::var("VERYFI_USERNAME")?)
//!         .api_key(std::env::var("VERYFI_API_KEY")?)
//!         .build()?;
//!     let client = ClientV8::new(options)?;
//!
//!     let doc = client
//!         .process_document_upload(&DocumentUploadOptions {
//!             file_path: "receipt.jpeg".into(),
//!             ..Default::default()
//!         })
//!         .await?;
//!     println!("{}: {} {}", doc.vendor.name, doc.total, doc.currency_code);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `veryfi` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! veryfi = { version = "0.3", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod client;
pub mod config;
pub mod error;
pub mod scheme;
pub mod transport;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use client::{ClientV7, ClientV8};
pub use config::{HttpOptions, Options, OptionsBuilder, RetryOptions, DEFAULT_ENVIRONMENT_URL};
pub use error::VeryfiError;
pub use scheme::{ApiErrorBody, Field, Tag, Tags};
pub use transport::encode::base64_encode_file;
pub use transport::{build_url, ApiVersion};
