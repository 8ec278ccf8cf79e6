//! Request and response shapes of the Veryfi API.
//!
//! The two API versions return incompatible documents, so each has its own
//! type family instead of one type that tries to satisfy both:
//!
//! ```text
//! options  ── request bodies / query filters, shared by v7 and v8
//! v7       ── flat Document, LineItem, TaxLine, Vendor
//! v8       ── Document (plain) + DetailedDocument (Field<T> everywhere)
//! field    ── Field<T>: value + score + ocr_score + bounding data
//! tag      ── Tag, Tags (same on both versions)
//! error    ── ApiErrorBody, the failure shape
//! ```

pub mod error;
pub mod field;
pub mod options;
pub mod tag;
pub mod v7;
pub mod v8;

pub use error::ApiErrorBody;
pub use field::Field;
pub use options::{
    DocumentGetOptions, DocumentSearchOptions, DocumentSharedOptions, DocumentUpdateOptions,
    DocumentUploadBase64Options, DocumentUploadOptions, DocumentUrlOptions, LineItemOptions,
    TagOptions, VendorUpdateOptions, WithDetails,
};
pub use tag::{Tag, Tags};
