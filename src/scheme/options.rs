//! Request options shared by both API versions.
//!
//! Each type serialises to the JSON body Veryfi expects (zero values omitted)
//! and lists the same fields, in the same order, through
//! [`CanonicalParams`] for signing and query strings.

use crate::transport::canonical::{is_zero, CanonicalMap, CanonicalParams};
use serde::Serialize;
use std::path::PathBuf;

/// Processing parameters shared by upload, base64 and URL submissions.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DocumentSharedOptions {
    #[serde(skip_serializing_if = "is_zero")]
    pub file_name: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub categories: Vec<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub max_pages_to_process: u32,
    #[serde(skip_serializing_if = "is_zero")]
    pub boost_mode: bool,
    #[serde(skip_serializing_if = "is_zero")]
    pub external_id: String,
    #[serde(rename = "async", skip_serializing_if = "is_zero")]
    pub async_processing: bool,
    #[serde(skip_serializing_if = "is_zero")]
    pub confidence_details: bool,
    #[serde(skip_serializing_if = "is_zero")]
    pub bounding_boxes: bool,
}

impl CanonicalParams for DocumentSharedOptions {
    fn encode_into(&self, out: &mut CanonicalMap) {
        out.push("file_name", &self.file_name)
            .push("categories", &self.categories)
            .push("tags", &self.tags)
            .push("max_pages_to_process", &self.max_pages_to_process)
            .push("boost_mode", &self.boost_mode)
            .push("external_id", &self.external_id)
            .push("async", &self.async_processing)
            .push("confidence_details", &self.confidence_details)
            .push("bounding_boxes", &self.bounding_boxes);
    }
}

/// Process a local file. The path is read by the client, never sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentUploadOptions {
    pub file_path: PathBuf,
    pub shared: DocumentSharedOptions,
}

/// Process a document already encoded as base64.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DocumentUploadBase64Options {
    #[serde(skip_serializing_if = "is_zero")]
    pub file_data: String,
    #[serde(flatten)]
    pub shared: DocumentSharedOptions,
}

impl CanonicalParams for DocumentUploadBase64Options {
    fn encode_into(&self, out: &mut CanonicalMap) {
        out.push("file_data", &self.file_data).extend(&self.shared);
    }
}

/// Process a document reachable by URL.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DocumentUrlOptions {
    #[serde(skip_serializing_if = "is_zero")]
    pub file_url: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub file_urls: Vec<String>,
    #[serde(flatten)]
    pub shared: DocumentSharedOptions,
}

impl CanonicalParams for DocumentUrlOptions {
    fn encode_into(&self, out: &mut CanonicalMap) {
        out.push("file_url", &self.file_url)
            .push("file_urls", &self.file_urls)
            .extend(&self.shared);
    }
}

/// Vendor fields accepted by a document update.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VendorUpdateOptions {
    #[serde(skip_serializing_if = "is_zero")]
    pub name: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub address: String,
}

impl VendorUpdateOptions {
    fn is_empty(&self) -> bool {
        self.name.is_empty() && self.address.is_empty()
    }
}

impl CanonicalParams for VendorUpdateOptions {
    fn encode_into(&self, out: &mut CanonicalMap) {
        out.push("name", &self.name).push("address", &self.address);
    }
}

/// Fields of a processed document that can be corrected.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DocumentUpdateOptions {
    #[serde(skip_serializing_if = "is_zero")]
    pub date: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub delivery_date: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub due_date: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub invoice_number: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub order_date: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub category: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub currency_code: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub external_id: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub bill_to_name: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub bill_to_address: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub notes: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub subtotal: f64,
    #[serde(skip_serializing_if = "is_zero")]
    pub tax: f64,
    #[serde(skip_serializing_if = "is_zero")]
    pub tip: f64,
    #[serde(skip_serializing_if = "is_zero")]
    pub total: f64,
    #[serde(skip_serializing_if = "VendorUpdateOptions::is_empty")]
    pub vendor: VendorUpdateOptions,
}

impl CanonicalParams for DocumentUpdateOptions {
    fn encode_into(&self, out: &mut CanonicalMap) {
        out.push("date", &self.date)
            .push("delivery_date", &self.delivery_date)
            .push("due_date", &self.due_date)
            .push("invoice_number", &self.invoice_number)
            .push("order_date", &self.order_date)
            .push("category", &self.category)
            .push("currency_code", &self.currency_code)
            .push("external_id", &self.external_id)
            .push("bill_to_name", &self.bill_to_name)
            .push("bill_to_address", &self.bill_to_address)
            .push("notes", &self.notes)
            .push("subtotal", &self.subtotal)
            .push("tax", &self.tax)
            .push("tip", &self.tip)
            .push("total", &self.total)
            .extend(&self.vendor);
    }
}

/// Query filters for listing documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DocumentSearchOptions {
    #[serde(skip_serializing_if = "is_zero")]
    pub q: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub external_id: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub tag: String,
    #[serde(rename = "created__gt", skip_serializing_if = "is_zero")]
    pub created_gt: String,
    #[serde(rename = "created__gte", skip_serializing_if = "is_zero")]
    pub created_gte: String,
    #[serde(rename = "created__lt", skip_serializing_if = "is_zero")]
    pub created_lt: String,
    #[serde(rename = "created__lte", skip_serializing_if = "is_zero")]
    pub created_lte: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub status: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub device_id: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub owner: String,
    #[serde(rename = "updated__gt", skip_serializing_if = "is_zero")]
    pub updated_gt: String,
    #[serde(rename = "updated__gte", skip_serializing_if = "is_zero")]
    pub updated_gte: String,
    #[serde(rename = "updated__lt", skip_serializing_if = "is_zero")]
    pub updated_lt: String,
    #[serde(rename = "updated__lte", skip_serializing_if = "is_zero")]
    pub updated_lte: String,
    #[serde(rename = "date__gt", skip_serializing_if = "is_zero")]
    pub date_gt: String,
    #[serde(rename = "date__gte", skip_serializing_if = "is_zero")]
    pub date_gte: String,
    #[serde(rename = "date__lt", skip_serializing_if = "is_zero")]
    pub date_lt: String,
    #[serde(rename = "date__lte", skip_serializing_if = "is_zero")]
    pub date_lte: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub page: u32,
    #[serde(skip_serializing_if = "is_zero")]
    pub page_size: u32,
    #[serde(skip_serializing_if = "is_zero")]
    pub track_total_results: bool,
    #[serde(skip_serializing_if = "is_zero")]
    pub confidence_details: bool,
    #[serde(skip_serializing_if = "is_zero")]
    pub bounding_boxes: bool,
}

impl CanonicalParams for DocumentSearchOptions {
    fn encode_into(&self, out: &mut CanonicalMap) {
        out.push("q", &self.q)
            .push("external_id", &self.external_id)
            .push("tag", &self.tag)
            .push("created__gt", &self.created_gt)
            .push("created__gte", &self.created_gte)
            .push("created__lt", &self.created_lt)
            .push("created__lte", &self.created_lte)
            .push("status", &self.status)
            .push("device_id", &self.device_id)
            .push("owner", &self.owner)
            .push("updated__gt", &self.updated_gt)
            .push("updated__gte", &self.updated_gte)
            .push("updated__lt", &self.updated_lt)
            .push("updated__lte", &self.updated_lte)
            .push("date__gt", &self.date_gt)
            .push("date__gte", &self.date_gte)
            .push("date__lt", &self.date_lt)
            .push("date__lte", &self.date_lte)
            .push("page", &self.page)
            .push("page_size", &self.page_size)
            .push("track_total_results", &self.track_total_results)
            .push("confidence_details", &self.confidence_details)
            .push("bounding_boxes", &self.bounding_boxes);
    }
}

/// Query parameters for fetching one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DocumentGetOptions {
    #[serde(skip_serializing_if = "is_zero")]
    pub return_audit_trail: bool,
    #[serde(skip_serializing_if = "is_zero")]
    pub confidence_details: bool,
    #[serde(skip_serializing_if = "is_zero")]
    pub bounding_boxes: bool,
}

impl CanonicalParams for DocumentGetOptions {
    fn encode_into(&self, out: &mut CanonicalMap) {
        out.push("return_audit_trail", &self.return_audit_trail)
            .push("confidence_details", &self.confidence_details)
            .push("bounding_boxes", &self.bounding_boxes);
    }
}

/// Body of a line-item add or update.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LineItemOptions {
    #[serde(skip_serializing_if = "is_zero")]
    pub order: u32,
    #[serde(skip_serializing_if = "is_zero")]
    pub description: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub total: f64,
    #[serde(skip_serializing_if = "is_zero")]
    pub sku: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub category: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub tax: f64,
    #[serde(skip_serializing_if = "is_zero")]
    pub price: f64,
    #[serde(skip_serializing_if = "is_zero")]
    pub unit_of_measure: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub quantity: f64,
    #[serde(skip_serializing_if = "is_zero")]
    pub discount: f64,
    #[serde(skip_serializing_if = "is_zero")]
    pub tax_rate: f64,
    #[serde(skip_serializing_if = "is_zero")]
    pub date: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub section: String,
}

impl CanonicalParams for LineItemOptions {
    fn encode_into(&self, out: &mut CanonicalMap) {
        out.push("order", &self.order)
            .push("description", &self.description)
            .push("total", &self.total)
            .push("sku", &self.sku)
            .push("category", &self.category)
            .push("tax", &self.tax)
            .push("price", &self.price)
            .push("unit_of_measure", &self.unit_of_measure)
            .push("quantity", &self.quantity)
            .push("discount", &self.discount)
            .push("tax_rate", &self.tax_rate)
            .push("date", &self.date)
            .push("section", &self.section);
    }
}

/// Body of a tag add.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TagOptions {
    #[serde(skip_serializing_if = "is_zero")]
    pub name: String,
}

impl CanonicalParams for TagOptions {
    fn encode_into(&self, out: &mut CanonicalMap) {
        out.push("name", &self.name);
    }
}

/// Options that have a confidence-detail mode.
///
/// Detailed operations call their base operation with
/// `opts.with_details()`; nothing else differs on the wire.
pub trait WithDetails: Sized {
    /// Force `confidence_details` and `bounding_boxes` on.
    fn with_details(self) -> Self;
}

impl WithDetails for DocumentSharedOptions {
    fn with_details(mut self) -> Self {
        self.confidence_details = true;
        self.bounding_boxes = true;
        self
    }
}

impl WithDetails for DocumentUploadOptions {
    fn with_details(mut self) -> Self {
        self.shared = self.shared.with_details();
        self
    }
}

impl WithDetails for DocumentUploadBase64Options {
    fn with_details(mut self) -> Self {
        self.shared = self.shared.with_details();
        self
    }
}

impl WithDetails for DocumentUrlOptions {
    fn with_details(mut self) -> Self {
        self.shared = self.shared.with_details();
        self
    }
}

impl WithDetails for DocumentSearchOptions {
    fn with_details(mut self) -> Self {
        self.confidence_details = true;
        self.bounding_boxes = true;
        self
    }
}

impl WithDetails for DocumentGetOptions {
    fn with_details(mut self) -> Self {
        self.confidence_details = true;
        self.bounding_boxes = true;
        self
    }
}
