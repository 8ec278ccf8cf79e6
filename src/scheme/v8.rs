//! Response schema of the v8 API.
//!
//! Two families live here. The plain family ([`Document`], [`LineItem`], …)
//! carries one value per field. The detailed family ([`DetailedDocument`],
//! [`DetailedLineItem`], …) is what Veryfi returns when confidence details
//! and bounding boxes are requested: every extracted value is a
//! [`Field`]. Identifiers, ordering and timestamps are never scored.

use crate::scheme::field::Field;
use serde::{Deserialize, Serialize};

/// A processed document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
    pub id: i64,
    pub external_id: String,
    pub created: String,
    pub updated: String,
    pub img_file_name: String,
    pub img_thumbnail_url: String,
    pub img_url: String,
    pub pdf_url: String,
    pub is_duplicate: bool,
    pub account_number: String,
    pub bill_to: BillTo,
    pub category: String,
    pub currency_code: String,
    pub date: String,
    pub delivery_date: String,
    pub due_date: String,
    pub discount: f64,
    pub insurance: f64,
    pub invoice_number: String,
    pub line_items: Vec<LineItem>,
    pub notes: String,
    pub ocr_text: String,
    pub order_date: String,
    pub payment: PaymentInfo,
    pub purchase_order_number: String,
    pub reference_number: String,
    pub rounding: f64,
    pub service_end_date: String,
    pub service_start_date: String,
    pub ship_date: String,
    pub ship_to: ShipTo,
    pub shipping: f64,
    pub store_number: String,
    pub subtotal: f64,
    pub tax: f64,
    pub tax_lines: Vec<TaxLine>,
    pub tip: f64,
    pub total: f64,
    pub total_weight: String,
    pub tracking_number: String,
    pub vendor: Vendor,
}

/// Payment information of a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentInfo {
    pub card_number: String,
    pub display_name: String,
    pub terms: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Bill-to party of a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BillTo {
    pub name: String,
    pub address: String,
    pub vat_number: String,
}

/// Ship-to party of a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipTo {
    pub name: String,
    pub address: String,
}

/// Vendor of a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vendor {
    pub name: String,
    pub raw_name: String,
    pub address: String,
    pub category: String,
    pub email: String,
    pub fax_number: String,
    pub phone_number: String,
    pub logo: String,
    pub reg_number: String,
    pub vat_number: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub web: String,
    pub abn_number: String,
    pub account_number: String,
    pub bank_name: String,
    pub bank_number: String,
    pub bank_swift: String,
    pub iban: String,
}

/// A line item of a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineItem {
    pub id: i64,
    pub order: i64,
    pub date: String,
    pub description: String,
    pub discount: f64,
    pub price: f64,
    pub quantity: f64,
    pub reference: String,
    pub section: String,
    pub sku: String,
    pub tax: f64,
    pub tax_rate: f64,
    pub total: f64,
    #[serde(rename = "type")]
    pub kind: String,
    pub unit_of_measure: String,
    pub category: String,
}

/// A tax line of a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxLine {
    pub order: i64,
    pub name: String,
    pub rate: f64,
    pub total: f64,
    pub base: f64,
}

/// One page of search results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Documents {
    pub documents: Vec<Document>,
    pub meta: SearchMeta,
}

/// Paging information of a search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchMeta {
    pub total_found: Option<i64>,
    pub page: i64,
    pub page_size: i64,
}

/// Line items of a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineItems {
    pub line_items: Vec<LineItem>,
}

// ── Detailed (confidence-scored) family ──────────────────────────────────

/// A processed document with confidence details and bounding boxes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetailedDocument {
    pub id: i64,
    pub external_id: String,
    pub created: String,
    pub updated: String,
    pub img_file_name: String,
    pub img_thumbnail_url: String,
    pub img_url: String,
    pub pdf_url: String,
    pub is_duplicate: bool,
    pub ocr_text: String,
    pub account_number: Field<String>,
    pub bill_to: DetailedBillTo,
    pub category: Field<String>,
    pub currency_code: Field<String>,
    pub date: Field<String>,
    pub delivery_date: Field<String>,
    pub due_date: Field<String>,
    pub discount: Field<f64>,
    pub insurance: Field<f64>,
    pub invoice_number: Field<String>,
    pub line_items: Vec<DetailedLineItem>,
    pub order_date: Field<String>,
    pub payment: DetailedPaymentInfo,
    pub purchase_order_number: Field<String>,
    pub reference_number: String,
    pub rounding: Field<f64>,
    pub service_end_date: Field<String>,
    pub service_start_date: Field<String>,
    pub ship_date: Field<String>,
    pub ship_to: DetailedShipTo,
    pub shipping: Field<f64>,
    pub store_number: Field<String>,
    pub subtotal: Field<f64>,
    pub tax: Field<f64>,
    pub tax_lines: Vec<DetailedTaxLine>,
    pub tip: Field<f64>,
    pub total: Field<f64>,
    pub total_weight: Field<String>,
    pub tracking_number: Field<String>,
    pub vendor: DetailedVendor,
}

/// Scored payment information.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetailedPaymentInfo {
    pub card_number: Field<String>,
    pub display_name: Field<String>,
    pub terms: Field<String>,
    #[serde(rename = "type")]
    pub kind: Field<String>,
}

/// Scored bill-to party.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetailedBillTo {
    pub name: Field<String>,
    pub address: Field<String>,
    pub vat_number: Field<String>,
}

/// Scored ship-to party.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetailedShipTo {
    pub name: Field<String>,
    pub address: Field<String>,
}

/// Scored vendor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetailedVendor {
    pub name: Field<String>,
    pub raw_name: Field<String>,
    pub address: Field<String>,
    pub category: Field<String>,
    pub email: Field<String>,
    pub fax_number: Field<String>,
    pub phone_number: Field<String>,
    pub logo: String,
    pub reg_number: Field<String>,
    pub vat_number: Field<String>,
    #[serde(rename = "type")]
    pub kind: Field<String>,
    pub web: Field<String>,
    pub abn_number: Field<String>,
    pub account_number: Field<String>,
    pub bank_name: Field<String>,
    pub bank_number: Field<String>,
    pub bank_swift: Field<String>,
    pub iban: Field<String>,
}

/// Scored line item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetailedLineItem {
    pub id: i64,
    pub order: i64,
    pub date: Field<String>,
    pub description: Field<String>,
    pub discount: Field<f64>,
    pub price: Field<f64>,
    pub quantity: Field<f64>,
    pub reference: Field<String>,
    pub section: Field<String>,
    pub sku: Field<String>,
    pub tax: Field<f64>,
    pub tax_rate: Field<f64>,
    pub total: Field<f64>,
    #[serde(rename = "type")]
    pub kind: Field<String>,
    pub unit_of_measure: Field<String>,
    pub category: Field<String>,
}

/// Scored tax line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetailedTaxLine {
    pub order: i64,
    pub name: Field<String>,
    pub rate: Field<f64>,
    pub total: Field<f64>,
    pub base: Field<f64>,
}

/// One page of detailed search results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetailedDocuments {
    pub documents: Vec<DetailedDocument>,
    pub meta: SearchMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_default() {
        let doc: Document = serde_json::from_str(
            r#"{"id": 1, "vendor": {"name": "In-N-Out Burger"}, "payment": {"type": "cash"}}"#,
        )
        .unwrap();
        assert_eq!(doc.id, 1);
        assert_eq!(doc.vendor.name, "In-N-Out Burger");
        assert_eq!(doc.payment.kind, "cash");
        assert!(doc.line_items.is_empty());
    }

    #[test]
    fn detailed_document_mixes_scored_and_plain() {
        let doc: DetailedDocument = serde_json::from_str(
            r#"{
                "id": 36966934,
                "total": {"value": 97.66, "score": 0.94, "ocr_score": 0.99,
                          "bounding_box": [0, 0.6, 0.7, 0.8, 0.72]},
                "currency_code": "USD",
                "vendor": {"name": {"value": "In-N-Out Burger", "score": 0.8}},
                "line_items": [{"id": 67185481, "order": 0,
                                "description": {"value": "98 Meat Pty Xchz", "score": 0.9},
                                "total": {"value": 90.85}}]
            }"#,
        )
        .unwrap();
        assert_eq!(doc.id, 36966934);
        assert_eq!(doc.total.value(), Some(&97.66));
        assert_eq!(doc.total.score, Some(0.94));
        assert_eq!(doc.currency_code.value().map(String::as_str), Some("USD"));
        assert_eq!(doc.currency_code.score, None);
        assert_eq!(doc.vendor.name.score, Some(0.8));
        assert_eq!(doc.line_items[0].total.value(), Some(&90.85));
        assert_eq!(doc.tip.value(), None);
    }
}
