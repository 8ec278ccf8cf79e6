//! Response schema of the legacy v7 API.
//!
//! v7 documents are flat: payment and bill-to information sit at the top
//! level, and there is no confidence-scored variant.

use serde::{Deserialize, Serialize};

/// A processed document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
    pub abn_number: String,
    pub account_number: String,
    pub bill_to_address: String,
    pub bill_to_name: String,
    pub bill_to_vat_number: String,
    pub card_number: String,
    pub category: String,
    pub created: String,
    pub currency_code: String,
    pub date: String,
    pub delivery_date: String,
    pub discount: f64,
    pub document_reference_number: String,
    pub due_date: String,
    pub external_id: String,
    pub id: i64,
    pub img_file_name: String,
    pub img_thumbnail_url: String,
    pub img_url: String,
    pub insurance: String,
    pub invoice_number: String,
    pub is_duplicate: i64,
    pub line_items: Vec<LineItem>,
    pub ocr_text: String,
    pub order_date: String,
    pub payment_display_name: String,
    pub payment_terms: String,
    pub payment_type: String,
    pub phone_number: String,
    pub purchase_order_number: String,
    pub rounding: f64,
    pub service_end_date: String,
    pub service_start_date: String,
    pub ship_date: String,
    pub ship_to_address: String,
    pub ship_to_name: String,
    pub shipping: f64,
    pub store_number: String,
    pub subtotal: f64,
    pub tax: f64,
    pub tax_lines: Vec<TaxLine>,
    pub tip: f64,
    pub total: f64,
    pub total_weight: String,
    pub tracking_number: String,
    pub updated: String,
    pub vat_number: String,
    pub vendor: Vendor,
    pub vendor_account_number: String,
    pub vendor_bank_name: String,
    pub vendor_bank_number: String,
    pub vendor_bank_swift: String,
    pub vendor_iban: String,
}

/// A line item of a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineItem {
    pub date: String,
    pub description: String,
    pub discount: f64,
    pub id: i64,
    pub order: i64,
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
}

/// A tax line of a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxLine {
    pub name: String,
    pub order: i64,
    pub rate: f64,
    pub total: f64,
}

/// Vendor of a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vendor {
    pub address: String,
    pub category: String,
    pub email: String,
    pub fax_number: String,
    pub name: String,
    pub phone_number: String,
    pub raw_name: String,
    pub vendor_logo: String,
    pub vendor_reg_number: String,
    pub vendor_type: String,
    pub web: String,
}

/// Search results: v7 answers with a bare list.
pub type Documents = Vec<Document>;

/// Line items of a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineItems {
    pub line_items: Vec<LineItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_payment_fields() {
        let doc: Document = serde_json::from_str(
            r#"{"id": 35239377, "payment_type": "visa", "card_number": "1234",
                "bill_to_name": "Hoanh An", "vendor": {"name": "Hoanh An", "vendor_type": "Food"}}"#,
        )
        .unwrap();
        assert_eq!(doc.payment_type, "visa");
        assert_eq!(doc.card_number, "1234");
        assert_eq!(doc.bill_to_name, "Hoanh An");
        assert_eq!(doc.vendor.vendor_type, "Food");
    }
}
