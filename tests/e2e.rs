//! End-to-end tests against the live Veryfi API.
//!
//! These tests create, change and delete real documents. They are gated
//! behind the `VERYFI_E2E` environment variable so they do not run in CI
//! unless explicitly requested, and need the usual credentials:
//!
//!   VERYFI_E2E=1 VERYFI_CLIENT_ID=... VERYFI_CLIENT_SECRET=... \
//!   VERYFI_USERNAME=... VERYFI_API_KEY=... \
//!   cargo test --test e2e -- --nocapture --test-threads=1

use std::path::PathBuf;
use std::time::Duration;
use veryfi::scheme::options::{
    DocumentGetOptions, DocumentSearchOptions, DocumentSharedOptions, DocumentUpdateOptions,
    DocumentUploadOptions, DocumentUrlOptions, LineItemOptions, TagOptions,
};
use veryfi::{ClientV8, Options, VeryfiError};

const INVOICE_URL: &str = "https://templates.invoicehome.com/invoice-template-us-neat-750px.png";

/// Skip this test unless VERYFI_E2E is set; otherwise build a client from
/// the environment.
macro_rules! e2e_client_or_skip {
    () => {{
        if std::env::var("VERYFI_E2E").is_err() {
            println!("SKIP: set VERYFI_E2E=1 and VERYFI_* credentials to run e2e tests");
            return;
        }
        live_client()
    }};
}

fn env(name: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| panic!("{name} must be set for e2e tests"))
}

fn live_client() -> ClientV8 {
    let mut builder = Options::builder()
        .client_id(env("VERYFI_CLIENT_ID"))
        .client_secret(env("VERYFI_CLIENT_SECRET"))
        .username(env("VERYFI_USERNAME"))
        .api_key(env("VERYFI_API_KEY"))
        .timeout(Duration::from_secs(60))
        .retry_count(1);
    if let Ok(host) = std::env::var("VERYFI_ENVIRONMENT_URL") {
        builder = builder.environment_url(host);
    }
    ClientV8::new(builder.build().expect("valid options")).expect("client")
}

fn testdata(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/testdata")
        .join(name)
}

#[tokio::test]
async fn test_document_lifecycle() {
    let client = e2e_client_or_skip!();

    let doc = client
        .process_document_url(&DocumentUrlOptions {
            file_url: INVOICE_URL.into(),
            shared: DocumentSharedOptions {
                tags: vec!["e2e".into()],
                ..Default::default()
            },
            ..Default::default()
        })
        .await
        .expect("process by URL");
    assert!(doc.id > 0);
    println!("Processed #{}: {} {}", doc.id, doc.total, doc.currency_code);

    let fetched = client
        .get_document(doc.id, &DocumentGetOptions::default())
        .await
        .expect("get");
    assert_eq!(fetched.id, doc.id);

    let updated = client
        .update_document(
            doc.id,
            &DocumentUpdateOptions {
                notes: "updated by e2e".into(),
                ..Default::default()
            },
        )
        .await
        .expect("update");
    assert_eq!(updated.notes, "updated by e2e");

    client.delete_document(doc.id).await.expect("delete");

    let err = client
        .get_document(doc.id, &DocumentGetOptions::default())
        .await
        .expect_err("deleted document must be gone");
    assert!(err.is_api_error(), "got: {err}");
}

#[tokio::test]
async fn test_detailed_upload() {
    let client = e2e_client_or_skip!();
    let path = testdata("receipt_public.jpeg");

    let result = client
        .process_detailed_document_upload(&DocumentUploadOptions {
            file_path: path,
            ..Default::default()
        })
        .await;

    // The bundled fixture is not a real receipt, so Veryfi may refuse it.
    match result {
        Ok(doc) => {
            println!("Detailed #{}: total {:?}", doc.id, doc.total);
            client.delete_document(doc.id).await.expect("cleanup");
        }
        Err(VeryfiError::Api { status, context }) => {
            println!("Rejected as expected: {status} {context}");
        }
        Err(other) => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_line_items_and_tags() {
    let client = e2e_client_or_skip!();

    let doc = client
        .process_document_url(&DocumentUrlOptions {
            file_url: INVOICE_URL.into(),
            ..Default::default()
        })
        .await
        .expect("process by URL");

    let item = client
        .add_line_item(
            doc.id,
            &LineItemOptions {
                description: "e2e item".into(),
                total: 1.5,
                order: 99,
                ..Default::default()
            },
        )
        .await
        .expect("add line item");
    let items = client.get_line_items(doc.id).await.expect("list");
    assert!(items.line_items.iter().any(|i| i.id == item.id));
    client
        .delete_line_item(doc.id, item.id)
        .await
        .expect("delete line item");

    let tag = client
        .add_tag(doc.id, &TagOptions { name: "e2e".into() })
        .await
        .expect("add tag");
    let tags = client.get_tags(doc.id).await.expect("list tags");
    assert!(tags.tags.iter().any(|t| t.id == tag.id));
    client.delete_tag(doc.id, tag.id).await.expect("delete tag");

    client.delete_document(doc.id).await.expect("cleanup");
}

#[tokio::test]
async fn test_search() {
    let client = e2e_client_or_skip!();

    let page = client
        .search_documents(&DocumentSearchOptions {
            page_size: 5,
            ..Default::default()
        })
        .await
        .expect("search");
    assert!(page.documents.len() <= 5);
    println!("Found {} document(s) on first page", page.documents.len());
}
