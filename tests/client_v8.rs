//! v8 client against a local mock of the Veryfi API.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::path::PathBuf;
use veryfi::scheme::options::{
    DocumentGetOptions, DocumentSearchOptions, DocumentSharedOptions, DocumentUpdateOptions,
    DocumentUploadOptions, DocumentUrlOptions, LineItemOptions, TagOptions, VendorUpdateOptions,
};
use veryfi::scheme::v8::{Document, LineItem, PaymentInfo, TaxLine, Vendor};
use veryfi::transport::canonical::CanonicalParams;
use veryfi::transport::signer::generate_signature;
use veryfi::{ClientV8, Options, VeryfiError};
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const SECRET: &str = "testClientSecret";
const DOCUMENT_ID: i64 = 36966934;

fn testdata(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("testdata")
        .join(name)
}

fn receipt_json() -> String {
    std::fs::read_to_string(testdata("receipt_public.json")).unwrap()
}

fn json_response(status: u16, body: impl Into<String>) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_raw(body.into(), "application/json")
}

fn options(server: &MockServer) -> Options {
    Options::builder()
        .environment_url(server.uri())
        .client_id("testClientID")
        .client_secret(SECRET)
        .username("testUsername")
        .api_key("testAPIKey")
        .retry_count(0)
        .build()
        .unwrap()
}

async fn setup() -> (MockServer, ClientV8) {
    let server = MockServer::start().await;
    let client = ClientV8::new(options(&server)).unwrap();
    (server, client)
}

async fn last_request(server: &MockServer) -> Request {
    server
        .received_requests()
        .await
        .unwrap()
        .pop()
        .expect("at least one request")
}

fn header<'a>(request: &'a Request, name: &str) -> &'a str {
    request
        .headers
        .get(name)
        .unwrap_or_else(|| panic!("missing header {name}"))
        .to_str()
        .unwrap()
}

fn expected_document() -> Document {
    Document {
        id: DOCUMENT_ID,
        created: "2021-06-22 20:11:10".into(),
        updated: "2021-06-22 20:11:11".into(),
        currency_code: "USD".into(),
        date: "2021-06-22 16:11:10".into(),
        img_file_name: "7a0371f1-f695-4f9b-9e2b-da54cdf189fc.jpg".into(),
        invoice_number: "98".into(),
        line_items: vec![LineItem {
            id: 67185481,
            description: "98 Meat Pty Xchz".into(),
            quantity: 1.0,
            total: 90.85,
            kind: "food".into(),
            ..Default::default()
        }],
        ocr_text: "2004-10-31\t8:21 PM\nIN-N-OUT BURGER LAS VEGAS EASTERN\n98 Meat Pty Xchz\t90.85\nTAX 7.50%\t97.66\nAmount Due\t$97.66\nTHANK YOU!\n".into(),
        payment: PaymentInfo {
            card_number: "1234".into(),
            display_name: "Cash".into(),
            kind: "cash".into(),
            ..Default::default()
        },
        reference_number: "VBIJG-6934".into(),
        tax: 97.66,
        tax_lines: vec![TaxLine {
            rate: 7.5,
            total: 97.66,
            ..Default::default()
        }],
        total: 97.66,
        vendor: Vendor {
            name: "In-N-Out Burger".into(),
            raw_name: "In-N-Out Burger".into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

#[tokio::test]
async fn get_upload_and_url_decode_identically() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/v8/partner/documents/36966934"))
        .respond_with(json_response(200, receipt_json()))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v8/partner/documents/"))
        .respond_with(json_response(200, receipt_json()))
        .mount(&server)
        .await;

    let expected = expected_document();

    let got = client
        .get_document(DOCUMENT_ID, &DocumentGetOptions::default())
        .await
        .unwrap();
    assert_eq!(got, expected);

    let uploaded = client
        .process_document_upload(&DocumentUploadOptions {
            file_path: testdata("receipt_public.jpeg"),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(uploaded, expected);

    let by_url = client
        .process_document_url(&DocumentUrlOptions {
            file_url: "https://cdn.example.com/receipt_public.jpeg".into(),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_url, expected);
}

#[tokio::test]
async fn requests_carry_auth_and_a_valid_signature() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/v8/partner/documents/"))
        .respond_with(json_response(200, receipt_json()))
        .mount(&server)
        .await;

    let opts = DocumentUrlOptions {
        file_url: "https://cdn.example.com/receipt.png".into(),
        shared: DocumentSharedOptions {
            tags: vec!["electric".into(), "repair".into()],
            ..Default::default()
        },
        ..Default::default()
    };
    client.process_document_url(&opts).await.unwrap();

    let request = last_request(&server).await;
    assert_eq!(header(&request, "authorization"), "apikey testUsername:testAPIKey");
    assert_eq!(header(&request, "client-id"), "testClientID");
    assert_eq!(header(&request, "content-type"), "application/json");
    assert_eq!(header(&request, "accept"), "application/json");
    assert!(header(&request, "user-agent").starts_with("Rust veryfi/"));

    let timestamp: u64 = header(&request, "x-veryfi-request-timestamp").parse().unwrap();
    let signature = header(&request, "x-veryfi-request-signature");
    assert_eq!(
        signature,
        generate_signature(SECRET, &opts.canonical(), timestamp).unwrap()
    );

    let body: Value = serde_json::from_slice(&request.body).unwrap();
    assert_eq!(
        body,
        json!({
            "file_url": "https://cdn.example.com/receipt.png",
            "tags": ["electric", "repair"]
        })
    );
}

#[tokio::test]
async fn upload_embeds_base64_file() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/v8/partner/documents/"))
        .respond_with(json_response(200, receipt_json()))
        .mount(&server)
        .await;

    client
        .process_document_upload(&DocumentUploadOptions {
            file_path: testdata("receipt_public.jpeg"),
            shared: DocumentSharedOptions {
                external_id: "ext-1".into(),
                ..Default::default()
            },
        })
        .await
        .unwrap();

    let request = last_request(&server).await;
    let body: Value = serde_json::from_slice(&request.body).unwrap();
    let raw = std::fs::read(testdata("receipt_public.jpeg")).unwrap();
    assert_eq!(body["file_data"], STANDARD.encode(raw));
    assert_eq!(body["file_name"], "receipt_public.jpeg");
    assert_eq!(body["external_id"], "ext-1");
    assert!(body.get("confidence_details").is_none());
}

#[tokio::test]
async fn upload_of_missing_file_fails_before_sending() {
    let (server, client) = setup().await;

    let err = client
        .process_document_upload(&DocumentUploadOptions {
            file_path: testdata("does_not_exist.jpeg"),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, VeryfiError::FileRead { .. }));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn detailed_operations_force_both_flags() {
    let (server, client) = setup().await;
    let detailed = json!({
        "id": DOCUMENT_ID,
        "total": {"value": 97.66, "score": 0.94, "ocr_score": 0.99,
                  "bounding_box": [0, 0.61, 0.7, 0.79, 0.72]},
        "vendor": {"name": {"value": "In-N-Out Burger", "score": 0.81}}
    });
    Mock::given(method("GET"))
        .and(path("/api/v8/partner/documents/36966934"))
        .and(query_param("confidence_details", "true"))
        .and(query_param("bounding_boxes", "true"))
        .respond_with(json_response(200, detailed.to_string()))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v8/partner/documents/"))
        .and(body_partial_json(json!({
            "confidence_details": true,
            "bounding_boxes": true
        })))
        .respond_with(json_response(200, detailed.to_string()))
        .mount(&server)
        .await;

    let doc = client
        .get_detailed_document(DOCUMENT_ID, &DocumentGetOptions::default())
        .await
        .unwrap();
    assert_eq!(doc.total.value(), Some(&97.66));
    assert_eq!(doc.total.score, Some(0.94));
    assert_eq!(doc.total.bounding_box.len(), 5);
    assert_eq!(doc.vendor.name.value().map(String::as_str), Some("In-N-Out Burger"));

    let doc = client
        .process_detailed_document_url(&DocumentUrlOptions {
            file_url: "https://cdn.example.com/receipt.png".into(),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(doc.id, DOCUMENT_ID);

    let doc = client
        .process_detailed_document_upload(&DocumentUploadOptions {
            file_path: testdata("receipt_public.jpeg"),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(doc.total.ocr_score, Some(0.99));
}

#[tokio::test]
async fn search_sends_filters_as_query() {
    let (server, client) = setup().await;
    let page = format!(
        r#"{{"documents": [{}], "meta": {{"total_found": 1, "page": 1, "page_size": 50}}}}"#,
        receipt_json()
    );
    Mock::given(method("GET"))
        .and(path("/api/v8/partner/documents/"))
        .and(query_param("q", "burger"))
        .and(query_param("created__gt", "2021-01-01"))
        .respond_with(json_response(200, page))
        .mount(&server)
        .await;

    let found = client
        .search_documents(&DocumentSearchOptions {
            q: "burger".into(),
            created_gt: "2021-01-01".into(),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(found.documents, vec![expected_document()]);
    assert_eq!(found.meta.total_found, Some(1));

    let request = last_request(&server).await;
    let timestamp: u64 = header(&request, "x-veryfi-request-timestamp").parse().unwrap();
    let mut query = veryfi::transport::canonical::CanonicalMap::new();
    query.push("q", "burger").push("created__gt", "2021-01-01");
    assert_eq!(
        header(&request, "x-veryfi-request-signature"),
        generate_signature(SECRET, &query, timestamp).unwrap()
    );
}

#[tokio::test]
async fn update_sends_nested_vendor() {
    let (server, client) = setup().await;
    Mock::given(method("PUT"))
        .and(path("/api/v8/partner/documents/36966934"))
        .and(body_partial_json(json!({
            "notes": "team lunch",
            "vendor": {"name": "In-N-Out Burger"}
        })))
        .respond_with(json_response(200, receipt_json()))
        .mount(&server)
        .await;

    let doc = client
        .update_document(
            DOCUMENT_ID,
            &DocumentUpdateOptions {
                notes: "team lunch".into(),
                vendor: VendorUpdateOptions {
                    name: "In-N-Out Burger".into(),
                    ..Default::default()
                },
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(doc.id, DOCUMENT_ID);
}

#[tokio::test]
async fn http_error_surfaces_status_and_details() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/v8/partner/documents/1"))
        .respond_with(json_response(
            404,
            r#"{"status": "fail", "error": "Not Found", "details": "Document 1 does not exist"}"#,
        ))
        .mount(&server)
        .await;

    let err = client
        .get_document(1, &DocumentGetOptions::default())
        .await
        .unwrap_err();
    match err {
        VeryfiError::Api { status, context } => {
            assert_eq!(status, "404 Not Found");
            assert_eq!(context, "Document 1 does not exist");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn http_error_without_body_still_fails() {
    let (server, client) = setup().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v8/partner/documents/1"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = client.delete_document(1).await.unwrap_err();
    assert_eq!(err.status(), Some("401 Unauthorized"));
    // Not retried.
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn failure_body_with_success_status_is_an_error() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/v8/partner/documents/"))
        .respond_with(json_response(
            200,
            r#"{"status": "fail", "error": "Malformed parameters"}"#,
        ))
        .mount(&server)
        .await;

    let err = client
        .process_document_url(&DocumentUrlOptions::default())
        .await
        .unwrap_err();
    assert!(err.is_api_error());
    assert!(err.to_string().contains("context=Malformed parameters"));
}

#[tokio::test]
async fn delete_accepts_informational_body() {
    let (server, client) = setup().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v8/partner/documents/36966934"))
        .respond_with(json_response(
            200,
            r#"{"status": "ok", "message": "Document has been deleted"}"#,
        ))
        .mount(&server)
        .await;

    client.delete_document(DOCUMENT_ID).await.unwrap();
}

#[tokio::test]
async fn line_item_crud() {
    let (server, client) = setup().await;
    let item = json!({"id": 67185481, "order": 0, "description": "Fries", "total": 3.5});
    Mock::given(method("GET"))
        .and(path("/api/v8/partner/documents/36966934/line-items/"))
        .respond_with(json_response(200, json!({"line_items": [item]}).to_string()))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v8/partner/documents/36966934/line-items/"))
        .and(body_partial_json(json!({"description": "Fries", "total": 3.5})))
        .respond_with(json_response(200, item.to_string()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v8/partner/documents/36966934/line-items/67185481"))
        .respond_with(json_response(200, item.to_string()))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/v8/partner/documents/36966934/line-items/67185481"))
        .respond_with(json_response(200, item.to_string()))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/v8/partner/documents/36966934/line-items/67185481"))
        .respond_with(json_response(200, r#"{"status": "ok"}"#))
        .mount(&server)
        .await;

    let items = client.get_line_items(DOCUMENT_ID).await.unwrap();
    assert_eq!(items.line_items.len(), 1);

    let opts = LineItemOptions {
        description: "Fries".into(),
        total: 3.5,
        ..Default::default()
    };
    let added = client.add_line_item(DOCUMENT_ID, &opts).await.unwrap();
    assert_eq!(added.description, "Fries");

    let one = client.get_line_item(DOCUMENT_ID, 67185481).await.unwrap();
    assert_eq!(one, added);

    let updated = client
        .update_line_item(DOCUMENT_ID, 67185481, &opts)
        .await
        .unwrap();
    assert_eq!(updated.total, 3.5);

    client.delete_line_item(DOCUMENT_ID, 67185481).await.unwrap();
}

#[tokio::test]
async fn tag_routes() {
    let (server, client) = setup().await;
    let tags = r#"{"tags": [{"id": 6673474, "name": "electric"}]}"#;
    Mock::given(method("PUT"))
        .and(path("/api/v8/partner/documents/36966934/tags/"))
        .and(body_partial_json(json!({"name": "electric"})))
        .respond_with(json_response(200, r#"{"id": 6673474, "name": "electric"}"#))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v8/partner/documents/36966934/tags/"))
        .respond_with(json_response(200, tags))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v8/partner/tags/"))
        .respond_with(json_response(200, tags))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/v8/partner/documents/36966934/tags/6673474"))
        .respond_with(json_response(200, r#"{"status": "ok"}"#))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/v8/partner/tags/6673474"))
        .respond_with(json_response(200, r#"{"status": "ok"}"#))
        .mount(&server)
        .await;

    let tag = client
        .add_tag(
            DOCUMENT_ID,
            &TagOptions {
                name: "electric".into(),
            },
        )
        .await
        .unwrap();
    assert_eq!(tag.id, 6673474);

    assert_eq!(client.get_tags(DOCUMENT_ID).await.unwrap().tags, vec![tag.clone()]);
    assert_eq!(client.get_global_tags().await.unwrap().tags, vec![tag]);

    client.delete_tag(DOCUMENT_ID, 6673474).await.unwrap();
    client.delete_global_tag(6673474).await.unwrap();
}
