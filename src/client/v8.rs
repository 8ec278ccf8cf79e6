use crate::config::Options;
use crate::error::VeryfiError;
use crate::scheme::options::{
    DocumentGetOptions, DocumentSearchOptions, DocumentUpdateOptions, DocumentUploadBase64Options,
    DocumentUploadOptions, DocumentUrlOptions, LineItemOptions, TagOptions, WithDetails,
};
use crate::scheme::tag::{Tag, Tags};
use crate::scheme::v8::{
    DetailedDocument, DetailedDocuments, Document, Documents, LineItem, LineItems,
};
use crate::transport::encode::{base64_encode_file, upload_file_name};
use crate::transport::{uri, ApiVersion, Transport};
use serde::de::DeserializeOwned;
use tracing::info;

/// Client for the current (v8) Veryfi API.
///
/// Every request is signed with the client secret. Operations named
/// `*_detailed_*` return the confidence-scored schema; they run the same
/// request as their plain counterpart with confidence details and bounding
/// boxes switched on.
///
/// # Example
/// ```rust,no_run
/// use veryfi::{ClientV8, Options};
/// use veryfi::scheme::DocumentUrlOptions;
///
/// # async fn run() -> Result<(), veryfi::VeryfiError> {
/// let client = ClientV8::new(
///     Options::builder()
///         .client_id("CLIENT_ID")
///         .client_secret("CLIENT_SECRET")
///         .username("USERNAME")
///         .api_key("API_KEY")
///         .build()?,
/// )?;
/// let doc = client
///     .process_document_url(&DocumentUrlOptions {
///         file_url: "https://example.com/receipt.png".into(),
///         ..Default::default()
///     })
///     .await?;
/// println!("{} {} {}", doc.id, doc.total, doc.currency_code);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ClientV8 {
    transport: Transport,
}

impl ClientV8 {
    /// Build a client. Fails when a required credential is missing.
    pub fn new(options: Options) -> Result<Self, VeryfiError> {
        Ok(Self {
            transport: Transport::new(options, ApiVersion::V8)?,
        })
    }

    /// Build a client on top of a caller-configured `reqwest::Client`.
    pub fn with_http_client(options: Options, http: reqwest::Client) -> Result<Self, VeryfiError> {
        Ok(Self {
            transport: Transport::with_http_client(options, http, ApiVersion::V8)?,
        })
    }

    pub fn config(&self) -> &Options {
        self.transport.options()
    }

    // ── Documents ─────────────────────────────────────────────────────────

    /// Read a local file, base64-encode it and process it.
    pub async fn process_document_upload(
        &self,
        opts: &DocumentUploadOptions,
    ) -> Result<Document, VeryfiError> {
        self.upload_as(opts).await
    }

    /// [`process_document_upload`](Self::process_document_upload) with
    /// confidence details and bounding boxes.
    pub async fn process_detailed_document_upload(
        &self,
        opts: &DocumentUploadOptions,
    ) -> Result<DetailedDocument, VeryfiError> {
        self.upload_as(&opts.clone().with_details()).await
    }

    /// Process a document the caller already encoded.
    pub async fn process_document_upload_base64(
        &self,
        opts: &DocumentUploadBase64Options,
    ) -> Result<Document, VeryfiError> {
        info!("Processing base64 document ({} chars)", opts.file_data.len());
        self.transport.post(uri::DOCUMENTS, opts).await
    }

    /// Process a document Veryfi downloads from `file_url` / `file_urls`.
    pub async fn process_document_url(
        &self,
        opts: &DocumentUrlOptions,
    ) -> Result<Document, VeryfiError> {
        self.url_as(opts).await
    }

    /// [`process_document_url`](Self::process_document_url) with confidence
    /// details and bounding boxes.
    pub async fn process_detailed_document_url(
        &self,
        opts: &DocumentUrlOptions,
    ) -> Result<DetailedDocument, VeryfiError> {
        self.url_as(&opts.clone().with_details()).await
    }

    /// Correct fields of a processed document; returns its new state.
    pub async fn update_document(
        &self,
        document_id: i64,
        opts: &DocumentUpdateOptions,
    ) -> Result<Document, VeryfiError> {
        self.transport.put(&uri::document(document_id), opts).await
    }

    pub async fn get_document(
        &self,
        document_id: i64,
        opts: &DocumentGetOptions,
    ) -> Result<Document, VeryfiError> {
        self.get_as(document_id, opts).await
    }

    pub async fn get_detailed_document(
        &self,
        document_id: i64,
        opts: &DocumentGetOptions,
    ) -> Result<DetailedDocument, VeryfiError> {
        self.get_as(document_id, &opts.clone().with_details()).await
    }

    /// One page of documents matching the filters.
    pub async fn search_documents(
        &self,
        opts: &DocumentSearchOptions,
    ) -> Result<Documents, VeryfiError> {
        self.search_as(opts).await
    }

    pub async fn search_detailed_documents(
        &self,
        opts: &DocumentSearchOptions,
    ) -> Result<DetailedDocuments, VeryfiError> {
        self.search_as(&opts.clone().with_details()).await
    }

    pub async fn delete_document(&self, document_id: i64) -> Result<(), VeryfiError> {
        self.transport.delete(&uri::document(document_id)).await
    }

    // ── Line items ────────────────────────────────────────────────────────

    pub async fn get_line_items(&self, document_id: i64) -> Result<LineItems, VeryfiError> {
        self.transport.get(&uri::line_items(document_id), &()).await
    }

    pub async fn add_line_item(
        &self,
        document_id: i64,
        opts: &LineItemOptions,
    ) -> Result<LineItem, VeryfiError> {
        self.transport.post(&uri::line_items(document_id), opts).await
    }

    pub async fn get_line_item(
        &self,
        document_id: i64,
        line_item_id: i64,
    ) -> Result<LineItem, VeryfiError> {
        self.transport
            .get(&uri::line_item(document_id, line_item_id), &())
            .await
    }

    pub async fn update_line_item(
        &self,
        document_id: i64,
        line_item_id: i64,
        opts: &LineItemOptions,
    ) -> Result<LineItem, VeryfiError> {
        self.transport
            .put(&uri::line_item(document_id, line_item_id), opts)
            .await
    }

    pub async fn delete_line_item(
        &self,
        document_id: i64,
        line_item_id: i64,
    ) -> Result<(), VeryfiError> {
        self.transport
            .delete(&uri::line_item(document_id, line_item_id))
            .await
    }

    // ── Tags ──────────────────────────────────────────────────────────────

    /// Attach a tag to a document, creating it if needed.
    pub async fn add_tag(&self, document_id: i64, opts: &TagOptions) -> Result<Tag, VeryfiError> {
        self.transport.put(&uri::document_tags(document_id), opts).await
    }

    pub async fn get_tags(&self, document_id: i64) -> Result<Tags, VeryfiError> {
        self.transport.get(&uri::document_tags(document_id), &()).await
    }

    /// Every tag of the account.
    pub async fn get_global_tags(&self) -> Result<Tags, VeryfiError> {
        self.transport.get(uri::GLOBAL_TAGS, &()).await
    }

    /// Detach a tag from a document.
    pub async fn delete_tag(&self, document_id: i64, tag_id: i64) -> Result<(), VeryfiError> {
        self.transport
            .delete(&uri::document_tag(document_id, tag_id))
            .await
    }

    /// Delete a tag from the account and every document carrying it.
    pub async fn delete_global_tag(&self, tag_id: i64) -> Result<(), VeryfiError> {
        self.transport.delete(&uri::global_tag(tag_id)).await
    }

    // ── Shared request paths ──────────────────────────────────────────────

    async fn upload_as<T: DeserializeOwned>(
        &self,
        opts: &DocumentUploadOptions,
    ) -> Result<T, VeryfiError> {
        let file_data = base64_encode_file(&opts.file_path).await?;
        let mut shared = opts.shared.clone();
        shared.file_name = upload_file_name(&shared.file_name, &opts.file_path);
        info!("Processing upload {}", opts.file_path.display());
        let payload = DocumentUploadBase64Options { file_data, shared };
        self.transport.post(uri::DOCUMENTS, &payload).await
    }

    async fn url_as<T: DeserializeOwned>(&self, opts: &DocumentUrlOptions) -> Result<T, VeryfiError> {
        info!(
            "Processing URL {}",
            if opts.file_url.is_empty() {
                opts.file_urls.join(", ")
            } else {
                opts.file_url.clone()
            }
        );
        self.transport.post(uri::DOCUMENTS, opts).await
    }

    async fn get_as<T: DeserializeOwned>(
        &self,
        document_id: i64,
        opts: &DocumentGetOptions,
    ) -> Result<T, VeryfiError> {
        self.transport.get(&uri::document(document_id), opts).await
    }

    async fn search_as<T: DeserializeOwned>(
        &self,
        opts: &DocumentSearchOptions,
    ) -> Result<T, VeryfiError> {
        self.transport.get(uri::DOCUMENTS, opts).await
    }
}
