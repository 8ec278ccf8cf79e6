use crate::config::Options;
use crate::error::VeryfiError;
use crate::scheme::options::{
    DocumentGetOptions, DocumentSearchOptions, DocumentUpdateOptions, DocumentUploadBase64Options,
    DocumentUploadOptions, DocumentUrlOptions, LineItemOptions, TagOptions,
};
use crate::scheme::tag::{Tag, Tags};
use crate::scheme::v7::{Document, Documents, LineItem, LineItems};
use crate::transport::canonical::CanonicalParams;
use crate::transport::encode::{read_file, upload_file_name, MultipartUpload};
use crate::transport::{uri, ApiVersion, Transport};
use tracing::info;

/// Client for the legacy (v7) Veryfi API.
///
/// Requests are authenticated by headers only and never signed. Uploads go
/// out as `multipart/form-data`; there is no confidence-scored schema.
#[derive(Debug, Clone)]
pub struct ClientV7 {
    transport: Transport,
}

impl ClientV7 {
    pub fn new(options: Options) -> Result<Self, VeryfiError> {
        Ok(Self {
            transport: Transport::new(options, ApiVersion::V7)?,
        })
    }

    pub fn with_http_client(options: Options, http: reqwest::Client) -> Result<Self, VeryfiError> {
        Ok(Self {
            transport: Transport::with_http_client(options, http, ApiVersion::V7)?,
        })
    }

    pub fn config(&self) -> &Options {
        self.transport.options()
    }

    /// Send a local file as a multipart `file` part.
    pub async fn process_document_upload(
        &self,
        opts: &DocumentUploadOptions,
    ) -> Result<Document, VeryfiError> {
        let bytes = read_file(&opts.file_path).await?;
        let file_name = upload_file_name(&opts.shared.file_name, &opts.file_path);
        info!("Processing upload {} ({} bytes)", opts.file_path.display(), bytes.len());
        let upload = MultipartUpload {
            file_name,
            bytes,
            fields: opts.shared.canonical(),
        };
        self.transport.post_multipart(uri::DOCUMENTS, &upload).await
    }

    pub async fn process_document_upload_base64(
        &self,
        opts: &DocumentUploadBase64Options,
    ) -> Result<Document, VeryfiError> {
        self.transport.post(uri::DOCUMENTS, opts).await
    }

    pub async fn process_document_url(
        &self,
        opts: &DocumentUrlOptions,
    ) -> Result<Document, VeryfiError> {
        info!("Processing URL {}", opts.file_url);
        self.transport.post(uri::DOCUMENTS, opts).await
    }

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
        self.transport.get(&uri::document(document_id), opts).await
    }

    /// Documents matching the filters, as a bare list.
    pub async fn search_documents(
        &self,
        opts: &DocumentSearchOptions,
    ) -> Result<Documents, VeryfiError> {
        self.transport.get(uri::DOCUMENTS, opts).await
    }

    pub async fn delete_document(&self, document_id: i64) -> Result<(), VeryfiError> {
        self.transport.delete(&uri::document(document_id)).await
    }

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

    pub async fn add_tag(&self, document_id: i64, opts: &TagOptions) -> Result<Tag, VeryfiError> {
        self.transport.put(&uri::document_tags(document_id), opts).await
    }

    pub async fn get_tags(&self, document_id: i64) -> Result<Tags, VeryfiError> {
        self.transport.get(&uri::document_tags(document_id), &()).await
    }

    pub async fn get_global_tags(&self) -> Result<Tags, VeryfiError> {
        self.transport.get(uri::GLOBAL_TAGS, &()).await
    }

    pub async fn delete_tag(&self, document_id: i64, tag_id: i64) -> Result<(), VeryfiError> {
        self.transport
            .delete(&uri::document_tag(document_id, tag_id))
            .await
    }

    pub async fn delete_global_tag(&self, tag_id: i64) -> Result<(), VeryfiError> {
        self.transport.delete(&uri::global_tag(tag_id)).await
    }
}
