// Bulk client import endpoint

use reqwest::multipart::{Form, Part};
use tracing::debug;

use crate::client::PortalClient;
use crate::error::Error;
use crate::models::BulkUploadResponse;

impl PortalClient {
    /// Upload a CSV of client records. The backend inserts rows it can
    /// parse, skips duplicates, and reports per-row errors.
    ///
    /// `POST /api/admin/bulk-upload` (multipart, field name `file`)
    pub async fn bulk_upload(
        &self,
        file_name: &str,
        contents: Vec<u8>,
    ) -> Result<BulkUploadResponse, Error> {
        let url = self.api_url("admin/bulk-upload");
        debug!(file_name, bytes = contents.len(), "bulk uploading clients");

        let part = Part::bytes(contents)
            .file_name(file_name.to_owned())
            .mime_str("text/csv")
            .map_err(Error::Transport)?;
        let form = Form::new().part("file", part);

        self.post_multipart(url, form).await
    }
}
