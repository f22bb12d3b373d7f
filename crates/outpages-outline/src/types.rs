//! Outline API wire types.

use outpages_site::Document;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request body for `documents.list`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DocumentsListRequest {
    /// Collection to list.
    pub collection_id: Uuid,
    /// Page size; 100 is the API maximum.
    pub limit: u32,
}

/// Response envelope for `documents.list`.
#[derive(Debug, Deserialize)]
pub(crate) struct DocumentsListResponse {
    pub data: Vec<Document>,
}

/// Request body for `attachments.redirect`.
#[derive(Debug, Serialize)]
pub(crate) struct AttachmentRedirectRequest {
    pub id: Uuid,
}
