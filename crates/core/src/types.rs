use serde::{Deserialize, Serialize};

/// Identity of the signed-in user as reported by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub username: String,
    #[serde(default)]
    pub is_admin: bool,
}

/// A spreadsheet accepted by the server, awaiting report generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadInfo {
    pub upload_id: String,
    pub filename: String,
    #[serde(default)]
    pub size_bytes: Option<u64>,
    #[serde(default)]
    pub uploaded_at: Option<String>,
}
