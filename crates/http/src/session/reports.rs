//! Spreadsheet upload and report generation
//!
//! Uploading stores a [`WorkflowDraft`] for the chosen workflow; generating
//! a report consumes it and clears the slot once the server has produced the
//! report.

use super::Session;
use crate::client::RequestOptions;
use crate::client::error::ClientError;
use crate::types::{ApiResponse, GenerateReportRequest, GeneratedReport, ReportDetails, UploadInfo};
use crate::validation;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use saleorder_core::{WorkflowDraft, WorkflowKind};
use std::path::Path;
use tracing::{info, warn};

fn non_blank(value: Option<&String>) -> Option<String> {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl Session {
    /// Upload a spreadsheet and remember it as the pending draft of `kind`
    pub async fn upload_spreadsheet(
        &self,
        kind: WorkflowKind,
        path: &Path,
    ) -> Result<WorkflowDraft, ClientError> {
        let filename = validation::spreadsheet(path)?.to_string();
        let content = tokio::fs::read(path).await?;

        let form = Form::new().part("file", Part::bytes(content).file_name(filename));
        let body = self.upload_form("/uploads", form).await?;
        let envelope: ApiResponse<UploadInfo> = serde_json::from_value(body)?;

        let draft = WorkflowDraft::new(kind, envelope.data);
        self.drafts().save(&draft)?;
        info!(kind = %kind, upload_id = %draft.upload.upload_id, "Spreadsheet uploaded");
        Ok(draft)
    }

    /// Generate the report for the pending draft of `kind`
    ///
    /// The draft is cleared only after the server reports success, so a
    /// failed attempt can be retried with corrected details.
    pub async fn generate_report(
        &self,
        kind: WorkflowKind,
        details: &ReportDetails,
    ) -> Result<GeneratedReport, ClientError> {
        const MISSING: &str = "dealer_name and city are required";

        let draft = self.drafts().load(kind)?.ok_or_else(|| {
            ClientError::Validation(format!(
                "No pending {kind} upload. Upload a spreadsheet first"
            ))
        })?;

        let dealer_name = validation::required(&details.dealer_name, MISSING)?.to_string();
        let city = validation::required(&details.city, MISSING)?.to_string();
        let order_date = non_blank(details.order_date.as_ref())
            .map(|date| validation::iso_date(&date).map(str::to_string))
            .transpose()?;

        let request = GenerateReportRequest {
            upload_id: draft.upload.upload_id,
            dealer_name,
            city,
            order_date,
            freight_condition: non_blank(details.freight_condition.as_ref()),
            custom_order_id: non_blank(details.custom_order_id.as_ref()),
            is_additional_order: kind.is_additional(),
        };

        let report: GeneratedReport = self
            .fetch_data("/reports", RequestOptions::post().json(&request)?)
            .await?;

        if let Err(e) = self.drafts().clear(kind) {
            warn!(kind = %kind, "Failed to clear consumed draft: {e}");
        }
        info!(order_id = %report.order_id, report = %report.report_name, "Report generated");
        Ok(report)
    }

    /// Fetch a generated report
    pub async fn download_report(&self, report_name: &str) -> Result<Bytes, ClientError> {
        let name = validation::path_segment(report_name, "report_name")?;
        self.download(&format!("/reports/{}", urlencoding::encode(name)))
            .await
    }
}
