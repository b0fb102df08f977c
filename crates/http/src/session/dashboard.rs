use super::Session;
use crate::client::RequestOptions;
use crate::client::error::ClientError;
use crate::types::{ChartData, ChartKind, DashboardStats};

impl Session {
    /// Aggregate counts and top-dealer listings
    pub async fn dashboard_stats(&self) -> Result<DashboardStats, ClientError> {
        self.fetch_data("/dashboard/stats", RequestOptions::get())
            .await
    }

    pub async fn chart_data(&self, kind: ChartKind) -> Result<ChartData, ClientError> {
        let options = RequestOptions::get().query("type", kind);
        self.fetch("/dashboard/chart-data", options).await
    }
}
