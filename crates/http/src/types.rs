//! Request and response bodies of the sale-order API

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use saleorder_core::types::{CurrentUser, UploadInfo};

/// Standard `{success, data}` envelope
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    pub data: T,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_at: Option<String>,
    pub username: String,
    #[serde(default)]
    pub is_admin: bool,
}

impl LoginResponse {
    pub fn user(&self) -> CurrentUser {
        CurrentUser {
            username: self.username.clone(),
            is_admin: self.is_admin,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

// Orders

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderRecord {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub dealer_name: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub order_id: Option<String>,
    #[serde(default)]
    pub report_name: Option<String>,
    #[serde(default)]
    pub generated_at: Option<String>,
    #[serde(default)]
    pub order_type: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
    pub total_pages: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderPage {
    pub orders: Vec<OrderRecord>,
    pub pagination: Pagination,
}

/// Top-level body of `GET /orders/search`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub results: Vec<OrderRecord>,
    #[serde(default)]
    pub count: usize,
}

/// Top-level body of `GET /orders/export`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderExport {
    #[serde(default)]
    pub data: Vec<OrderRecord>,
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub exported_at: Option<String>,
}

/// Filters shared by the user and admin order listings
///
/// Empty fields are left out of the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderFilter {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub dealer_name: Option<String>,
    pub city: Option<String>,
    pub order_id: Option<String>,
    pub username: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    /// Only honoured by the user listing
    pub only_mine: bool,
}

impl OrderFilter {
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page {
            pairs.push(("page".to_string(), page.to_string()));
        }
        if let Some(per_page) = self.per_page {
            pairs.push(("per_page".to_string(), per_page.to_string()));
        }
        let text_fields = [
            ("dealer_name", &self.dealer_name),
            ("city", &self.city),
            ("order_id", &self.order_id),
            ("username", &self.username),
            ("date_from", &self.date_from),
            ("date_to", &self.date_to),
        ];
        for (key, value) in text_fields {
            if let Some(value) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
                pairs.push((key.to_string(), value.to_string()));
            }
        }
        if self.only_mine {
            pairs.push(("only_mine".to_string(), "true".to_string()));
        }
        pairs
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportFilter {
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub only_mine: bool,
}

impl ExportFilter {
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        OrderFilter {
            date_from: self.date_from.clone(),
            date_to: self.date_to.clone(),
            only_mine: self.only_mine,
            ..OrderFilter::default()
        }
        .query_pairs()
    }
}

// Dashboard

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardOverview {
    #[serde(default)]
    pub total_orders: u64,
    #[serde(default)]
    pub user_orders: u64,
    #[serde(default)]
    pub today_orders: u64,
    #[serde(default)]
    pub month_orders: u64,
    #[serde(default)]
    pub issued_ids: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DealerCount {
    #[serde(default)]
    pub dealer_name: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    pub order_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityCount {
    #[serde(default)]
    pub city: Option<String>,
    pub order_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthCount {
    #[serde(default)]
    pub month: Option<String>,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCount {
    #[serde(default)]
    pub username: Option<String>,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStats {
    pub overview: DashboardOverview,
    #[serde(default)]
    pub top_dealers: Vec<DealerCount>,
    #[serde(default)]
    pub top_cities: Vec<CityCount>,
    #[serde(default)]
    pub monthly_orders: Vec<MonthCount>,
    #[serde(default)]
    pub orders_by_user: Vec<UserCount>,
    #[serde(default)]
    pub recent_orders: Vec<OrderRecord>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChartKind {
    #[default]
    Monthly,
    Daily,
    City,
    User,
}

impl ChartKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Daily => "daily",
            Self::City => "city",
            Self::User => "user",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "monthly" => Ok(Self::Monthly),
            "daily" => Ok(Self::Daily),
            "city" => Ok(Self::City),
            "user" => Ok(Self::User),
            other => Err(format!("unknown chart type '{other}'")),
        }
    }
}

/// Top-level body of `GET /dashboard/chart-data`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartData {
    #[serde(default)]
    pub chart_type: String,
    /// `None` where the grouped column was NULL
    #[serde(default)]
    pub labels: Vec<Option<String>>,
    #[serde(default)]
    pub values: Vec<u64>,
}

// Order IDs

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderIdStatus {
    #[serde(default)]
    pub latest_id: Option<String>,
    pub suggested_id: String,
    #[serde(default)]
    pub recent_orders: Vec<OrderRecord>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct IssueOrderId {
    pub order_id: String,
    pub given_to_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dealer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IssuedOrderId {
    pub order_id: String,
    pub given_to_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuedIdRecord {
    #[serde(default)]
    pub order_id: Option<String>,
    #[serde(default)]
    pub given_to_name: Option<String>,
    #[serde(default)]
    pub dealer_name: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub given_by_user: Option<String>,
    #[serde(default)]
    pub given_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuedIdPage {
    pub issued_ids: Vec<IssuedIdRecord>,
    pub pagination: Pagination,
}

// Reports

/// Order details collected for report generation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportDetails {
    pub dealer_name: String,
    pub city: String,
    /// `YYYY-MM-DD`
    pub order_date: Option<String>,
    pub freight_condition: Option<String>,
    /// Reuse an existing order ID instead of allocating a new one
    pub custom_order_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct GenerateReportRequest {
    pub upload_id: String,
    pub dealer_name: String,
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub freight_condition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_order_id: Option<String>,
    pub is_additional_order: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GeneratedReport {
    pub order_id: String,
    pub report_name: String,
}

// Admin

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminStats {
    #[serde(default)]
    pub total_orders: u64,
    #[serde(default)]
    pub today_orders: u64,
    #[serde(default)]
    pub issued_ids: u64,
    #[serde(default)]
    pub active_sessions: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub username: String,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub issued_at: Option<String>,
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default)]
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminOverview {
    pub stats: AdminStats,
    #[serde(default)]
    pub recent_orders: Vec<OrderRecord>,
    #[serde(default)]
    pub sessions: Vec<SessionRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdminUser {
    pub username: String,
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RevokedSession {
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogTail {
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub lines: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_filter_skips_blank_fields() {
        let filter = OrderFilter {
            page: Some(2),
            dealer_name: Some("  ".to_string()),
            city: Some(" Pune ".to_string()),
            only_mine: true,
            ..OrderFilter::default()
        };
        assert_eq!(
            filter.query_pairs(),
            vec![
                ("page".to_string(), "2".to_string()),
                ("city".to_string(), "Pune".to_string()),
                ("only_mine".to_string(), "true".to_string()),
            ]
        );
    }

    #[test]
    fn test_generate_request_omits_unset_fields() {
        let request = GenerateReportRequest {
            upload_id: "U1".to_string(),
            dealer_name: "Acme".to_string(),
            city: "Pune".to_string(),
            order_date: None,
            freight_condition: None,
            custom_order_id: None,
            is_additional_order: false,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("order_date").is_none());
        assert_eq!(value["is_additional_order"], false);
    }

    #[test]
    fn test_grouped_counts_tolerate_null_keys() {
        let stats: DashboardStats = serde_json::from_value(serde_json::json!({
            "overview": {"total_orders": 4, "user_orders": 1, "today_orders": 0, "month_orders": 4, "issued_ids": 2},
            "top_dealers": [{"dealer_name": null, "city": null, "order_count": 2}],
            "top_cities": [{"city": null, "order_count": 3}],
            "monthly_orders": [{"month": null, "count": 1}],
            "orders_by_user": [{"username": null, "count": 4}],
            "recent_orders": [{"order_id": null, "dealer_name": null, "city": null, "username": null, "generated_at": null}]
        }))
        .unwrap();
        assert!(stats.top_cities[0].city.is_none());
        assert_eq!(stats.top_cities[0].order_count, 3);
        assert!(stats.top_dealers[0].dealer_name.is_none());
        assert!(stats.monthly_orders[0].month.is_none());
        assert!(stats.orders_by_user[0].username.is_none());
        assert!(stats.recent_orders[0].order_id.is_none());

        let chart: ChartData = serde_json::from_str(
            r#"{"success":true,"chart_type":"city","labels":["Pune",null],"values":[5,1]}"#,
        )
        .unwrap();
        assert_eq!(chart.labels, vec![Some("Pune".to_string()), None]);
    }

    #[test]
    fn test_order_record_tolerates_missing_columns() {
        let record: OrderRecord =
            serde_json::from_str(r#"{"order_id":"10-26-00001","dealer_name":null}"#).unwrap();
        assert_eq!(record.order_id.as_deref(), Some("10-26-00001"));
        assert!(record.dealer_name.is_none());
        assert!(record.id.is_none());
    }
}
