//! Order history and order-ID issuance

use super::Session;
use crate::client::RequestOptions;
use crate::client::error::ClientError;
use crate::types::{
    ExportFilter, IssueOrderId, IssuedIdPage, IssuedOrderId, OrderExport, OrderFilter, OrderIdStatus,
    OrderPage, OrderRecord, SearchResults,
};
use crate::validation;

fn with_query(mut options: RequestOptions, pairs: Vec<(String, String)>) -> RequestOptions {
    options.query.extend(pairs);
    options
}

impl Session {
    /// Paginated, filtered order listing
    pub async fn orders(&self, filter: &OrderFilter) -> Result<OrderPage, ClientError> {
        let options = with_query(RequestOptions::get(), filter.query_pairs());
        self.fetch_data("/orders", options).await
    }

    pub async fn order(&self, id: i64) -> Result<OrderRecord, ClientError> {
        self.fetch_data(&format!("/orders/{id}"), RequestOptions::get())
            .await
    }

    /// Search dealers, cities, order IDs and users
    ///
    /// Queries shorter than two characters are rejected without a request.
    pub async fn search_orders(&self, query: &str) -> Result<SearchResults, ClientError> {
        let query = validation::search_query(query)?;
        let options = RequestOptions::get().query("q", query);
        self.fetch("/orders/search", options).await
    }

    pub async fn export_orders(&self, filter: &ExportFilter) -> Result<OrderExport, ClientError> {
        let options = with_query(RequestOptions::get(), filter.query_pairs());
        self.fetch("/orders/export", options).await
    }

    /// Latest issued order ID and the suggested next one
    pub async fn order_id_status(&self) -> Result<OrderIdStatus, ClientError> {
        self.fetch_data("/order-ids/status", RequestOptions::get())
            .await
    }

    /// Record an order ID as handed out to someone
    pub async fn issue_order_id(&self, request: &IssueOrderId) -> Result<IssuedOrderId, ClientError> {
        const MISSING: &str = "order_id and given_to_name are required";
        let normalized = IssueOrderId {
            order_id: validation::required(&request.order_id, MISSING)?.to_string(),
            given_to_name: validation::required(&request.given_to_name, MISSING)?.to_string(),
            dealer_name: request.dealer_name.clone(),
            city: request.city.clone(),
        };

        let options = RequestOptions::post().json(&normalized)?;
        self.fetch_data("/issued-ids", options).await
    }

    pub async fn issued_ids(&self, page: u32, per_page: u32) -> Result<IssuedIdPage, ClientError> {
        let options = RequestOptions::get()
            .query("page", page)
            .query("per_page", per_page);
        self.fetch_data("/issued-ids", options).await
    }
}
