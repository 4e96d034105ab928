//! Typed wrappers over [`BetfairClient::call`].
//!
//! Each wrapper serializes its request struct into the same validated
//! dispatch path as untyped parameters, then decodes the body into the
//! matching response type. The untyped body stays available through
//! [`BetfairClient::last_response`].

use crate::client::BetfairClient;
use crate::dto::*;
use crate::error::Result;
use crate::operation::Operation;
use crate::transport::Transport;
use serde_json::{json, Value};

impl<T: Transport> BetfairClient<T> {
    // ========================================================================
    // Market Operations
    // ========================================================================

    pub async fn list_competitions(
        &mut self,
        request: &ListCompetitionsRequest,
    ) -> Result<Vec<CompetitionResult>> {
        self.invoke(Operation::ListCompetitions, request).await
    }

    pub async fn list_countries(
        &mut self,
        request: &ListCountriesRequest,
    ) -> Result<Vec<CountryCodeResult>> {
        self.invoke(Operation::ListCountries, request).await
    }

    pub async fn list_events(&mut self, request: &ListEventsRequest) -> Result<Vec<EventResult>> {
        self.invoke(Operation::ListEvents, request).await
    }

    pub async fn list_event_types(
        &mut self,
        request: &ListEventTypesRequest,
    ) -> Result<Vec<EventTypeResult>> {
        self.invoke(Operation::ListEventTypes, request).await
    }

    pub async fn list_market_types(
        &mut self,
        request: &ListMarketTypesRequest,
    ) -> Result<Vec<MarketTypeResult>> {
        self.invoke(Operation::ListMarketTypes, request).await
    }

    pub async fn list_venues(&mut self, request: &ListVenuesRequest) -> Result<Vec<VenueResult>> {
        self.invoke(Operation::ListVenues, request).await
    }

    pub async fn list_time_ranges(
        &mut self,
        request: &ListTimeRangesRequest,
    ) -> Result<Vec<TimeRangeResult>> {
        self.invoke(Operation::ListTimeRanges, request).await
    }

    pub async fn list_market_catalogue(
        &mut self,
        request: &ListMarketCatalogueRequest,
    ) -> Result<Vec<MarketCatalogue>> {
        self.invoke(Operation::ListMarketCatalogue, request).await
    }

    pub async fn list_market_book(
        &mut self,
        request: &ListMarketBookRequest,
    ) -> Result<Vec<MarketBook>> {
        self.invoke(Operation::ListMarketBook, request).await
    }

    /// Book of a single runner; the exchange still answers with a list of
    /// market books.
    pub async fn list_runner_book(
        &mut self,
        request: &ListRunnerBookRequest,
    ) -> Result<Vec<MarketBook>> {
        self.invoke(Operation::ListRunnerBook, request).await
    }

    pub async fn list_market_profit_and_loss(
        &mut self,
        request: &ListMarketProfitAndLossRequest,
    ) -> Result<Vec<MarketProfitAndLoss>> {
        self.invoke(Operation::ListMarketProfitAndLoss, request).await
    }

    // ========================================================================
    // Order Operations
    // ========================================================================

    /// Fails with `"<status> : <errorCode>"` when the report is not a success;
    /// the report itself is left in `last_response`.
    pub async fn place_orders(
        &mut self,
        request: &PlaceOrdersRequest,
    ) -> Result<PlaceExecutionReport> {
        self.invoke(Operation::PlaceOrders, request).await
    }

    pub async fn cancel_orders(
        &mut self,
        request: &CancelOrdersRequest,
    ) -> Result<CancelExecutionReport> {
        self.invoke(Operation::CancelOrders, request).await
    }

    pub async fn replace_orders(
        &mut self,
        request: &ReplaceOrdersRequest,
    ) -> Result<ReplaceExecutionReport> {
        self.invoke(Operation::ReplaceOrders, request).await
    }

    pub async fn update_orders(
        &mut self,
        request: &UpdateOrdersRequest,
    ) -> Result<UpdateExecutionReport> {
        self.invoke(Operation::UpdateOrders, request).await
    }

    pub async fn list_current_orders(
        &mut self,
        request: &ListCurrentOrdersRequest,
    ) -> Result<CurrentOrderSummaryReport> {
        self.invoke(Operation::ListCurrentOrders, request).await
    }

    pub async fn list_cleared_orders(
        &mut self,
        request: &ListClearedOrdersRequest,
    ) -> Result<ClearedOrderSummaryReport> {
        self.invoke(Operation::ListClearedOrders, request).await
    }

    // ========================================================================
    // Account Operations
    // ========================================================================

    pub async fn create_developer_app_keys(
        &mut self,
        request: &CreateDeveloperAppKeysRequest,
    ) -> Result<DeveloperApp> {
        self.invoke(Operation::CreateDeveloperAppKeys, request).await
    }

    pub async fn get_developer_app_keys(&mut self) -> Result<Vec<DeveloperApp>> {
        self.invoke(Operation::GetDeveloperAppKeys, &json!({})).await
    }

    pub async fn get_account_details(&mut self) -> Result<AccountDetailsResponse> {
        self.invoke(Operation::GetAccountDetails, &json!({})).await
    }

    pub async fn get_account_funds(
        &mut self,
        request: &GetAccountFundsRequest,
    ) -> Result<AccountFundsResponse> {
        self.invoke(Operation::GetAccountFunds, request).await
    }

    pub async fn get_account_statement(
        &mut self,
        request: &GetAccountStatementRequest,
    ) -> Result<AccountStatementReport> {
        self.invoke(Operation::GetAccountStatement, request).await
    }

    pub async fn list_currency_rates(
        &mut self,
        request: &ListCurrencyRatesRequest,
    ) -> Result<Vec<CurrencyRate>> {
        self.invoke(Operation::ListCurrencyRates, request).await
    }

    // ========================================================================
    // Heartbeat, race status and navigation
    // ========================================================================

    pub async fn heartbeat(&mut self, request: &HeartbeatRequest) -> Result<HeartbeatReport> {
        self.invoke(Operation::Heartbeat, request).await
    }

    pub async fn list_race_details(
        &mut self,
        request: &ListRaceDetailsRequest,
    ) -> Result<Vec<RaceDetails>> {
        self.invoke(Operation::ListRaceDetails, request).await
    }

    /// The full navigation tree. It is large and loosely shaped, so it is
    /// returned undecoded.
    pub async fn navigation_menu(&mut self) -> Result<Value> {
        self.call(Operation::NavigationMenu, json!({})).await
    }
}
