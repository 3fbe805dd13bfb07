//! Analytics retrieval

use crate::client::{ApiClient, RequestOptions};
use crate::error::ApiResult;
use crate::models::{AnalyticsOverview, AnalyticsPeriod, LinkAnalytics};

impl ApiClient {
    /// Account-wide summary
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn analytics_overview(&self) -> ApiResult<AnalyticsOverview> {
        self.call(&self.endpoints().analytics_overview(), RequestOptions::get())
            .await
    }

    /// Daily clicks and referrers for one link over `period`
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn link_analytics(
        &self,
        id: i64,
        period: AnalyticsPeriod,
    ) -> ApiResult<LinkAnalytics> {
        self.call(
            &self.endpoints().link_analytics(id),
            RequestOptions::get().with_query("period", period.as_param()),
        )
        .await
    }
}
