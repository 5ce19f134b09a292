use async_trait::async_trait;
use std::fmt::Debug;

use super::GatewayError;
use crate::datamodel::{AggregationInfo, MetricOption};

pub type GatewayResult<T> = std::result::Result<T, GatewayError>;

/// Discovery query listing the resource groups of the subscription.
pub const RESOURCE_GROUPS_QUERY: &str = "?api-version=2017-06-01";

/// Lookups the monitoring API offers for each level of the selection chain.
///
/// Implementations own transport and authentication. Option order is kept as
/// the API returned it.
#[async_trait]
pub trait MetricsGateway: Send + Sync + Debug {
    /// Discovery query. Resource groups are listed with the api-version query.
    async fn metric_find_query(&self, query: &str) -> GatewayResult<Vec<MetricOption>>;

    async fn metric_definitions(&self, resource_group: &str) -> GatewayResult<Vec<MetricOption>>;

    async fn resource_names(
        &self,
        resource_group: &str,
        metric_definition: &str,
    ) -> GatewayResult<Vec<MetricOption>>;

    async fn metric_names(
        &self,
        resource_group: &str,
        metric_definition: &str,
        resource_name: &str,
    ) -> GatewayResult<Vec<MetricOption>>;

    async fn aggregations(
        &self,
        resource_group: &str,
        metric_definition: &str,
        resource_name: &str,
        metric_name: &str,
    ) -> GatewayResult<AggregationInfo>;
}
