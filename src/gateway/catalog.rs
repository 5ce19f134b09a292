//! In-memory gateway answering lookups from a fixed catalog.
//!
//! The catalog mirrors the selection chain: resource groups hold metric
//! namespaces, namespaces hold resources, resources hold metrics, and each
//! metric carries its aggregations. Entries keep insertion order, so option
//! lists come back in the order the catalog lists them.
//!
//! ```json
//! {
//!   "resourceGroups": [{
//!     "name": "nodeapp",
//!     "namespaces": [{
//!       "name": "Microsoft.Compute/virtualMachines",
//!       "resources": [{
//!         "name": "vm1",
//!         "metrics": [{
//!           "name": "Percentage CPU",
//!           "primaryAggType": "Average",
//!           "supportAggOptions": ["Average", "Total"]
//!         }]
//!       }]
//!     }]
//!   }]
//! }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{GatewayError, GatewayResult, MetricsGateway, RESOURCE_GROUPS_QUERY};
use crate::datamodel::{AggregationInfo, MetricOption};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    #[serde(default)]
    pub resource_groups: Vec<CatalogResourceGroup>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogResourceGroup {
    pub name: String,
    #[serde(default)]
    pub namespaces: Vec<CatalogNamespace>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogNamespace {
    pub name: String,
    #[serde(default)]
    pub resources: Vec<CatalogResource>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogResource {
    pub name: String,
    #[serde(default)]
    pub metrics: Vec<CatalogMetric>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogMetric {
    pub name: String,
    #[serde(flatten)]
    pub aggregations: AggregationInfo,
}

trait Named {
    fn name(&self) -> &str;
    fn empty(name: &str) -> Self;
}

macro_rules! impl_named {
    ($ty:ty, $children:ident) => {
        impl Named for $ty {
            fn name(&self) -> &str {
                &self.name
            }

            fn empty(name: &str) -> Self {
                Self {
                    name: name.to_string(),
                    $children: Vec::new(),
                }
            }
        }
    };
}

impl_named!(CatalogResourceGroup, namespaces);
impl_named!(CatalogNamespace, resources);
impl_named!(CatalogResource, metrics);

fn find_or_push<'a, T: Named>(items: &'a mut Vec<T>, name: &str) -> &'a mut T {
    let index = match items.iter().position(|item| item.name() == name) {
        Some(index) => index,
        None => {
            items.push(T::empty(name));
            items.len() - 1
        }
    };
    &mut items[index]
}

fn find<'a, T: Named>(items: &'a [T], kind: &str, name: &str) -> GatewayResult<&'a T> {
    items
        .iter()
        .find(|item| item.name() == name)
        .ok_or_else(|| GatewayError::not_found(kind, name))
}

fn options<'a, T: Named + 'a>(items: impl IntoIterator<Item = &'a T>) -> Vec<MetricOption> {
    items
        .into_iter()
        .map(|item| MetricOption::named(item.name()))
        .collect()
}

impl Catalog {
    /// Adds (or replaces) one metric, creating the path to it as needed.
    pub fn with_metric(
        mut self,
        resource_group: &str,
        metric_definition: &str,
        resource_name: &str,
        metric_name: &str,
        aggregations: AggregationInfo,
    ) -> Self {
        let group = find_or_push(&mut self.resource_groups, resource_group);
        let namespace = find_or_push(&mut group.namespaces, metric_definition);
        let resource = find_or_push(&mut namespace.resources, resource_name);
        match resource.metrics.iter_mut().find(|m| m.name == metric_name) {
            Some(metric) => metric.aggregations = aggregations,
            None => resource.metrics.push(CatalogMetric {
                name: metric_name.to_string(),
                aggregations,
            }),
        }
        self
    }

    fn namespace(
        &self,
        resource_group: &str,
        metric_definition: &str,
    ) -> GatewayResult<&CatalogNamespace> {
        let group = find(&self.resource_groups, "Resource group", resource_group)?;
        find(&group.namespaces, "Metric definition", metric_definition)
    }

    fn resource(
        &self,
        resource_group: &str,
        metric_definition: &str,
        resource_name: &str,
    ) -> GatewayResult<&CatalogResource> {
        let namespace = self.namespace(resource_group, metric_definition)?;
        find(&namespace.resources, "Resource", resource_name)
    }
}

#[derive(Debug, Clone, Default)]
pub struct CatalogGateway {
    catalog: Catalog,
}

impl CatalogGateway {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    pub fn from_json_str(json: &str) -> GatewayResult<Self> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    pub async fn from_json_file(path: impl AsRef<Path>) -> GatewayResult<Self> {
        let json = tokio::fs::read_to_string(path).await?;
        Self::from_json_str(&json)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

#[async_trait]
impl MetricsGateway for CatalogGateway {
    async fn metric_find_query(&self, query: &str) -> GatewayResult<Vec<MetricOption>> {
        if query != RESOURCE_GROUPS_QUERY {
            return Err(GatewayError::UnsupportedQuery(query.to_string()));
        }
        Ok(options(&self.catalog.resource_groups))
    }

    async fn metric_definitions(&self, resource_group: &str) -> GatewayResult<Vec<MetricOption>> {
        let group = find(&self.catalog.resource_groups, "Resource group", resource_group)?;
        Ok(options(&group.namespaces))
    }

    async fn resource_names(
        &self,
        resource_group: &str,
        metric_definition: &str,
    ) -> GatewayResult<Vec<MetricOption>> {
        let namespace = self.catalog.namespace(resource_group, metric_definition)?;
        Ok(options(&namespace.resources))
    }

    async fn metric_names(
        &self,
        resource_group: &str,
        metric_definition: &str,
        resource_name: &str,
    ) -> GatewayResult<Vec<MetricOption>> {
        let resource = self
            .catalog
            .resource(resource_group, metric_definition, resource_name)?;
        Ok(resource
            .metrics
            .iter()
            .map(|metric| MetricOption::named(metric.name.as_str()))
            .collect())
    }

    async fn aggregations(
        &self,
        resource_group: &str,
        metric_definition: &str,
        resource_name: &str,
        metric_name: &str,
    ) -> GatewayResult<AggregationInfo> {
        let resource = self
            .catalog
            .resource(resource_group, metric_definition, resource_name)?;
        resource
            .metrics
            .iter()
            .find(|metric| metric.name == metric_name)
            .map(|metric| metric.aggregations.clone())
            .ok_or_else(|| GatewayError::not_found("Metric", metric_name))
    }
}
