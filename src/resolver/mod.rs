//! Dependent option resolution for the metric query editor.
//!
//! Each dropdown of the editor maps to one lookup on the [`MetricsGateway`],
//! scoped by the values chosen above it. A lookup whose scope is incomplete is
//! never sent: the getter returns `None` before any request is built, which
//! the editor renders as a disabled dropdown. Only the aggregation lookup
//! writes back into the query target.

use futures::future::BoxFuture;
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};
use tracing::{Level, event};

pub mod error;
pub mod target_handle;

pub use error::ResolverError;
pub use target_handle::QueryTargetHandle;

use crate::config::{self, AzMonConfig};
use crate::datamodel::{AzureMonitorQuery, MetricOption, QueryTarget, Selection, SelectionLevel};
use crate::gateway::{GatewayError, GatewayResult, MetricsGateway, RESOURCE_GROUPS_QUERY};

pub type OptionsFuture = BoxFuture<'static, GatewayResult<Vec<MetricOption>>>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolverOptions {
    /// Drop an aggregation response when a newer lookup started while it was in
    /// flight, or when the target no longer holds the selections it was sent for.
    pub discard_superseded: bool,
}

impl ResolverOptions {
    pub fn from_config(config: &AzMonConfig) -> Self {
        Self {
            discard_superseded: config.discard_superseded,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SelectionResolver {
    gateway: Arc<dyn MetricsGateway>,
    target: QueryTargetHandle,
    options: ResolverOptions,
    // Bumped by every aggregation lookup and every selection change.
    generation: Arc<AtomicU64>,
}

fn log_failure(operation: &'static str) -> impl FnOnce(&GatewayError) {
    move |err: &GatewayError| {
        event!(Level::WARN, operation, error = %err, "Gateway lookup failed")
    }
}

/// The four selections an aggregation lookup was sent for.
#[derive(Debug, Clone, PartialEq, Eq)]
struct AggregationScope {
    resource_group: String,
    metric_definition: String,
    resource_name: String,
    metric_name: String,
}

impl AggregationScope {
    fn read(query: &AzureMonitorQuery) -> Result<Self, SelectionLevel> {
        Ok(Self {
            resource_group: query.chosen(SelectionLevel::ResourceGroup)?.to_string(),
            metric_definition: query.chosen(SelectionLevel::MetricDefinition)?.to_string(),
            resource_name: query.chosen(SelectionLevel::ResourceName)?.to_string(),
            metric_name: query.chosen(SelectionLevel::MetricName)?.to_string(),
        })
    }

    fn matches(&self, query: &AzureMonitorQuery) -> bool {
        Self::read(query).is_ok_and(|live| live == *self)
    }
}

impl SelectionResolver {
    pub fn new(gateway: Arc<dyn MetricsGateway>, target: QueryTargetHandle) -> Self {
        Self {
            gateway,
            target,
            options: ResolverOptions::default(),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Resolver over a fresh target, with defaults and options taken from the
    /// process configuration. Loads it first if needed.
    pub fn from_config(gateway: Arc<dyn MetricsGateway>) -> anyhow::Result<Self> {
        config::load_configuration()?;
        let config = config::get()?;
        let target = QueryTarget::from_config(&config)?;
        let options = ResolverOptions::from_config(&config);
        Ok(Self::new(gateway, QueryTargetHandle::new(target)).with_options(options))
    }

    pub fn with_options(mut self, options: ResolverOptions) -> Self {
        self.options = options;
        self
    }

    pub fn target(&self) -> &QueryTargetHandle {
        &self.target
    }

    /// Reads the lookup scope of `level` from the live target, or `None` if a
    /// prerequisite is unset.
    fn gate<T>(
        &self,
        level: SelectionLevel,
        scope: impl FnOnce(&AzureMonitorQuery) -> Result<T, SelectionLevel>,
    ) -> Option<T> {
        match self.target.read(|t| scope(&t.azure_monitor)) {
            Ok(scope) => Some(scope),
            Err(missing) => {
                event!(
                    Level::DEBUG,
                    %level,
                    %missing,
                    "Prerequisite unset, skipping lookup"
                );
                None
            }
        }
    }

    /// Resource groups of the subscription.
    ///
    /// `_filter` comes from the dropdown autocomplete; the full list is always
    /// fetched and filtered by the editor.
    pub fn resource_groups(&self, _filter: &str) -> OptionsFuture {
        let gateway = Arc::clone(&self.gateway);
        Box::pin(async move {
            event!(Level::DEBUG, query = RESOURCE_GROUPS_QUERY, "Fetching resource groups");
            gateway
                .metric_find_query(RESOURCE_GROUPS_QUERY)
                .await
                .inspect_err(log_failure("metric_find_query"))
        })
    }

    pub fn metric_definitions(&self, _filter: &str) -> Option<OptionsFuture> {
        let resource_group = self.gate(SelectionLevel::MetricDefinition, |q| {
            Ok(q.chosen(SelectionLevel::ResourceGroup)?.to_string())
        })?;

        let gateway = Arc::clone(&self.gateway);
        Some(Box::pin(async move {
            event!(Level::DEBUG, %resource_group, "Fetching metric definitions");
            gateway
                .metric_definitions(&resource_group)
                .await
                .inspect_err(log_failure("metric_definitions"))
        }))
    }

    pub fn resource_names(&self, _filter: &str) -> Option<OptionsFuture> {
        let (resource_group, metric_definition) =
            self.gate(SelectionLevel::ResourceName, |q| {
                Ok((
                    q.chosen(SelectionLevel::ResourceGroup)?.to_string(),
                    q.chosen(SelectionLevel::MetricDefinition)?.to_string(),
                ))
            })?;

        let gateway = Arc::clone(&self.gateway);
        Some(Box::pin(async move {
            event!(
                Level::DEBUG,
                %resource_group,
                %metric_definition,
                "Fetching resource names"
            );
            gateway
                .resource_names(&resource_group, &metric_definition)
                .await
                .inspect_err(log_failure("resource_names"))
        }))
    }

    pub fn metric_names(&self, _filter: &str) -> Option<OptionsFuture> {
        let (resource_group, metric_definition, resource_name) =
            self.gate(SelectionLevel::MetricName, |q| {
                Ok((
                    q.chosen(SelectionLevel::ResourceGroup)?.to_string(),
                    q.chosen(SelectionLevel::MetricDefinition)?.to_string(),
                    q.chosen(SelectionLevel::ResourceName)?.to_string(),
                ))
            })?;

        let gateway = Arc::clone(&self.gateway);
        Some(Box::pin(async move {
            event!(
                Level::DEBUG,
                %resource_group,
                %metric_definition,
                %resource_name,
                "Fetching metric names"
            );
            gateway
                .metric_names(&resource_group, &metric_definition, &resource_name)
                .await
                .inspect_err(log_failure("metric_names"))
        }))
    }

    /// Looks up the aggregations of the chosen metric and stores them in the
    /// target: the primary type becomes the selected aggregation, the supported
    /// types become the options.
    ///
    /// Does nothing while any level above the aggregation is unset. By default
    /// the result is written to the target as it is when the response arrives;
    /// with [`ResolverOptions::discard_superseded`] it is dropped unless the
    /// target still holds the scope it was requested for.
    pub async fn on_metric_name_change(&self) -> GatewayResult<()> {
        let Some(scope) = self.gate(SelectionLevel::Aggregation, AggregationScope::read) else {
            return Ok(());
        };

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        event!(
            Level::DEBUG,
            resource_group = %scope.resource_group,
            metric_definition = %scope.metric_definition,
            resource_name = %scope.resource_name,
            metric_name = %scope.metric_name,
            "Fetching aggregations"
        );
        let info = self
            .gateway
            .aggregations(
                &scope.resource_group,
                &scope.metric_definition,
                &scope.resource_name,
                &scope.metric_name,
            )
            .await
            .inspect_err(log_failure("aggregations"))?;

        let primary = info.primary_agg_type.clone();
        let applied = self.target.update(|t| {
            if self.options.discard_superseded
                && (self.generation.load(Ordering::SeqCst) != generation
                    || !scope.matches(&t.azure_monitor))
            {
                return false;
            }
            t.azure_monitor.apply_aggregations(info);
            true
        });

        if applied {
            event!(
                Level::DEBUG,
                metric_name = %scope.metric_name,
                %primary,
                "Applied aggregations"
            );
        } else {
            event!(
                Level::DEBUG,
                metric_name = %scope.metric_name,
                "Discarding superseded aggregation response"
            );
        }
        Ok(())
    }

    fn select(&self, level: SelectionLevel, value: &str) -> Result<(), ResolverError> {
        self.target
            .update(|t| t.azure_monitor.choose(level, Selection::chosen(value)))
            .map_err(|missing| ResolverError::MissingPrerequisite { level, missing })?;
        self.generation.fetch_add(1, Ordering::SeqCst);
        event!(Level::DEBUG, %level, value, "Selection changed");
        Ok(())
    }

    /// Chooses a resource group and resets every level below it.
    pub fn select_resource_group(&self, value: &str) -> Result<(), ResolverError> {
        self.select(SelectionLevel::ResourceGroup, value)
    }

    pub fn select_metric_definition(&self, value: &str) -> Result<(), ResolverError> {
        self.select(SelectionLevel::MetricDefinition, value)
    }

    pub fn select_resource_name(&self, value: &str) -> Result<(), ResolverError> {
        self.select(SelectionLevel::ResourceName, value)
    }

    /// Chooses a metric, then resolves its aggregations.
    pub async fn select_metric_name(&self, value: &str) -> Result<(), ResolverError> {
        self.select(SelectionLevel::MetricName, value)?;
        self.on_metric_name_change().await?;
        Ok(())
    }

    pub fn select_aggregation(&self, value: &str) -> Result<(), ResolverError> {
        self.select(SelectionLevel::Aggregation, value)
    }
}
