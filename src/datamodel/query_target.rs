use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{fmt, time::Duration};

use super::{
    AggregationInfo, Selection, SelectionLevel, TimeGrainUnit, time_grain::time_grain_duration,
};
use crate::config::AzMonConfig;

/// Discriminant of the query kinds a panel can hold. Only metric queries are handled here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QueryType {
    #[default]
    #[serde(rename = "Azure Monitor")]
    AzureMonitor,
}

impl QueryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryType::AzureMonitor => "Azure Monitor",
        }
    }
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The query a single panel is building.
///
/// Field names follow the dashboard JSON (`queryType`, `azureMonitor`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryTarget {
    #[serde(default)]
    pub query_type: QueryType,
    #[serde(default)]
    pub azure_monitor: AzureMonitorQuery,
}

impl QueryTarget {
    /// Fresh target using the configured time grain defaults.
    pub fn from_config(config: &AzMonConfig) -> Result<Self> {
        Ok(Self {
            query_type: QueryType::AzureMonitor,
            azure_monitor: AzureMonitorQuery {
                time_grain: config.default_time_grain,
                time_grain_unit: config.time_grain_unit()?,
                ..AzureMonitorQuery::default()
            },
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AzureMonitorQuery {
    pub resource_group: Selection,
    pub metric_definition: Selection,
    pub resource_name: Selection,
    pub metric_name: Selection,
    pub aggregation: Selection,
    pub agg_options: Vec<String>,
    pub time_grain: u32,
    pub time_grain_unit: TimeGrainUnit,
}

impl Default for AzureMonitorQuery {
    fn default() -> Self {
        Self {
            resource_group: Selection::Unset,
            metric_definition: Selection::Unset,
            resource_name: Selection::Unset,
            metric_name: Selection::Unset,
            aggregation: Selection::Unset,
            agg_options: Vec::new(),
            time_grain: 1,
            time_grain_unit: TimeGrainUnit::Hour,
        }
    }
}

impl AzureMonitorQuery {
    pub fn selection(&self, level: SelectionLevel) -> &Selection {
        match level {
            SelectionLevel::ResourceGroup => &self.resource_group,
            SelectionLevel::MetricDefinition => &self.metric_definition,
            SelectionLevel::ResourceName => &self.resource_name,
            SelectionLevel::MetricName => &self.metric_name,
            SelectionLevel::Aggregation => &self.aggregation,
        }
    }

    fn selection_mut(&mut self, level: SelectionLevel) -> &mut Selection {
        match level {
            SelectionLevel::ResourceGroup => &mut self.resource_group,
            SelectionLevel::MetricDefinition => &mut self.metric_definition,
            SelectionLevel::ResourceName => &mut self.resource_name,
            SelectionLevel::MetricName => &mut self.metric_name,
            SelectionLevel::Aggregation => &mut self.aggregation,
        }
    }

    /// Chosen value of `level`, or the level itself when it is unset.
    pub fn chosen(&self, level: SelectionLevel) -> Result<&str, SelectionLevel> {
        self.selection(level).as_chosen().ok_or(level)
    }

    /// First prerequisite of `level` that is still unset.
    pub fn missing_prerequisite(&self, level: SelectionLevel) -> Option<SelectionLevel> {
        level
            .prerequisites()
            .iter()
            .copied()
            .find(|prerequisite| self.selection(*prerequisite).is_unset())
    }

    /// First level of the chain that is still unset.
    pub fn first_unset(&self) -> Option<SelectionLevel> {
        SelectionLevel::CHAIN
            .iter()
            .copied()
            .find(|level| self.selection(*level).is_unset())
    }

    pub fn is_complete(&self) -> bool {
        self.first_unset().is_none()
    }

    /// Sets `level` and resets everything below it.
    ///
    /// Fails with the first unset prerequisite, leaving the query untouched.
    pub fn choose(
        &mut self,
        level: SelectionLevel,
        value: Selection,
    ) -> Result<(), SelectionLevel> {
        if let Some(missing) = self.missing_prerequisite(level) {
            return Err(missing);
        }

        *self.selection_mut(level) = value;
        for below in level.downstream() {
            *self.selection_mut(*below) = Selection::Unset;
        }
        if level != SelectionLevel::Aggregation {
            self.agg_options.clear();
        }
        Ok(())
    }

    /// Takes the API's primary aggregation as the selection, whether or not it
    /// appears among the supported options. A primary of `"select"` leaves the
    /// aggregation unset.
    pub fn apply_aggregations(&mut self, info: AggregationInfo) {
        self.aggregation = Selection::chosen(info.primary_agg_type);
        self.agg_options = info.support_agg_options;
    }

    pub fn time_grain_duration(&self) -> Duration {
        time_grain_duration(self.time_grain, self.time_grain_unit)
    }

    pub fn iso8601_interval(&self) -> String {
        self.time_grain_unit.iso8601(self.time_grain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chosen_up_to(level: SelectionLevel) -> AzureMonitorQuery {
        let mut query = AzureMonitorQuery::default();
        for (i, current) in SelectionLevel::CHAIN.iter().enumerate() {
            if *current > level {
                break;
            }
            query
                .choose(*current, Selection::chosen(format!("value{}", i)))
                .unwrap();
        }
        query
    }

    #[test]
    fn test_defaults() {
        let target = QueryTarget::default();
        assert_eq!(target.query_type.to_string(), "Azure Monitor");
        assert_eq!(target.azure_monitor.time_grain, 1);
        assert_eq!(target.azure_monitor.time_grain_unit, TimeGrainUnit::Hour);
        for level in SelectionLevel::CHAIN {
            assert!(target.azure_monitor.selection(level).is_unset());
        }
        assert!(target.azure_monitor.agg_options.is_empty());
    }

    #[test]
    fn test_from_config() {
        let mut config = AzMonConfig {
            default_time_grain: 5,
            default_time_grain_unit: "minute".to_string(),
            discard_superseded: false,
            log_filter: "info".to_string(),
        };
        let target = QueryTarget::from_config(&config).unwrap();
        assert_eq!(target.azure_monitor.time_grain, 5);
        assert_eq!(target.azure_monitor.time_grain_unit, TimeGrainUnit::Minute);
        assert_eq!(target.azure_monitor.first_unset(), Some(SelectionLevel::ResourceGroup));

        config.default_time_grain_unit = "week".to_string();
        assert!(QueryTarget::from_config(&config).is_err());
    }

    #[test]
    fn test_serialize_dashboard_shape() {
        let json = serde_json::to_value(QueryTarget::default()).unwrap();
        assert_eq!(json["queryType"], "Azure Monitor");
        assert_eq!(json["azureMonitor"]["resourceGroup"], "select");
        assert_eq!(json["azureMonitor"]["metricName"], "select");
        assert_eq!(json["azureMonitor"]["timeGrain"], 1);
        assert_eq!(json["azureMonitor"]["timeGrainUnit"], "hour");
    }

    #[test]
    fn test_deserialize_partial_dashboard() {
        let target: QueryTarget = serde_json::from_str(
            r#"{
                "queryType": "Azure Monitor",
                "azureMonitor": {"resourceGroup": "test", "metricDefinition": "select"}
            }"#,
        )
        .unwrap();
        assert_eq!(target.azure_monitor.resource_group, Selection::chosen("test"));
        assert!(target.azure_monitor.metric_definition.is_unset());
        assert!(target.azure_monitor.resource_name.is_unset());
        assert_eq!(target.azure_monitor.time_grain, 1);
    }

    #[test]
    fn test_missing_prerequisite() {
        let query = chosen_up_to(SelectionLevel::ResourceGroup);
        assert_eq!(query.missing_prerequisite(SelectionLevel::MetricDefinition), None);
        assert_eq!(
            query.missing_prerequisite(SelectionLevel::MetricName),
            Some(SelectionLevel::MetricDefinition)
        );
        assert_eq!(query.first_unset(), Some(SelectionLevel::MetricDefinition));
        assert!(!query.is_complete());
    }

    #[test]
    fn test_choose_rejects_unset_prerequisite() {
        let mut query = AzureMonitorQuery::default();
        let result = query.choose(SelectionLevel::ResourceName, Selection::chosen("vm1"));
        assert_eq!(result, Err(SelectionLevel::ResourceGroup));
        assert_eq!(query, AzureMonitorQuery::default());
    }

    #[test]
    fn test_choose_resets_downstream() {
        let mut query = chosen_up_to(SelectionLevel::MetricName);
        query.apply_aggregations(AggregationInfo::new("Average", ["Average", "Total"]));
        assert!(query.is_complete());

        query
            .choose(SelectionLevel::MetricDefinition, Selection::chosen("other"))
            .unwrap();

        assert_eq!(query.resource_group, Selection::chosen("value0"));
        assert_eq!(query.metric_definition, Selection::chosen("other"));
        assert!(query.resource_name.is_unset());
        assert!(query.metric_name.is_unset());
        assert!(query.aggregation.is_unset());
        assert!(query.agg_options.is_empty());
    }

    #[test]
    fn test_choose_aggregation_keeps_options() {
        let mut query = chosen_up_to(SelectionLevel::MetricName);
        query.apply_aggregations(AggregationInfo::new("Average", ["Average", "Total"]));

        query
            .choose(SelectionLevel::Aggregation, Selection::chosen("Total"))
            .unwrap();

        assert_eq!(query.aggregation, Selection::chosen("Total"));
        assert_eq!(query.agg_options, vec!["Average", "Total"]);
    }

    #[test]
    fn test_apply_aggregations_does_not_validate_primary() {
        let mut query = chosen_up_to(SelectionLevel::MetricName);
        query.apply_aggregations(AggregationInfo::new("Maximum", ["Average", "Total"]));
        assert_eq!(query.aggregation, Selection::chosen("Maximum"));
        assert_eq!(query.agg_options, vec!["Average", "Total"]);
    }

    #[test]
    fn test_apply_aggregations_maps_select_primary_to_unset() {
        let mut target = QueryTarget::default();
        target.azure_monitor = chosen_up_to(SelectionLevel::MetricName);
        target
            .azure_monitor
            .apply_aggregations(AggregationInfo::new("select", ["Average"]));

        assert!(target.azure_monitor.aggregation.is_unset());
        assert!(!target.azure_monitor.is_complete());
        assert_eq!(target.azure_monitor.agg_options, vec!["Average"]);

        let json = serde_json::to_string(&target).unwrap();
        let reloaded: QueryTarget = serde_json::from_str(&json).unwrap();
        assert_eq!(reloaded, target);
    }

    #[test]
    fn test_time_grain_helpers() {
        let mut query = AzureMonitorQuery::default();
        assert_eq!(query.iso8601_interval(), "PT1H");
        assert_eq!(query.time_grain_duration(), Duration::from_secs(3600));

        query.time_grain = 5;
        query.time_grain_unit = TimeGrainUnit::Minute;
        assert_eq!(query.iso8601_interval(), "PT5M");
        assert_eq!(query.time_grain_duration(), Duration::from_secs(300));
    }
}
