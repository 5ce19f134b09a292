use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::sync::Mutex;
use tokio::sync::oneshot;

use crate::datamodel::{AggregationInfo, MetricOption};
use crate::gateway::{GatewayError, GatewayResult, MetricsGateway};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatewayMethod {
    MetricFindQuery,
    MetricDefinitions,
    ResourceNames,
    MetricNames,
    Aggregations,
}

impl fmt::Display for GatewayMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GatewayMethod::MetricFindQuery => "metric_find_query",
            GatewayMethod::MetricDefinitions => "metric_definitions",
            GatewayMethod::ResourceNames => "resource_names",
            GatewayMethod::MetricNames => "metric_names",
            GatewayMethod::Aggregations => "aggregations",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayCall {
    pub method: GatewayMethod,
    pub args: Vec<String>,
}

#[derive(Debug)]
struct ScriptedAggregation {
    info: AggregationInfo,
    release: Option<oneshot::Receiver<()>>,
}

/// Scripted gateway that records every call it receives.
///
/// Option lookups answer with the list primed for their method (empty by
/// default). Aggregation responses are queued; the last plain response keeps
/// answering once the queue is down to it.
#[derive(Debug, Default)]
pub struct RecordingGateway {
    calls: Mutex<Vec<GatewayCall>>,
    options: Mutex<HashMap<GatewayMethod, Vec<MetricOption>>>,
    aggregations: Mutex<VecDeque<ScriptedAggregation>>,
    failures: Mutex<HashMap<GatewayMethod, String>>,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(self, method: GatewayMethod, options: Vec<MetricOption>) -> Self {
        self.options.lock().unwrap().insert(method, options);
        self
    }

    pub fn with_aggregation(self, info: AggregationInfo) -> Self {
        self.push_aggregation(info);
        self
    }

    pub fn push_aggregation(&self, info: AggregationInfo) {
        self.aggregations
            .lock()
            .unwrap()
            .push_back(ScriptedAggregation {
                info,
                release: None,
            });
    }

    /// Queues a response that is only returned once the sender fires (or is dropped).
    pub fn hold_aggregation(&self, info: AggregationInfo) -> oneshot::Sender<()> {
        let (sender, receiver) = oneshot::channel();
        self.aggregations
            .lock()
            .unwrap()
            .push_back(ScriptedAggregation {
                info,
                release: Some(receiver),
            });
        sender
    }

    pub fn failing(self, method: GatewayMethod, details: &str) -> Self {
        self.failures
            .lock()
            .unwrap()
            .insert(method, details.to_string());
        self
    }

    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, method: GatewayMethod) -> Vec<Vec<String>> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| call.method == method)
            .map(|call| call.args.clone())
            .collect()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn record(&self, method: GatewayMethod, args: &[&str]) -> GatewayResult<()> {
        self.calls.lock().unwrap().push(GatewayCall {
            method,
            args: args.iter().map(|arg| arg.to_string()).collect(),
        });
        match self.failures.lock().unwrap().get(&method) {
            Some(details) => Err(GatewayError::request(&method.to_string(), details.clone())),
            None => Ok(()),
        }
    }

    fn options_for(
        &self,
        method: GatewayMethod,
        args: &[&str],
    ) -> GatewayResult<Vec<MetricOption>> {
        self.record(method, args)?;
        Ok(self
            .options
            .lock()
            .unwrap()
            .get(&method)
            .cloned()
            .unwrap_or_default())
    }

    fn next_aggregation(&self) -> Option<ScriptedAggregation> {
        let mut queue = self.aggregations.lock().unwrap();
        let sticky = queue.len() == 1 && queue.front().is_some_and(|s| s.release.is_none());
        if sticky {
            queue.front().map(|s| ScriptedAggregation {
                info: s.info.clone(),
                release: None,
            })
        } else {
            queue.pop_front()
        }
    }
}

#[async_trait]
impl MetricsGateway for RecordingGateway {
    async fn metric_find_query(&self, query: &str) -> GatewayResult<Vec<MetricOption>> {
        self.options_for(GatewayMethod::MetricFindQuery, &[query])
    }

    async fn metric_definitions(&self, resource_group: &str) -> GatewayResult<Vec<MetricOption>> {
        self.options_for(GatewayMethod::MetricDefinitions, &[resource_group])
    }

    async fn resource_names(
        &self,
        resource_group: &str,
        metric_definition: &str,
    ) -> GatewayResult<Vec<MetricOption>> {
        self.options_for(
            GatewayMethod::ResourceNames,
            &[resource_group, metric_definition],
        )
    }

    async fn metric_names(
        &self,
        resource_group: &str,
        metric_definition: &str,
        resource_name: &str,
    ) -> GatewayResult<Vec<MetricOption>> {
        self.options_for(
            GatewayMethod::MetricNames,
            &[resource_group, metric_definition, resource_name],
        )
    }

    async fn aggregations(
        &self,
        resource_group: &str,
        metric_definition: &str,
        resource_name: &str,
        metric_name: &str,
    ) -> GatewayResult<AggregationInfo> {
        self.record(
            GatewayMethod::Aggregations,
            &[resource_group, metric_definition, resource_name, metric_name],
        )?;
        let scripted = self
            .next_aggregation()
            .ok_or_else(|| GatewayError::request("aggregations", "no scripted response"))?;
        if let Some(release) = scripted.release {
            let _ = release.await;
        }
        Ok(scripted.info)
    }
}
