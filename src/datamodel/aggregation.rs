use serde::{Deserialize, Serialize};

/// Aggregations a metric supports, and the one the API recommends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregationInfo {
    pub primary_agg_type: String,
    pub support_agg_options: Vec<String>,
}

impl AggregationInfo {
    pub fn new<I, S>(primary_agg_type: impl Into<String>, support_agg_options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            primary_agg_type: primary_agg_type.into(),
            support_agg_options: support_agg_options.into_iter().map(Into::into).collect(),
        }
    }
}
