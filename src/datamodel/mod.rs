pub mod aggregation;
pub mod metric_option;
pub mod query_target;
pub mod selection;
pub mod time_grain;

pub use aggregation::AggregationInfo;
pub use metric_option::MetricOption;
pub use query_target::{AzureMonitorQuery, QueryTarget, QueryType};
pub use selection::{Selection, SelectionLevel, UNSET_SENTINEL};
pub use time_grain::TimeGrainUnit;
