use serde::{Deserialize, Serialize};

/// One entry of a dropdown, as the monitoring API describes it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MetricOption {
    pub text: String,
    pub value: String,
}

impl MetricOption {
    pub fn new(text: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            value: value.into(),
        }
    }

    /// Option whose label is its value, which is what every lookup returns.
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            text: name.clone(),
            value: name,
        }
    }
}
