use serde::{Deserialize, Serialize};
use std::fmt;

/// Value the dashboard JSON uses for a dropdown nobody has picked yet.
pub const UNSET_SENTINEL: &str = "select";

/// State of one dropdown in the selection chain.
///
/// Serialized as a plain string so saved dashboards keep working:
/// `Unset` is written as `"select"` and `"select"` is read back as `Unset`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Selection {
    #[default]
    Unset,
    Chosen(String),
}

impl Selection {
    /// Builds a selection from a dropdown value. The sentinel maps to `Unset`.
    pub fn chosen(value: impl Into<String>) -> Self {
        Self::from(value.into())
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    pub fn as_chosen(&self) -> Option<&str> {
        match self {
            Self::Unset => None,
            Self::Chosen(value) => Some(value),
        }
    }
}

impl From<String> for Selection {
    fn from(value: String) -> Self {
        if value == UNSET_SENTINEL {
            Self::Unset
        } else {
            Self::Chosen(value)
        }
    }
}

impl From<&str> for Selection {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<Selection> for String {
    fn from(selection: Selection) -> Self {
        match selection {
            Selection::Unset => UNSET_SENTINEL.to_string(),
            Selection::Chosen(value) => value,
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::Unset => write!(f, "{}", UNSET_SENTINEL),
            Selection::Chosen(value) => write!(f, "{}", value),
        }
    }
}

/// Levels of the dependency chain, in order.
///
/// A level may only be looked up or chosen once every level before it holds a
/// chosen value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SelectionLevel {
    ResourceGroup,
    MetricDefinition,
    ResourceName,
    MetricName,
    Aggregation,
}

impl SelectionLevel {
    pub const CHAIN: [SelectionLevel; 5] = [
        SelectionLevel::ResourceGroup,
        SelectionLevel::MetricDefinition,
        SelectionLevel::ResourceName,
        SelectionLevel::MetricName,
        SelectionLevel::Aggregation,
    ];

    fn index(self) -> usize {
        self as usize
    }

    /// Levels that must be chosen before this one.
    pub fn prerequisites(self) -> &'static [SelectionLevel] {
        &Self::CHAIN[..self.index()]
    }

    /// Levels invalidated when this one changes.
    pub fn downstream(self) -> &'static [SelectionLevel] {
        &Self::CHAIN[self.index() + 1..]
    }
}

impl fmt::Display for SelectionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SelectionLevel::ResourceGroup => "resourceGroup",
            SelectionLevel::MetricDefinition => "metricDefinition",
            SelectionLevel::ResourceName => "resourceName",
            SelectionLevel::MetricName => "metricName",
            SelectionLevel::Aggregation => "aggregation",
        };
        write!(f, "{}", s)
    }
}
