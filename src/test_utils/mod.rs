//! Helpers shared by unit and integration tests.

mod recording_gateway;

pub use recording_gateway::{GatewayCall, GatewayMethod, RecordingGateway};

use crate::datamodel::{QueryTarget, Selection, SelectionLevel};

/// Target whose first levels are chosen from `values`, in chain order.
pub fn query_target(values: &[&str]) -> QueryTarget {
    let mut target = QueryTarget::default();
    for (level, value) in SelectionLevel::CHAIN.iter().zip(values) {
        target
            .azure_monitor
            .choose(*level, Selection::chosen(*value))
            .expect("levels are chosen in chain order");
    }
    target
}
