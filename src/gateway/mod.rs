pub mod catalog;
pub mod error;
pub mod metrics_gateway;

pub use catalog::{Catalog, CatalogGateway};
pub use error::GatewayError;
pub use metrics_gateway::{GatewayResult, MetricsGateway, RESOURCE_GROUPS_QUERY};
