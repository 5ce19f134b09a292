#![forbid(unsafe_code)]

pub mod config;
pub mod datamodel;
pub mod gateway;
pub mod resolver;
pub mod telemetry;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
