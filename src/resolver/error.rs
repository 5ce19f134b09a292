use thiserror::Error;

use crate::datamodel::SelectionLevel;
use crate::gateway::GatewayError;

#[derive(Error, Debug)]
pub enum ResolverError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// A level was chosen while one of the levels above it is still unset
    #[error("Cannot choose {level} before {missing}")]
    MissingPrerequisite {
        level: SelectionLevel,
        missing: SelectionLevel,
    },
}
