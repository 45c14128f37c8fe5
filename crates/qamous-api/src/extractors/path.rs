//! Path parameter extractors

use qamous_core::DefinitionId;

use crate::response::ApiError;

/// Path parameters with definition_id
#[derive(Debug, serde::Deserialize)]
pub struct DefinitionPath {
    pub definition_id: String,
}

impl DefinitionPath {
    /// Parse definition_id as a DefinitionId
    pub fn definition_id(&self) -> Result<DefinitionId, ApiError> {
        DefinitionId::parse(&self.definition_id)
            .map_err(|_| ApiError::invalid_path("Invalid definition_id format"))
    }
}
