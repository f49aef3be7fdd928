use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use devhub_core::Environment;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: String,
    #[schema(example = "0.1.0")]
    pub version: String,
    pub environment: Environment,
}
