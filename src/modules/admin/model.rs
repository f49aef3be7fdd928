use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdminSessionResponse {
    pub id: String,
    pub email: String,
    pub admin: bool,
}
