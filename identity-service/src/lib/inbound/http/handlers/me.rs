use axum::http::StatusCode;
use serde::Serialize;

use super::ApiSuccess;
use crate::inbound::http::middleware::IdentityContext;

/// Echo the identity the authorization middleware attached.
pub async fn me(identity: IdentityContext) -> ApiSuccess<IdentityData> {
    ApiSuccess::new(StatusCode::OK, identity.into())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentityData {
    pub user_id: String,
    pub tenant_id: String,
    pub role: String,
}

impl From<IdentityContext> for IdentityData {
    fn from(identity: IdentityContext) -> Self {
        Self {
            user_id: identity.user_id.to_string(),
            tenant_id: identity.tenant_id.to_string(),
            role: identity.role.to_string(),
        }
    }
}
