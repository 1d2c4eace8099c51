use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use chrono::Utc;

use super::handlers::ApiError;
use crate::account::errors::AuthError;
use crate::account::models::AccountId;
use crate::account::models::Role;
use crate::account::models::TenantId;
use crate::inbound::http::router::AppState;

/// Verified identity of the caller, attached by [`authorize`].
///
/// Lives in the request extensions for one request only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentityContext {
    pub user_id: AccountId,
    pub tenant_id: TenantId,
    pub role: Role,
}

#[async_trait]
impl<S> FromRequestParts<S> for IdentityContext
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<IdentityContext>()
            .copied()
            .ok_or_else(|| ApiError::from(AuthError::Unauthorized))
    }
}

/// Middleware that validates the bearer token and attaches an [`IdentityContext`].
///
/// Missing header or incomplete claims are `UNAUTHORIZED`; a malformed
/// header or a token that fails validation (including expiry) is
/// `BAD_REQUEST`. A correctly signed token whose `user_id` or `tenant_id`
/// is not a UUID, or whose `role` is not a known role, is also
/// `UNAUTHORIZED`.
pub async fn authorize(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let path = req.uri().path().to_string();

    let token = extract_bearer_token(&req).map_err(|e| {
        tracing::warn!(path = %path, error = %e, "Rejected Authorization header");
        state.reject(e)
    })?;

    let claims = state.tokens.validate(token).map_err(|e| {
        tracing::warn!(path = %path, error = %e, "Token validation failed");
        state.reject(AuthError::BadRequest("invalid or expired token".to_string()))
    })?;

    if claims.is_expired(Utc::now().timestamp()) {
        tracing::warn!(path = %path, user_id = %claims.user_id, "Expired access token");
        return Err(state.reject(AuthError::BadRequest(
            "invalid or expired token".to_string(),
        )));
    }

    let identity = identity_from_claims(&claims).ok_or_else(|| {
        tracing::warn!(path = %path, "Token is missing user, tenant or role");
        state.reject(AuthError::Unauthorized)
    })?;

    tracing::debug!(
        path = %path,
        user_id = %identity.user_id,
        tenant_id = %identity.tenant_id,
        "Authenticated request"
    );

    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}

fn extract_bearer_token(req: &Request) -> Result<&str, AuthError> {
    let value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::Unauthorized)?;

    let malformed = || AuthError::BadRequest("Invalid Authorization header format".to_string());

    let value = value.to_str().map_err(|_| malformed())?;
    match value.split(' ').collect::<Vec<_>>().as_slice() {
        ["Bearer", token] if !token.is_empty() => Ok(*token),
        _ => Err(malformed()),
    }
}

fn identity_from_claims(claims: &auth::Claims) -> Option<IdentityContext> {
    let tenant_id = claims.tenant_id.as_deref().filter(|s| !s.is_empty())?;
    let role = claims.role.as_deref().filter(|s| !s.is_empty())?;

    Some(IdentityContext {
        user_id: AccountId::from_string(&claims.user_id).ok()?,
        tenant_id: TenantId::from_string(tenant_id).ok()?,
        role: role.parse().ok()?,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use auth::TokenService;
    use auth::TokenSettings;
    use axum::body::Body;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::Router;
    use chrono::Duration;
    use http_body_util::BodyExt;
    use tower::ServiceExt;
    use uuid::Uuid;

    use super::*;
    use crate::account::models::Account;
    use crate::account::models::AuthSession;
    use crate::account::models::LoginCommand;
    use crate::account::models::RegisterCommand;
    use crate::account::ports::AuthServicePort;
    use crate::config::AppConfig;
    use crate::employee::service::EmployeeService;
    use crate::repositories::InMemoryEmployeeRepository;

    struct UnusedAuthService;

    #[async_trait]
    impl AuthServicePort for UnusedAuthService {
        async fn register(&self, _: RegisterCommand) -> Result<Account, AuthError> {
            unimplemented!()
        }

        async fn login(&self, _: LoginCommand) -> Result<AuthSession, AuthError> {
            unimplemented!()
        }

        async fn refresh(&self, _: &str) -> Result<AuthSession, AuthError> {
            unimplemented!()
        }
    }

    async fn whoami(identity: IdentityContext) -> String {
        format!("{}|{}|{}", identity.user_id, identity.tenant_id, identity.role)
    }

    fn setup() -> (Router, Arc<TokenService>) {
        let tokens = Arc::new(
            TokenService::new(TokenSettings::new("test_secret_key_at_least_32_bytes!", 15, 72))
                .unwrap(),
        );
        let state = AppState {
            auth_service: Arc::new(UnusedAuthService),
            employee_service: Arc::new(EmployeeService::new(Arc::new(
                InMemoryEmployeeRepository::new(),
            ))),
            tokens: Arc::clone(&tokens),
            app: AppConfig {
                name: "identity-service".to_string(),
                environment: "test".to_string(),
            },
            expose_error_details: true,
        };

        let router = Router::new()
            .route("/whoami", get(whoami))
            .route_layer(axum::middleware::from_fn_with_state(state.clone(), authorize))
            .with_state(state);

        (router, tokens)
    }

    async fn call(router: Router, authorization: Option<&str>) -> (StatusCode, String) {
        let mut request = axum::http::Request::builder().uri("/whoami");
        if let Some(value) = authorization {
            request = request.header(header::AUTHORIZATION, value);
        }

        let response = router
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();

        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_valid_access_token_attaches_identity() {
        let (router, tokens) = setup();
        let user_id = Uuid::new_v4().to_string();
        let tenant_id = Uuid::new_v4().to_string();
        let token = tokens.issue_access(&user_id, &tenant_id, "admin").unwrap();

        let (status, body) = call(router, Some(&format!("Bearer {}", token))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, format!("{}|{}|admin", user_id, tenant_id));
    }

    #[tokio::test]
    async fn test_missing_header_is_unauthorized() {
        let (router, _) = setup();

        let (status, body) = call(router, None).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.contains("UNAUTHORIZED"));
    }

    #[tokio::test]
    async fn test_malformed_header_is_bad_request() {
        for value in ["Token abc", "Bearer", "Bearer a b", "bearer abc", "Bearer "] {
            let (router, _) = setup();

            let (status, body) = call(router, Some(value)).await;

            assert_eq!(status, StatusCode::BAD_REQUEST, "header {:?}", value);
            assert!(body.contains("Invalid Authorization header format"));
        }
    }

    #[tokio::test]
    async fn test_tampered_token_is_bad_request() {
        let (router, tokens) = setup();
        let token = tokens
            .issue_access(&Uuid::new_v4().to_string(), &Uuid::new_v4().to_string(), "user")
            .unwrap();
        let tampered = format!("{}x", token);

        let (status, body) = call(router, Some(&format!("Bearer {}", tampered))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("invalid or expired token"));
    }

    #[tokio::test]
    async fn test_expired_token_is_bad_request() {
        let (router, tokens) = setup();
        let token = tokens
            .issue_access_at(
                &Uuid::new_v4().to_string(),
                &Uuid::new_v4().to_string(),
                "user",
                Utc::now() - Duration::hours(1),
            )
            .unwrap();

        let (status, body) = call(router, Some(&format!("Bearer {}", token))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("invalid or expired token"));
    }

    #[tokio::test]
    async fn test_refresh_token_lacks_tenant_and_role() {
        let (router, tokens) = setup();
        let token = tokens.issue_refresh(&Uuid::new_v4().to_string()).unwrap();

        let (status, _) = call(router, Some(&format!("Bearer {}", token))).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_unknown_role_is_unauthorized() {
        let (router, tokens) = setup();
        let token = tokens
            .issue_access(&Uuid::new_v4().to_string(), &Uuid::new_v4().to_string(), "superuser")
            .unwrap();

        let (status, body) = call(router, Some(&format!("Bearer {}", token))).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.contains("UNAUTHORIZED"));
    }

    #[tokio::test]
    async fn test_non_uuid_identifiers_are_unauthorized() {
        for (user_id, tenant_id) in [
            ("user123".to_string(), Uuid::new_v4().to_string()),
            (Uuid::new_v4().to_string(), "acme".to_string()),
        ] {
            let (router, tokens) = setup();
            let token = tokens.issue_access(&user_id, &tenant_id, "user").unwrap();

            let (status, _) = call(router, Some(&format!("Bearer {}", token))).await;

            assert_eq!(status, StatusCode::UNAUTHORIZED, "{} / {}", user_id, tenant_id);
        }
    }
}
