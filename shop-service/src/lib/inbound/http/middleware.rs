use auth::TokenError;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use thiserror::Error;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

const UNAUTHORIZED_MESSAGE: &str = "Not allowed, valid authorization is required";
const UNKNOWN_USER_MESSAGE: &str = "User not found";

/// Identity resolved by the access gate, stored in request extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: UserId,
}

/// Why the access gate turned a request away.
///
/// Checks run in declaration order and the first failure wins. The reason is
/// logged; clients only see a generic message per status code.
#[derive(Debug, Error)]
pub enum AccessDenied {
    #[error("missing Authorization header")]
    MissingHeader,

    #[error("Authorization header carries no token")]
    MissingToken,

    #[error("token rejected: {0}")]
    InvalidToken(TokenError),

    #[error("token has no subject claim")]
    MissingSubject,

    #[error("token subject does not resolve to a user")]
    UnknownSubject,

    #[error("identity lookup failed: {0}")]
    LookupFailed(UserError),
}

impl IntoResponse for AccessDenied {
    fn into_response(self) -> Response {
        let error = match self {
            AccessDenied::MissingHeader
            | AccessDenied::MissingToken
            | AccessDenied::InvalidToken(_)
            | AccessDenied::MissingSubject => {
                ApiError::Unauthorized(UNAUTHORIZED_MESSAGE.to_string())
            }
            AccessDenied::UnknownSubject => ApiError::NotFound(UNKNOWN_USER_MESSAGE.to_string()),
            AccessDenied::LookupFailed(e) => ApiError::InternalServerError(e.to_string()),
        };

        error.into_response()
    }
}

/// Middleware that validates bearer tokens and adds the caller's identity to request extensions
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AccessDenied> {
    let user = resolve_identity(&state, req.headers())
        .await
        .map_err(|denied| {
            tracing::warn!(
                method = %req.method(),
                uri = %req.uri(),
                reason = %denied,
                "Request rejected by access gate"
            );
            denied
        })?;

    tracing::debug!(user_id = %user.id, "Request authenticated");
    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

async fn resolve_identity(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<AuthenticatedUser, AccessDenied> {
    let token = extract_token_from_header(headers)?;

    let claims = state
        .authenticator
        .validate_token(token)
        .map_err(AccessDenied::InvalidToken)?;

    let subject = claims.subject().ok_or(AccessDenied::MissingSubject)?;

    // A subject that is not a user id can never match a stored user.
    let user_id = UserId::from_string(subject).map_err(|_| AccessDenied::UnknownSubject)?;

    match state.user_service.find_identity(&user_id).await {
        Ok(Some(id)) => Ok(AuthenticatedUser { id }),
        Ok(None) => Err(AccessDenied::UnknownSubject),
        Err(e) => Err(AccessDenied::LookupFailed(e)),
    }
}

/// The token is the second space-separated segment of `<scheme> <token>`.
fn extract_token_from_header(headers: &HeaderMap) -> Result<&str, AccessDenied> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .ok_or(AccessDenied::MissingHeader)?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| AccessDenied::MissingToken)?;

    auth_str
        .split(' ')
        .nth(1)
        .filter(|token| !token.is_empty())
        .ok_or(AccessDenied::MissingToken)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use auth::Authenticator;
    use auth::Claims;
    use auth::SigningSecret;
    use auth::TokenService;
    use axum::body::Body;
    use axum::http::HeaderValue;
    use axum::http::StatusCode;
    use axum::middleware;
    use axum::routing::get;
    use axum::Extension;
    use axum::Router;
    use chrono::Utc;
    use http_body_util::BodyExt;
    use mockall::mock;
    use tower::ServiceExt;

    use super::*;
    use crate::domain::cart::errors::CartError;
    use crate::domain::cart::models::Cart;
    use crate::domain::cart::models::LineQuantity;
    use crate::domain::cart::ports::CartServicePort;
    use crate::domain::product::errors::ProductError;
    use crate::domain::product::models::CreateProductCommand;
    use crate::domain::product::models::Product;
    use crate::domain::product::models::ProductId;
    use crate::domain::product::models::ProductSlug;
    use crate::domain::product::models::UpdateProductCommand;
    use crate::domain::product::ports::ProductServicePort;
    use crate::domain::user::models::CreateUserCommand;
    use crate::domain::user::models::User;
    use crate::domain::user::models::Username;
    use crate::domain::user::ports::UserServicePort;

    const SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";

    mock! {
        pub TestUserService {}

        #[async_trait]
        impl UserServicePort for TestUserService {
            async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError>;
            async fn get_user_by_username(&self, username: &Username) -> Result<User, UserError>;
            async fn list_users(&self) -> Result<Vec<User>, UserError>;
            async fn find_identity(&self, id: &UserId) -> Result<Option<UserId>, UserError>;
        }
    }

    mock! {
        pub TestProductService {}

        #[async_trait]
        impl ProductServicePort for TestProductService {
            async fn create_product(&self, command: CreateProductCommand) -> Result<Product, ProductError>;
            async fn get_product(&self, id: &ProductId) -> Result<Product, ProductError>;
            async fn get_product_by_slug(&self, slug: &ProductSlug) -> Result<Product, ProductError>;
            async fn list_products(&self) -> Result<Vec<Product>, ProductError>;
            async fn update_product(&self, id: &ProductId, command: UpdateProductCommand) -> Result<Product, ProductError>;
            async fn delete_product(&self, id: &ProductId) -> Result<Product, ProductError>;
            async fn delete_all_products(&self) -> Result<u64, ProductError>;
        }
    }

    mock! {
        pub TestCartService {}

        #[async_trait]
        impl CartServicePort for TestCartService {
            async fn get_cart(&self, user_id: &UserId) -> Result<Cart, CartError>;
            async fn add_item(&self, user_id: &UserId, product_id: &ProductId, quantity: LineQuantity) -> Result<Cart, CartError>;
            async fn set_item_quantity(&self, user_id: &UserId, product_id: &ProductId, quantity: LineQuantity) -> Result<Cart, CartError>;
            async fn remove_item(&self, user_id: &UserId, product_id: &ProductId) -> Result<Cart, CartError>;
            async fn clear_cart(&self, user_id: &UserId) -> Result<Cart, CartError>;
        }
    }

    fn token_service() -> TokenService {
        TokenService::new(SigningSecret::new(SECRET))
    }

    fn app(user_service: MockTestUserService) -> Router {
        let state = AppState {
            user_service: Arc::new(user_service),
            product_service: Arc::new(MockTestProductService::new()),
            cart_service: Arc::new(MockTestCartService::new()),
            authenticator: Arc::new(Authenticator::new(token_service())),
        };

        Router::new()
            .route(
                "/protected",
                get(|Extension(user): Extension<AuthenticatedUser>| async move {
                    user.id.to_string()
                }),
            )
            .route_layer(middleware::from_fn_with_state(state.clone(), authenticate))
            .with_state(state)
    }

    fn untouched_user_service() -> MockTestUserService {
        let mut user_service = MockTestUserService::new();
        user_service.expect_find_identity().times(0);
        user_service
    }

    async fn send(app: Router, authorization: Option<&str>) -> (StatusCode, String) {
        let mut builder = axum::http::Request::builder().uri("/protected");
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        let response = app
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_missing_header_is_unauthorized_without_lookup() {
        let (status, body) = send(app(untouched_user_service()), None).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.contains(UNAUTHORIZED_MESSAGE));
    }

    #[tokio::test]
    async fn test_empty_bearer_is_unauthorized() {
        let (status, _) = send(app(untouched_user_service()), Some("Bearer ")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(app(untouched_user_service()), Some("Bearer")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_non_utf8_header_is_unauthorized() {
        let request = axum::http::Request::builder()
            .uri("/protected")
            .header(
                header::AUTHORIZATION,
                HeaderValue::from_bytes(b"Bearer \xfa\xfb").unwrap(),
            )
            .body(Body::empty())
            .unwrap();

        let response = app(untouched_user_service())
            .oneshot(request)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_garbage_token_is_unauthorized() {
        let (status, _) =
            send(app(untouched_user_service()), Some("Bearer not.a.token")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_expired_token_is_unauthorized() {
        let now = Utc::now().timestamp();
        let token = token_service()
            .sign(
                &Claims::new()
                    .with_subject(UserId::new())
                    .with_issued_at(now - 7200)
                    .with_expiration(now - 3600),
            )
            .unwrap();

        let (status, _) = send(
            app(untouched_user_service()),
            Some(&format!("Bearer {}", token)),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_foreign_signature_is_unauthorized() {
        let foreign = TokenService::new(SigningSecret::new("another-secret-of-at-least-32-bytes!!"));
        let token = foreign.issue(&UserId::new().to_string()).unwrap();

        let (status, _) = send(
            app(untouched_user_service()),
            Some(&format!("Bearer {}", token)),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_token_without_subject_is_unauthorized() {
        let token = token_service()
            .sign(&Claims::new().with_expiration(Utc::now().timestamp() + 3600))
            .unwrap();

        let (status, _) = send(
            app(untouched_user_service()),
            Some(&format!("Bearer {}", token)),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_unknown_subject_is_not_found() {
        let user_id = UserId::new();
        let token = token_service().issue(&user_id.to_string()).unwrap();

        let mut user_service = MockTestUserService::new();
        user_service
            .expect_find_identity()
            .withf(move |id| *id == user_id)
            .times(1)
            .returning(|_| Ok(None));

        let (status, body) = send(app(user_service), Some(&format!("Bearer {}", token))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains(UNKNOWN_USER_MESSAGE));
    }

    #[tokio::test]
    async fn test_non_uuid_subject_is_not_found_without_lookup() {
        let token = token_service().issue("alice").unwrap();

        let (status, _) = send(
            app(untouched_user_service()),
            Some(&format!("Bearer {}", token)),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_lookup_failure_is_internal_error() {
        let token = token_service().issue(&UserId::new().to_string()).unwrap();

        let mut user_service = MockTestUserService::new();
        user_service
            .expect_find_identity()
            .times(1)
            .returning(|_| Err(UserError::DatabaseError("connection reset".to_string())));

        let (status, body) = send(app(user_service), Some(&format!("Bearer {}", token))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.contains("connection reset"));
    }

    #[tokio::test]
    async fn test_valid_token_attaches_identity() {
        let user_id = UserId::new();
        let token = token_service().issue(&user_id.to_string()).unwrap();

        let mut user_service = MockTestUserService::new();
        user_service
            .expect_find_identity()
            .withf(move |id| *id == user_id)
            .times(1)
            .returning(|id| Ok(Some(*id)));

        let (status, body) = send(app(user_service), Some(&format!("Bearer {}", token))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, user_id.to_string());
    }

    #[tokio::test]
    async fn test_token_is_second_segment_regardless_of_scheme() {
        let user_id = UserId::new();
        let token = token_service().issue(&user_id.to_string()).unwrap();

        let mut user_service = MockTestUserService::new();
        user_service
            .expect_find_identity()
            .times(1)
            .returning(|id| Ok(Some(*id)));

        let (status, _) = send(app(user_service), Some(&format!("Token {}", token))).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[test]
    fn test_extract_token() {
        let mut headers = HeaderMap::new();
        assert!(matches!(
            extract_token_from_header(&headers),
            Err(AccessDenied::MissingHeader)
        ));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        assert_eq!(extract_token_from_header(&headers).unwrap(), "abc");

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("abc"));
        assert!(matches!(
            extract_token_from_header(&headers),
            Err(AccessDenied::MissingToken)
        ));
    }
}
