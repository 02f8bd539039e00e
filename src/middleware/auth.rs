//! Authentication and tenant-scope extractors
//!
//! Provides:
//! - `Identity` - the verified caller, tagged by role
//! - `AdminGuard` - admin-only routes
//! - `BrandScope` - store routes that only need the caller's brand
//! - `TenantScope` - store routes that operate on the brand's active hotel
//!
//! Scope values are handler parameters; nothing is stashed in request
//! extensions. The resolver chain is: bearer token → store role → brand
//! ownership → first hotel of the brand.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::domain::StringUuid;
use crate::error::AppError;
use crate::jwt::Claims;
use crate::repository::{BrandRepository, HotelRepository};
use crate::state::HasServices;

/// The authenticated caller, decoded from bearer token claims
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    Consumer {
        user_id: StringUuid,
    },
    Store {
        user_id: StringUuid,
        brand_id: StringUuid,
    },
    Admin {
        user_id: StringUuid,
    },
}

impl Identity {
    pub fn user_id(&self) -> StringUuid {
        match self {
            Identity::Consumer { user_id }
            | Identity::Store { user_id, .. }
            | Identity::Admin { user_id } => *user_id,
        }
    }

    /// Map verified claims onto the role variants. A store token without a
    /// brand claim is malformed and treated as unauthenticated.
    pub fn from_claims(claims: &Claims) -> Result<Self, AppError> {
        let user_id = StringUuid::parse_str(&claims.sub)
            .map_err(|_| AppError::Unauthorized("未登入或 token 失效".to_string()))?;

        match claims.role.as_str() {
            "consumer" => Ok(Identity::Consumer { user_id }),
            "admin" => Ok(Identity::Admin { user_id }),
            "store" => {
                let brand_id = claims
                    .brand_id
                    .as_deref()
                    .and_then(|s| StringUuid::parse_str(s).ok())
                    .ok_or_else(|| AppError::Unauthorized("未登入或 token 失效".to_string()))?;
                Ok(Identity::Store { user_id, brand_id })
            }
            _ => Err(AppError::Unauthorized("未登入或 token 失效".to_string())),
        }
    }
}

/// Extract and validate the Bearer token from the Authorization header
fn extract_bearer_token(headers: &axum::http::HeaderMap) -> Result<&str, AppError> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| AppError::Unauthorized("未登入或 token 失效".to_string()))?
        .to_str()
        .map_err(|_| AppError::Unauthorized("未登入或 token 失效".to_string()))?;

    auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("未登入或 token 失效".to_string()))
}

impl<S> FromRequestParts<S> for Identity
where
    S: HasServices,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = extract_bearer_token(&parts.headers)?;
        let claims = state
            .jwt_manager()
            .verify(token)
            .map_err(|_| AppError::Unauthorized("未登入或 token 失效".to_string()))?;
        Identity::from_claims(&claims)
    }
}

/// Admin-only guard
#[derive(Debug, Clone)]
pub struct AdminGuard {
    pub user_id: StringUuid,
}

impl<S> FromRequestParts<S> for AdminGuard
where
    S: HasServices,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Identity::from_request_parts(parts, state).await? {
            Identity::Admin { user_id } => Ok(AdminGuard { user_id }),
            Identity::Consumer { .. } | Identity::Store { .. } => {
                Err(AppError::Forbidden("無權限訪問此資源".to_string()))
            }
        }
    }
}

/// Store scope: the caller's brand, ownership verified
#[derive(Debug, Clone, Copy)]
pub struct BrandScope {
    pub user_id: StringUuid,
    pub brand_id: StringUuid,
}

impl<S> FromRequestParts<S> for BrandScope
where
    S: HasServices,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let identity = Identity::from_request_parts(parts, state).await?;

        let (user_id, brand_id) = match identity {
            Identity::Store { user_id, brand_id } => (user_id, brand_id),
            Identity::Consumer { .. } | Identity::Admin { .. } => {
                return Err(AppError::Forbidden("無權限訪問此資源".to_string()))
            }
        };

        // A missing brand and a brand owned by someone else look the same to
        // the caller
        let brand = state
            .brand_repo()
            .find_by_id(brand_id)
            .await?
            .ok_or_else(|| AppError::Forbidden("無權限操作此資料".to_string()))?;

        if brand.user_id != user_id {
            return Err(AppError::Forbidden("無權限操作此資料".to_string()));
        }

        Ok(BrandScope { user_id, brand_id })
    }
}

/// Tenant scope: the caller's brand plus its active hotel
///
/// "First hotel wins": a brand with several hotels can only address the
/// oldest one through this path.
#[derive(Debug, Clone, Copy)]
pub struct TenantScope {
    pub brand_id: StringUuid,
    pub hotel_id: StringUuid,
}

impl<S> FromRequestParts<S> for TenantScope
where
    S: HasServices,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let scope = BrandScope::from_request_parts(parts, state).await?;

        let hotel = state
            .hotel_repo()
            .first_by_brand(scope.brand_id)
            .await?
            .ok_or_else(|| AppError::NotFound("目前尚未建立飯店".to_string()))?;

        Ok(TenantScope {
            brand_id: scope.brand_id,
            hotel_id: hotel.id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::Claims;
    use chrono::Utc;

    fn claims(role: &str, brand_id: Option<&str>) -> Claims {
        let now = Utc::now().timestamp();
        Claims {
            sub: "550e8400-e29b-41d4-a716-446655440000".to_string(),
            role: role.to_string(),
            brand_id: brand_id.map(|s| s.to_string()),
            iss: "roomly".to_string(),
            iat: now,
            exp: now + 3600,
        }
    }

    #[test]
    fn test_identity_from_store_claims() {
        let identity = Identity::from_claims(&claims(
            "store",
            Some("6ba7b810-9dad-11d1-80b4-00c04fd430c8"),
        ))
        .unwrap();

        match identity {
            Identity::Store { user_id, brand_id } => {
                assert_eq!(
                    user_id.to_string(),
                    "550e8400-e29b-41d4-a716-446655440000"
                );
                assert_eq!(
                    brand_id.to_string(),
                    "6ba7b810-9dad-11d1-80b4-00c04fd430c8"
                );
            }
            other => panic!("unexpected identity: {:?}", other),
        }
    }

    #[test]
    fn test_identity_store_without_brand_is_unauthorized() {
        let result = Identity::from_claims(&claims("store", None));
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn test_identity_consumer_and_admin() {
        assert!(matches!(
            Identity::from_claims(&claims("consumer", None)).unwrap(),
            Identity::Consumer { .. }
        ));
        assert!(matches!(
            Identity::from_claims(&claims("admin", None)).unwrap(),
            Identity::Admin { .. }
        ));
    }

    #[test]
    fn test_identity_unknown_role_rejected() {
        let result = Identity::from_claims(&claims("superuser", None));
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn test_identity_bad_sub_rejected() {
        let mut c = claims("consumer", None);
        c.sub = "not-a-uuid".to_string();
        assert!(matches!(
            Identity::from_claims(&c),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_extract_bearer_token() {
        let mut headers = axum::http::HeaderMap::new();
        headers.insert(AUTHORIZATION, "Bearer test-token-123".parse().unwrap());

        let token = extract_bearer_token(&headers).unwrap();
        assert_eq!(token, "test-token-123");
    }

    #[test]
    fn test_extract_bearer_token_missing() {
        let headers = axum::http::HeaderMap::new();
        assert!(matches!(
            extract_bearer_token(&headers),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_extract_bearer_token_wrong_scheme() {
        let mut headers = axum::http::HeaderMap::new();
        headers.insert(AUTHORIZATION, "Basic dXNlcjpwYXNz".parse().unwrap());

        assert!(matches!(
            extract_bearer_token(&headers),
            Err(AppError::Unauthorized(_))
        ));
    }
}
