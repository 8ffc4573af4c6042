//! Authentication service: registration, login, token verification, and
//! profile updates.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{Config, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER};
use crate::domain::{Password, UpdateUser, User, UserRole};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// JWT claims payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

/// Token response returned after successful authentication
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token expiration time in seconds
    #[schema(example = 86400)]
    pub expires_in: i64,
}

#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user with the given role
    async fn register(
        &self,
        email: String,
        password: String,
        name: String,
        role: UserRole,
    ) -> AppResult<User>;

    /// Login and return a JWT token
    async fn login(&self, email: String, password: String) -> AppResult<TokenResponse>;

    /// Verify a JWT token and extract its claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;

    /// Load the authenticated user's own record
    async fn current_user(&self, id: Uuid) -> AppResult<User>;

    /// Update the authenticated user's name and/or password
    async fn update_profile(
        &self,
        id: Uuid,
        name: Option<String>,
        password: Option<String>,
    ) -> AppResult<User>;
}

fn generate_token(user: &User, config: &Config) -> AppResult<TokenResponse> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(config.jwt_expiration_hours);

    let claims = Claims {
        sub: user.id,
        email: user.email.clone(),
        role: user.role.to_string(),
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?;

    Ok(TokenResponse {
        access_token: token,
        token_type: TOKEN_TYPE_BEARER.to_string(),
        expires_in: config.jwt_expiration_hours * SECONDS_PER_HOUR,
    })
}

/// Concrete implementation of AuthService over the Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    config: Config,
}

impl<U: UnitOfWork> Authenticator<U> {
    pub fn new(uow: Arc<U>, config: Config) -> Self {
        Self { uow, config }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn register(
        &self,
        email: String,
        password: String,
        name: String,
        role: UserRole,
    ) -> AppResult<User> {
        if self.uow.users().find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("A user with this email already exists"));
        }

        let password_hash = Password::new(&password)?.into_string();
        self.uow.users().create(email, password_hash, name, role).await
    }

    async fn login(&self, email: String, password: String) -> AppResult<TokenResponse> {
        let user_result = self.uow.users().find_by_email(&email).await?;

        // Verify against a dummy hash when the user is missing so response
        // timing does not reveal which emails exist.
        let dummy_hash =
            "$argon2id$v=19$m=19456,t=2,p=1$dummysalt123456$dummyhash1234567890123456789012";

        let (password_hash, user_exists) = match &user_result {
            Some(user) => (user.password_hash.as_str(), true),
            None => (dummy_hash, false),
        };

        let stored_password = Password::from_hash(password_hash.to_string());
        let password_valid = stored_password.verify(&password);

        if !user_exists || !password_valid {
            return Err(AppError::InvalidCredentials);
        }

        let user = user_result.as_ref().ok_or(AppError::InvalidCredentials)?;
        if !user.is_active() {
            return Err(AppError::Unauthorized);
        }

        generate_token(user, &self.config)
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }

    async fn current_user(&self, id: Uuid) -> AppResult<User> {
        self.uow
            .users()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn update_profile(
        &self,
        id: Uuid,
        name: Option<String>,
        password: Option<String>,
    ) -> AppResult<User> {
        let password_hash = match password {
            Some(plain) => Some(Password::new(&plain)?.into_string()),
            None => None,
        };

        let changes = UpdateUser {
            name,
            ..Default::default()
        };

        self.uow.users().update(id, changes, password_hash).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserStatus;
    use crate::services::testing::StubUow;

    fn test_user(hash: String, status: UserStatus) -> User {
        User {
            id: Uuid::new_v4(),
            email: "user@example.com".to_string(),
            password_hash: hash,
            name: "Test User".to_string(),
            role: UserRole::User,
            status,
            group_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn authenticator(uow: StubUow) -> Authenticator<StubUow> {
        Authenticator::new(
            Arc::new(uow),
            Config::for_tests("test-secret-key-for-testing-only-32chars"),
        )
    }

    #[tokio::test]
    async fn login_issues_verifiable_token() {
        let hash = Password::new("CorrectHorse9!").unwrap().into_string();
        let user = test_user(hash, UserStatus::Active);
        let user_id = user.id;

        let mut repo = crate::infra::repositories::MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));

        let service = authenticator(StubUow::with_users(repo));
        let token = service
            .login("user@example.com".to_string(), "CorrectHorse9!".to_string())
            .await
            .unwrap();

        let claims = service.verify_token(&token.access_token).unwrap();
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.role, "user");
    }

    #[tokio::test]
    async fn login_rejects_wrong_password() {
        let hash = Password::new("CorrectHorse9!").unwrap().into_string();
        let user = test_user(hash, UserStatus::Active);

        let mut repo = crate::infra::repositories::MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));

        let service = authenticator(StubUow::with_users(repo));
        let result = service
            .login("user@example.com".to_string(), "WrongHorse9!".to_string())
            .await;

        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn login_rejects_unknown_email() {
        let mut repo = crate::infra::repositories::MockUserRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));

        let service = authenticator(StubUow::with_users(repo));
        let result = service
            .login("ghost@example.com".to_string(), "AnyPassword1".to_string())
            .await;

        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn login_rejects_inactive_account() {
        let hash = Password::new("CorrectHorse9!").unwrap().into_string();
        let user = test_user(hash, UserStatus::Inactive);

        let mut repo = crate::infra::repositories::MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));

        let service = authenticator(StubUow::with_users(repo));
        let result = service
            .login("user@example.com".to_string(), "CorrectHorse9!".to_string())
            .await;

        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn register_rejects_duplicate_email() {
        let hash = Password::new("CorrectHorse9!").unwrap().into_string();
        let user = test_user(hash, UserStatus::Active);

        let mut repo = crate::infra::repositories::MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));

        let service = authenticator(StubUow::with_users(repo));
        let result = service
            .register(
                "user@example.com".to_string(),
                "CorrectHorse9!".to_string(),
                "Test".to_string(),
                UserRole::User,
            )
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }
}
