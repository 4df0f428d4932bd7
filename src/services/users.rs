//! User directory service: registration, login, credential handling

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::user::{RegisterUser, Role, User, UserStatus},
    repository::Repository,
};

/// Hash a password with a fresh random salt (Argon2id)
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

/// Verify a password against a stored PHC hash string.
/// Constant-time comparison inside argon2, never string equality.
pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
}

impl UsersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Register a new user. Username uniqueness is enforced here, not
    /// by the storage layer. Role defaults to student and status to
    /// active when the request leaves them unset.
    pub async fn register(&self, request: RegisterUser) -> AppResult<User> {
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        if self.repository.users.username_exists(&request.username).await? {
            return Err(AppError::DuplicateUsername(
                "Username already exists".to_string(),
            ));
        }

        let password_hash = hash_password(&request.password)?;
        let role = request.role.unwrap_or(Role::Student);
        let status = request.status.unwrap_or(UserStatus::Active);

        self.repository
            .users
            .create(&request.username, &password_hash, role, status)
            .await
    }

    /// Authenticate a user by username and password. The failure is the
    /// same whichever of the two was wrong.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<User> {
        let user = self
            .repository
            .users
            .get_by_username(username)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !verify_password(password, &user.password)? {
            return Err(AppError::InvalidCredentials);
        }

        Ok(user)
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<User> {
        self.repository.users.get_by_id(id).await
    }

    /// List all users
    pub async fn list(&self) -> AppResult<Vec<User>> {
        self.repository.users.list_all().await
    }

    /// Update a user's status (admin operation)
    pub async fn update_status(&self, id: i64, status: UserStatus) -> AppResult<User> {
        self.repository.users.update_status(id, status).await
    }

    /// Delete a user
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.repository.users.delete(id).await
    }

    /// Seed default accounts on an empty users table
    pub async fn seed_default_users(&self) -> AppResult<()> {
        if self.repository.users.count().await? > 0 {
            return Ok(());
        }

        tracing::info!("Users table is empty, creating default accounts");

        for (username, role) in [
            ("admin", Role::Admin),
            ("teacher", Role::Teacher),
            ("student", Role::Student),
        ] {
            let password_hash = hash_password("password")?;
            self.repository
                .users
                .create(username, &password_hash, role, UserStatus::Active)
                .await?;
            tracing::info!(username, "Default user created");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_never_the_plaintext() {
        let hash = hash_password("password").unwrap();
        assert_ne!(hash, "password");
        assert!(hash.starts_with("$argon2"));
    }

    #[test]
    fn verify_accepts_correct_password() {
        let hash = hash_password("s3cret").unwrap();
        assert!(verify_password("s3cret", &hash).unwrap());
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let hash = hash_password("s3cret").unwrap();
        assert!(!verify_password("not-it", &hash).unwrap());
    }

    #[test]
    fn two_hashes_of_the_same_password_differ() {
        // salted: equal inputs must not produce equal hashes
        let a = hash_password("password").unwrap();
        let b = hash_password("password").unwrap();
        assert_ne!(a, b);
    }
}
