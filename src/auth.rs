//! Email and password identity for salon staff.
//!
//! [`PasswordIdentity`] keeps argon2 hashes in the `credentials` table and
//! remembers the signed-in user for the lifetime of the value.

use std::sync::{PoisonError, RwLock};

use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use log::{info, warn};
use password_hash::rand_core::OsRng;
use thiserror::Error;

use crate::domain::types::{EmployeeEmail, EmployeeId};
use crate::repository::errors::RepositoryError;
use crate::repository::{CredentialReader, CredentialWriter, EmployeeReader, StoredCredential};

/// Shortest password accepted at sign-up and by the login screen.
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("invalid email address")]
    InvalidEmail,

    #[error("email is already registered")]
    EmailTaken,

    #[error("password must be at least {MIN_PASSWORD_LEN} characters")]
    WeakPassword,

    #[error("password hashing failed: {0}")]
    Hashing(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

pub type AuthResult<T> = Result<T, AuthError>;

/// Sign-in session against an external identity service.
pub trait IdentityProvider {
    fn sign_in(&self, email: &str, password: &str) -> AuthResult<EmployeeId>;
    /// Registers the email and signs it in.
    fn sign_up(&self, email: &str, password: &str) -> AuthResult<EmployeeId>;
    fn sign_out(&self);
    fn is_signed_in(&self) -> bool;
    fn current_user_id(&self) -> Option<EmployeeId>;
}

pub struct PasswordIdentity<R> {
    repo: R,
    current: RwLock<Option<EmployeeId>>,
}

impl<R> PasswordIdentity<R>
where
    R: CredentialReader + CredentialWriter + EmployeeReader,
{
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            current: RwLock::new(None),
        }
    }

    fn set_current(&self, user: Option<EmployeeId>) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = user;
    }
}

fn hash_password(password: &str) -> AuthResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Hashing(e.to_string()))
}

fn verify_password(password: &str, hash: &str) -> AuthResult<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| AuthError::Hashing(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

impl<R> IdentityProvider for PasswordIdentity<R>
where
    R: CredentialReader + CredentialWriter + EmployeeReader,
{
    fn sign_in(&self, email: &str, password: &str) -> AuthResult<EmployeeId> {
        let email = EmployeeEmail::new(email).map_err(|_| AuthError::InvalidCredentials)?;

        let Some(credential) = self.repo.get_credential(&email)? else {
            warn!("sign-in for unknown email {email}");
            return Err(AuthError::InvalidCredentials);
        };

        if !verify_password(password, &credential.password_hash)? {
            warn!("wrong password for {email}");
            return Err(AuthError::InvalidCredentials);
        }

        info!("{email} signed in");
        self.set_current(Some(credential.user_id.clone()));
        Ok(credential.user_id)
    }

    fn sign_up(&self, email: &str, password: &str) -> AuthResult<EmployeeId> {
        let email = EmployeeEmail::new(email).map_err(|_| AuthError::InvalidEmail)?;
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::WeakPassword);
        }
        if self.repo.get_credential(&email)?.is_some() {
            return Err(AuthError::EmailTaken);
        }

        // Staff rows and logins share an id when the employee already exists.
        let user_id = match self.repo.get_employee_by_email(&email)? {
            Some(employee) => employee.id,
            None => EmployeeId::generate(),
        };

        let credential = StoredCredential {
            user_id: user_id.clone(),
            password_hash: hash_password(password)?,
        };
        self.repo.create_credential(&email, &credential)?;

        info!("registered login for {email}");
        self.set_current(Some(user_id.clone()));
        Ok(user_id)
    }

    fn sign_out(&self) {
        self.set_current(None);
    }

    fn is_signed_in(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    fn current_user_id(&self) -> Option<EmployeeId> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
