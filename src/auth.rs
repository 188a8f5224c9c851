/// Auth gateway: wraps the collaborator's sign-in/sign-up calls and
/// turns tagged backend errors into the messages the forms show.
use crate::backend::{BackendApi, BackendError, BackendErrorKind, Session};

pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Please fill in all required fields.")]
    MissingFields,
    #[error("Password must be at least {MIN_PASSWORD_LEN} characters long.")]
    PasswordTooShort,
    #[error("Incorrect email or password.")]
    InvalidCredentials,
    #[error("This email is already registered. Try signing in instead.")]
    EmailAlreadyRegistered,
    #[error("Sign-ups are currently disabled.")]
    SignupsDisabled,
    #[error("Cannot reach LitLens. Check your connection and try again.")]
    Unreachable,
    #[error("Something went wrong. Please try again.")]
    Failed,
}

impl From<BackendError> for AuthError {
    fn from(err: BackendError) -> Self {
        match err.kind {
            BackendErrorKind::InvalidCredentials => AuthError::InvalidCredentials,
            BackendErrorKind::EmailAlreadyRegistered => AuthError::EmailAlreadyRegistered,
            BackendErrorKind::SignupsDisabled => AuthError::SignupsDisabled,
            BackendErrorKind::Network => AuthError::Unreachable,
            _ => AuthError::Failed,
        }
    }
}

pub async fn sign_in(
    api: &dyn BackendApi,
    email: &str,
    password: &str,
) -> Result<Session, AuthError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(AuthError::MissingFields);
    }
    Ok(api.sign_in(email.trim(), password).await?)
}

pub async fn sign_up(
    api: &dyn BackendApi,
    email: &str,
    password: &str,
    user_name: &str,
) -> Result<Session, AuthError> {
    if email.trim().is_empty() || password.is_empty() || user_name.trim().is_empty() {
        return Err(AuthError::MissingFields);
    }
    if password.len() < MIN_PASSWORD_LEN {
        return Err(AuthError::PasswordTooShort);
    }
    Ok(api.sign_up(email.trim(), password, user_name.trim()).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;

    #[tokio::test]
    async fn sign_in_requires_both_fields() {
        let backend = MemoryBackend::new();
        let err = sign_in(&backend, "", "secret123").await.unwrap_err();
        assert_eq!(err, AuthError::MissingFields);
        let err = sign_in(&backend, "a@b.com", "").await.unwrap_err();
        assert_eq!(err, AuthError::MissingFields);
    }

    #[tokio::test]
    async fn sign_in_maps_bad_credentials() {
        let backend = MemoryBackend::new().with_account("a@b.com", "secret123", "alice");
        let err = sign_in(&backend, "a@b.com", "wrong-pass").await.unwrap_err();
        assert_eq!(err, AuthError::InvalidCredentials);

        let session = sign_in(&backend, "a@b.com", "secret123").await.unwrap();
        assert_eq!(session.user_name, "alice");
    }

    #[tokio::test]
    async fn sign_up_enforces_password_length() {
        let backend = MemoryBackend::new();
        let err = sign_up(&backend, "a@b.com", "short", "alice").await.unwrap_err();
        assert_eq!(err, AuthError::PasswordTooShort);
    }

    #[tokio::test]
    async fn sign_up_maps_duplicate_and_disabled() {
        let backend = MemoryBackend::new().with_account("a@b.com", "secret123", "alice");
        let err = sign_up(&backend, "a@b.com", "secret123", "alice2")
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::EmailAlreadyRegistered);

        let backend = MemoryBackend::new().with_signups_disabled();
        let err = sign_up(&backend, "new@b.com", "secret123", "bob")
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::SignupsDisabled);
    }

    #[tokio::test]
    async fn network_failures_map_to_unreachable() {
        let backend = MemoryBackend::new().with_account("a@b.com", "secret123", "alice");
        backend.set_offline(true);
        let err = sign_in(&backend, "a@b.com", "secret123").await.unwrap_err();
        assert_eq!(err, AuthError::Unreachable);
    }
}
