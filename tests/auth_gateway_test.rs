use litlens::auth::{self, AuthError};
use litlens::backend::MemoryBackend;

#[tokio::test]
async fn sign_up_then_sign_in_round_trips() {
    let backend = MemoryBackend::new();

    let created = auth::sign_up(&backend, " new@litlens.app ", "secret123", " dana ")
        .await
        .unwrap();
    assert_eq!(created.email, "new@litlens.app");
    assert_eq!(created.user_name, "dana");

    let session = auth::sign_in(&backend, "new@litlens.app", "secret123")
        .await
        .unwrap();
    assert_eq!(session.user_name, "dana");
    assert!(!session.is_admin);
}

#[tokio::test]
async fn second_sign_up_with_same_email_is_rejected() {
    let backend = MemoryBackend::new();
    auth::sign_up(&backend, "dana@litlens.app", "secret123", "dana")
        .await
        .unwrap();
    let err = auth::sign_up(&backend, "dana@litlens.app", "secret123", "dana2")
        .await
        .unwrap_err();
    assert_eq!(err, AuthError::EmailAlreadyRegistered);
}
