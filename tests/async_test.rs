#![cfg(feature = "async")]

mod common;

use common::{ALICE, BOB};
use pqc_hybrid_auth::{AuthProtocolBuilder, Result, LOGIN_FAILURE_REASON};

#[tokio::test]
async fn test_async_enroll_login_and_credentials() -> Result<()> {
    let service = AuthProtocolBuilder::new().build_async_service()?;

    let grant = service.start_enroll("alice", Some("alice@example.com")).await?;
    let enrolled = service.finish_enroll(ALICE.enrollment_response("alice", &grant.challenge)).await?;
    assert!(enrolled.ok);

    let grant = service.start_login("alice").await?;
    let result = service.finish_login(ALICE.login_response("alice", &grant.challenge)).await?;
    let session = result.session.expect("session on success");

    let context = service.authenticate_token(&session.token).await?;
    let credentials = service.user_credentials(context).await?;
    assert_eq!(credentials.pq_public_key, ALICE.pq_public_key_b64());
    Ok(())
}

#[tokio::test]
async fn test_async_rejection() -> Result<()> {
    let service = AuthProtocolBuilder::new().build_async_service()?;

    let grant = service.start_enroll("alice", None).await?;
    service.finish_enroll(ALICE.enrollment_response("alice", &grant.challenge)).await?;

    let grant = service.start_login("alice").await?;
    let result = service.finish_login(BOB.login_response("alice", &grant.challenge)).await?;
    assert!(!result.ok);
    assert_eq!(result.reason.as_deref(), Some(LOGIN_FAILURE_REASON));
    Ok(())
}
