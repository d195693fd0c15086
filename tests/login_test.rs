mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{enroll, harness, harness_with, ALICE, BOB};
use pqc_hybrid_auth::{
    AuthConfig, AuthError, AuthProtocolBuilder, ChallengeError, DilithiumLevel, Error, LoginResponse, Result, LOGIN_FAILURE_REASON,
};

// ----- Login Tests -----

#[test]
fn test_login_success() -> Result<()> {
    let h = harness();
    enroll(&h.service, &ALICE, "alice")?;

    let grant = h.service.start_login("alice")?;
    let result = h.service.finish_login_response(&ALICE.login_response("alice", &grant.challenge))?;
    assert!(result.ok);

    let session = result.session.expect("session on success");
    let context = h.service.authenticate_token(&session.token)?;
    assert_eq!(context.identity_id, grant.identity_id);

    let credentials = h.service.user_credentials(&context)?;
    assert_eq!(credentials.username, "alice");
    assert_eq!(credentials.email.as_deref(), Some("alice@example.com"));
    assert_eq!(credentials.classical_public_key, ALICE.classical_public_key_b64());
    assert_eq!(credentials.pq_public_key, ALICE.pq_public_key_b64());
    Ok(())
}

#[test]
fn test_login_with_plain_strings() -> Result<()> {
    let h = harness();
    enroll(&h.service, &ALICE, "alice")?;

    let grant = h.service.start_login("alice")?;
    let proof = ALICE.sign_challenge(&grant.challenge);
    let result = h.service.finish_login("alice", &proof.classical_signature, &proof.pq_signature)?;
    assert!(result.ok);
    Ok(())
}

#[test]
fn test_partial_validity_fails() -> Result<()> {
    let h = harness();
    enroll(&h.service, &ALICE, "alice")?;

    // Valid RSA, invalid Dilithium
    let grant = h.service.start_login("alice")?;
    let mut response = ALICE.login_response("alice", &grant.challenge);
    response.pq_signature = BOB.sign_challenge(&grant.challenge).pq_signature;
    let result = h.service.finish_login_response(&response)?;
    assert!(!result.ok);
    assert_eq!(result.reason.as_deref(), Some(LOGIN_FAILURE_REASON));

    // Invalid RSA, valid Dilithium
    let grant = h.service.start_login("alice")?;
    let mut response = ALICE.login_response("alice", &grant.challenge);
    response.classical_signature = BOB.sign_challenge(&grant.challenge).classical_signature;
    let result = h.service.finish_login_response(&response)?;
    assert!(!result.ok);
    Ok(())
}

#[test]
fn test_signature_does_not_transfer_between_challenges() -> Result<()> {
    let h = harness();
    enroll(&h.service, &ALICE, "alice")?;

    let first = h.service.start_login("alice")?;
    let proof = ALICE.sign_challenge(&first.challenge);
    let second = h.service.start_login("alice")?;

    let response = LoginResponse {
        username: "alice".into(),
        classical_signature: proof.classical_signature,
        pq_signature: proof.pq_signature,
        challenge: Some(second.challenge),
    };
    let result = h.service.finish_login_response(&response)?;
    assert!(!result.ok);
    Ok(())
}

#[test]
fn test_reissued_challenge_invalidates_previous() -> Result<()> {
    let h = harness();
    enroll(&h.service, &ALICE, "alice")?;

    let first = h.service.start_login("alice")?;
    let _second = h.service.start_login("alice")?;

    let result = h.service.finish_login_response(&ALICE.login_response("alice", &first.challenge))?;
    assert!(!result.ok);
    Ok(())
}

#[test]
fn test_expired_challenge_fails_with_valid_signatures() -> Result<()> {
    let h = harness();
    enroll(&h.service, &ALICE, "alice")?;

    let grant = h.service.start_login("alice")?;
    h.clock.advance(AuthConfig::default().challenge_ttl + Duration::from_secs(1));

    let result = h.service.finish_login_response(&ALICE.login_response("alice", &grant.challenge))?;
    assert!(!result.ok);

    let detail = h
        .service
        .protocol()
        .finish_login(&ALICE.login_response("alice", &grant.challenge));
    assert!(matches!(detail, Err(Error::Authentication(AuthError::Challenge(ChallengeError::NotFound)))));
    Ok(())
}

#[test]
fn test_short_challenge_ttl() -> Result<()> {
    let h = harness_with(AuthConfig::default().with_challenge_ttl(Duration::from_secs(5)));
    enroll(&h.service, &ALICE, "alice")?;

    let grant = h.service.start_login("alice")?;
    h.clock.advance(Duration::from_secs(4));
    assert!(h.service.finish_login_response(&ALICE.login_response("alice", &grant.challenge))?.ok);

    let grant = h.service.start_login("alice")?;
    h.clock.advance(Duration::from_secs(6));
    assert!(!h.service.finish_login_response(&ALICE.login_response("alice", &grant.challenge))?.ok);
    Ok(())
}

#[test]
fn test_replay_rejected() -> Result<()> {
    let h = harness();
    enroll(&h.service, &ALICE, "alice")?;

    let grant = h.service.start_login("alice")?;
    let response = ALICE.login_response("alice", &grant.challenge);
    assert!(h.service.finish_login_response(&response)?.ok);
    assert!(!h.service.finish_login_response(&response)?.ok);
    Ok(())
}

#[test]
fn test_cross_identity_signatures_rejected() -> Result<()> {
    let h = harness();
    enroll(&h.service, &ALICE, "alice")?;
    enroll(&h.service, &BOB, "bob")?;

    // Bob answers Alice's challenge with his own keys
    let grant = h.service.start_login("alice")?;
    let result = h.service.finish_login_response(&BOB.login_response("alice", &grant.challenge))?;
    assert!(!result.ok);

    // Bob's own login is unaffected
    let grant = h.service.start_login("bob")?;
    assert!(h.service.finish_login_response(&BOB.login_response("bob", &grant.challenge))?.ok);
    Ok(())
}

#[test]
fn test_failures_do_not_reveal_identity_existence() -> Result<()> {
    let h = harness();
    enroll(&h.service, &ALICE, "alice")?;
    h.service.start_enroll("pending", None)?;

    let grant = h.service.start_login("alice")?;
    let mut wrong = ALICE.login_response("alice", &grant.challenge);
    wrong.pq_signature = BOB.sign_challenge(&grant.challenge).pq_signature;

    let outcomes = [
        h.service.finish_login_response(&ALICE.login_response("nobody", "c"))?,
        h.service.finish_login_response(&ALICE.login_response("pending", "c"))?,
        h.service.finish_login_response(&wrong)?,
    ];
    for outcome in &outcomes {
        assert_eq!(outcome, &outcomes[0]);
        assert_eq!(outcome.reason.as_deref(), Some(LOGIN_FAILURE_REASON));
    }

    // start_login fails the same way for unknown and unenrolled names
    let unknown = h.service.start_login("nobody").expect_err("unknown");
    let pending = h.service.start_login("pending").expect_err("not enrolled");
    assert_eq!(unknown.to_string(), pending.to_string());
    Ok(())
}

#[test]
fn test_truncated_signature_is_rejection_not_error() -> Result<()> {
    let h = harness();
    enroll(&h.service, &ALICE, "alice")?;

    let grant = h.service.start_login("alice")?;
    let mut response = ALICE.login_response("alice", &grant.challenge);
    response.classical_signature = "AAAA".into();

    let result = h.service.finish_login_response(&response)?;
    assert!(!result.ok);
    Ok(())
}

#[test]
fn test_parallel_login_single_winner() -> Result<()> {
    let h = harness();
    enroll(&h.service, &ALICE, "alice")?;

    let grant = h.service.start_login("alice")?;
    let response = Arc::new(ALICE.login_response("alice", &grant.challenge));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let service = h.service.clone();
            let response = Arc::clone(&response);
            std::thread::spawn(move || service.finish_login_response(&response))
        })
        .collect();

    let mut successes = 0;
    for handle in handles {
        if handle.join().expect("thread")?.ok {
            successes += 1;
        }
    }
    assert_eq!(successes, 1);
    Ok(())
}

#[test]
fn test_session_revocation() -> Result<()> {
    let h = harness();
    enroll(&h.service, &ALICE, "alice")?;

    let grant = h.service.start_login("alice")?;
    let session = h
        .service
        .finish_login_response(&ALICE.login_response("alice", &grant.challenge))?
        .session
        .expect("session");

    h.service.logout(&session.token)?;
    assert!(matches!(
        h.service.authenticate_token(&session.token),
        Err(Error::Authentication(AuthError::InvalidSession))
    ));
    Ok(())
}

#[test]
fn test_strict_preset_rejects_small_rsa() -> Result<()> {
    let service = AuthProtocolBuilder::new()
        .strict()
        .with_dilithium(DilithiumLevel::Dilithium3)
        .build_service()?;

    // 2048-bit RSA keys are below the strict minimum
    let grant = service.start_enroll("alice", None)?;
    let err = service
        .finish_enroll_response(&ALICE.enrollment_response("alice", &grant.challenge))
        .expect_err("strict preset requires RSA-3072");
    assert!(err.is_malformed());
    Ok(())
}
