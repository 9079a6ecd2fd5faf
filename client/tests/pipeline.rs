use enrollment_client::{
    config::{
        ConfirmationPolicy,
        ProgramConfig,
    },
    connection::Ledger,
    e2e_helpers::{
        test_accounts::{
            USER_1,
            USER_2,
        },
        MockLedger,
        BLOCKHASH_VALIDITY,
    },
    error::{
        EnrollError,
        MissingSignerError,
        PrerequisiteError,
        SubmissionError,
    },
    instructions::{
        InitializeBuilder,
        SubmitTsBuilder,
    },
    keys::SigningIdentity,
    pda::{
        find_collection_authority,
        find_enrollment_address,
    },
    pipeline::Enrollment,
    transactions::TransactionAssembler,
};

#[tokio::test]
async fn initialize_creates_enrollment_account() -> anyhow::Result<()> {
    let ledger = MockLedger::new();
    let config = ProgramConfig::default();
    let enrollment = Enrollment::new(&ledger, &config, &USER_1, ConfirmationPolicy::default());

    let account = enrollment.enrollment_account()?.address;
    assert!(!ledger.has_account(&account));

    let result = enrollment.initialize("octocat").await?;
    assert!(ledger.has_account(&account));
    assert_eq!(ledger.submitted(), vec![result.signature]);
    assert_eq!(result.commitment, ConfirmationPolicy::default().commitment);
    Ok(())
}

#[tokio::test]
async fn submit_ts_after_initialize() -> anyhow::Result<()> {
    let ledger = MockLedger::new();
    let config = ProgramConfig::default();
    let enrollment = Enrollment::new(&ledger, &config, &USER_1, ConfirmationPolicy::default());

    enrollment.initialize("octocat").await?;
    let mint = SigningIdentity::generate();
    let result = enrollment.submit_ts(&mint).await?;

    assert_eq!(ledger.submission_count(), 2);
    assert_eq!(ledger.submitted()[1], result.signature);
    assert_eq!(ledger.anchors_fetched(), 2);
    Ok(())
}

#[tokio::test]
async fn submit_ts_requires_initialized_account() -> anyhow::Result<()> {
    let ledger = MockLedger::new();
    let config = ProgramConfig::default();
    let enrollment = Enrollment::new(&ledger, &config, &USER_2, ConfirmationPolicy::default());
    let account = enrollment.enrollment_account()?.address;

    let err = enrollment
        .submit_ts(&SigningIdentity::generate())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        EnrollError::Prerequisite(PrerequisiteError::NotInitialized { account: a }) if a == account
    ));
    assert_eq!(err.exit_code(), 10);
    assert_eq!(ledger.submission_count(), 0);
    assert_eq!(ledger.anchors_fetched(), 0);
    Ok(())
}

#[tokio::test]
async fn existing_account_satisfies_prerequisite() -> anyhow::Result<()> {
    let config = ProgramConfig::default();
    let account = find_enrollment_address(&config, &USER_2.address())?.address;
    let ledger = MockLedger::new().with_account(account);
    let enrollment = Enrollment::new(&ledger, &config, &USER_2, ConfirmationPolicy::default());

    enrollment.submit_ts(&SigningIdentity::generate()).await?;
    assert_eq!(ledger.submission_count(), 1);
    Ok(())
}

#[tokio::test]
async fn expired_anchor_is_rejected_then_rebuilt() -> anyhow::Result<()> {
    let ledger = MockLedger::new();
    let config = ProgramConfig::default();
    let account = find_enrollment_address(&config, &USER_1.address())?.address;

    let stale = ledger.latest_anchor().await?;
    let instruction = InitializeBuilder::new(&config)
        .user(USER_1.address())
        .account(account)
        .github("octocat")
        .build()?;
    let signed = TransactionAssembler::new(&USER_1, stale)
        .instruction(instruction)
        .assemble()?
        .sign(&[&*USER_1])?;

    ledger.advance_block_height(BLOCKHASH_VALIDITY + 1);
    let err = ledger
        .submit(&signed, &ConfirmationPolicy::default())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        EnrollError::Submission(SubmissionError::BlockhashExpired)
    ));
    assert_eq!(ledger.submission_count(), 1);
    assert!(!ledger.has_account(&account));

    // A fresh run fetches a new anchor.
    let enrollment = Enrollment::new(&ledger, &config, &USER_1, ConfirmationPolicy::default());
    let result = enrollment.initialize("octocat").await?;
    assert_ne!(result.signature, signed.signature());
    assert_eq!(ledger.submission_count(), 2);
    assert!(ledger.has_account(&account));
    Ok(())
}

#[tokio::test]
async fn missing_signer_stops_before_submission() -> anyhow::Result<()> {
    let ledger = MockLedger::new();
    let config = ProgramConfig::default();
    let enrollment = Enrollment::new(&ledger, &config, &USER_1, ConfirmationPolicy::default());
    let mint = SigningIdentity::generate();

    let instruction = SubmitTsBuilder::new(&config)
        .user(USER_1.address())
        .account(enrollment.enrollment_account()?.address)
        .mint(mint.address())
        .collection(config.collection)
        .authority(find_collection_authority(&config)?.address)
        .build()?;

    let err = enrollment
        .send(vec![instruction], &[mint.address()], &[&*USER_1])
        .await
        .unwrap_err();

    match err {
        EnrollError::MissingSigner(MissingSignerError { missing }) => {
            assert_eq!(missing, vec![mint.address()]);
        }
        other => panic!("expected MissingSigner, got {other:?}"),
    }
    assert_eq!(ledger.anchors_fetched(), 0);
    assert_eq!(ledger.submission_count(), 0);
    Ok(())
}

#[tokio::test]
async fn instruction_signers_are_checked_before_fetching_anchor() -> anyhow::Result<()> {
    let ledger = MockLedger::new();
    let config = ProgramConfig::default();
    let enrollment = Enrollment::new(&ledger, &config, &USER_1, ConfirmationPolicy::default());
    let mint = SigningIdentity::generate();

    let instruction = SubmitTsBuilder::new(&config)
        .user(USER_1.address())
        .account(enrollment.enrollment_account()?.address)
        .mint(mint.address())
        .collection(config.collection)
        .authority(find_collection_authority(&config)?.address)
        .build()?;

    // The mint is only marked as a signer in the instruction's accounts.
    let err = enrollment
        .send(vec![instruction], &[], &[&*USER_2])
        .await
        .unwrap_err();

    match err {
        EnrollError::MissingSigner(MissingSignerError { missing }) => {
            assert_eq!(missing, vec![USER_1.address(), mint.address()]);
        }
        other => panic!("expected MissingSigner, got {other:?}"),
    }
    assert_eq!(ledger.anchors_fetched(), 0);
    assert_eq!(ledger.submission_count(), 0);
    Ok(())
}
