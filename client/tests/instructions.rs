use enrollment_client::{
    config::ProgramConfig,
    e2e_helpers::test_accounts::USER_1,
    error::ValidationError,
    instructions::{
        InitializeBuilder,
        SubmitTsBuilder,
    },
    keys::SigningIdentity,
    pda::{
        find_collection_authority,
        find_enrollment_address,
    },
};
use enrollment_interface::instructions::{
    initialize,
    submit_ts,
    EnrollmentInstruction,
};

fn submit_builder(config: &ProgramConfig, mint: &SigningIdentity) -> anyhow::Result<SubmitTsBuilder> {
    let user = USER_1.address();
    Ok(SubmitTsBuilder::new(config)
        .user(user)
        .account(find_enrollment_address(config, &user)?.address)
        .mint(mint.address())
        .collection(config.collection)
        .authority(find_collection_authority(config)?.address))
}

#[test]
fn submit_ts_has_fixed_account_roles() -> anyhow::Result<()> {
    let config = ProgramConfig::default();
    let mint = SigningIdentity::generate();
    let ixn = submit_builder(&config, &mint)?.build()?;

    assert_eq!(ixn.program_id, config.program_id);
    assert_eq!(ixn.data, submit_ts::DISCRIMINATOR.to_vec());
    assert_eq!(ixn.accounts.len(), submit_ts::ACCOUNTS.len());
    for (meta, spec) in ixn.accounts.iter().zip(submit_ts::ACCOUNTS) {
        assert_eq!(meta.is_signer, spec.is_signer, "{}", spec.name);
        assert_eq!(meta.is_writable, spec.is_writable, "{}", spec.name);
    }
    assert_eq!(ixn.accounts[0].pubkey, USER_1.address());
    assert_eq!(ixn.accounts[2].pubkey, mint.address());
    assert_eq!(ixn.accounts[5].pubkey, config.mpl_core_program);
    assert_eq!(ixn.accounts[6].pubkey, config.system_program);
    Ok(())
}

#[test]
fn submit_ts_without_mint_fails() {
    let config = ProgramConfig::default();
    let user = USER_1.address();
    let result = SubmitTsBuilder::new(&config)
        .user(user)
        .account(find_enrollment_address(&config, &user).unwrap().address)
        .collection(config.collection)
        .authority(find_collection_authority(&config).unwrap().address)
        .build();

    assert_eq!(
        result,
        Err(ValidationError::MissingAccount {
            instruction: EnrollmentInstruction::SubmitTs,
            account: "mint",
        })
    );
}

#[test]
fn submit_ts_without_programs_fails() -> anyhow::Result<()> {
    let config = ProgramConfig::default();
    let mint = SigningIdentity::generate();

    let result = submit_builder(&config, &mint)?.mpl_core_program(None).build();
    assert_eq!(
        result,
        Err(ValidationError::MissingAccount {
            instruction: EnrollmentInstruction::SubmitTs,
            account: "mpl_core_program",
        })
    );
    Ok(())
}

#[test]
fn initialize_encodes_github_handle() -> anyhow::Result<()> {
    let config = ProgramConfig::default();
    let user = USER_1.address();
    let account = find_enrollment_address(&config, &user)?.address;
    let ixn = InitializeBuilder::new(&config)
        .user(user)
        .account(account)
        .github("octocat")
        .build()?;

    let mut expected = initialize::DISCRIMINATOR.to_vec();
    expected.extend_from_slice(&7u32.to_le_bytes());
    expected.extend_from_slice(b"octocat");
    assert_eq!(ixn.data, expected);

    assert_eq!(
        EnrollmentInstruction::from_data(&ixn.data),
        Some(EnrollmentInstruction::Initialize)
    );
    assert_eq!(ixn.accounts[1].pubkey, account);
    assert!(ixn.accounts[0].is_signer);
    assert!(!ixn.accounts[2].is_writable);
    Ok(())
}

#[test]
fn initialize_requires_accounts_and_handle() {
    let config = ProgramConfig::default();
    let user = USER_1.address();

    assert_eq!(
        InitializeBuilder::new(&config).user(user).github("octocat").build(),
        Err(ValidationError::MissingAccount {
            instruction: EnrollmentInstruction::Initialize,
            account: "account",
        })
    );
    assert_eq!(
        InitializeBuilder::new(&config).user(user).account(user).build(),
        Err(ValidationError::MissingArgument {
            instruction: EnrollmentInstruction::Initialize,
            argument: "github",
        })
    );
    assert_eq!(
        InitializeBuilder::new(&config)
            .user(user)
            .account(user)
            .system_program(None)
            .github("octocat")
            .build(),
        Err(ValidationError::MissingAccount {
            instruction: EnrollmentInstruction::Initialize,
            account: "system_program",
        })
    );
}
