//! The enrollment flows: derive, build, assemble, sign, submit.
//!
//! `initialize` and `submit_ts` are independent variants over the same stages. Each stage
//! returns early on error and nothing is retried; after a [`SubmissionError`] the caller
//! rebuilds from a fresh recency anchor.
//!
//! [`SubmissionError`]: crate::error::SubmissionError

use colored::Colorize;
use solana_instruction::Instruction;
use solana_sdk::pubkey::Pubkey;

use crate::{
    config::{
        ConfirmationPolicy,
        ProgramConfig,
    },
    connection::Ledger,
    error::{
        EnrollResult,
        MissingSignerError,
        PrerequisiteError,
    },
    instructions::{
        InitializeBuilder,
        SubmitTsBuilder,
    },
    keys::SigningIdentity,
    logs::{
        log_info,
        log_success,
        LogColor,
    },
    pda::{
        find_collection_authority,
        find_enrollment_address,
        ProgramAddress,
    },
    submit::SubmissionResult,
    transactions::TransactionAssembler,
};

pub struct Enrollment<'a, L: Ledger> {
    ledger: &'a L,
    config: &'a ProgramConfig,
    user: &'a SigningIdentity,
    policy: ConfirmationPolicy,
}

impl<'a, L: Ledger> Enrollment<'a, L> {
    pub fn new(
        ledger: &'a L,
        config: &'a ProgramConfig,
        user: &'a SigningIdentity,
        policy: ConfirmationPolicy,
    ) -> Self {
        Self {
            ledger,
            config,
            user,
            policy,
        }
    }

    pub fn enrollment_account(&self) -> EnrollResult<ProgramAddress> {
        Ok(find_enrollment_address(self.config, &self.user.address())?)
    }

    /// Creates the user's enrollment account, recording `github`.
    pub async fn initialize(&self, github: &str) -> EnrollResult<SubmissionResult> {
        let account = self.enrollment_account()?;
        log_info("Enrollment account", &account.address);

        let instruction = InitializeBuilder::new(self.config)
            .user(self.user.address())
            .account(account.address)
            .github(github)
            .build()?;

        self.send(vec![instruction], &[], &[self.user]).await
    }

    /// Mints the enrollment NFT with the freshly generated `mint` as a second signer. The
    /// enrollment account must already exist on chain.
    pub async fn submit_ts(&self, mint: &SigningIdentity) -> EnrollResult<SubmissionResult> {
        let account = self.enrollment_account()?;
        if !self.ledger.account_exists(&account.address).await? {
            return Err(PrerequisiteError::NotInitialized {
                account: account.address,
            }
            .into());
        }
        let authority = find_collection_authority(self.config)?;
        log_info("Enrollment account", &account.address);
        log_info("Collection authority", &authority.address);
        log_info("Mint", mint.address());

        let instruction = SubmitTsBuilder::new(self.config)
            .user(self.user.address())
            .account(account.address)
            .mint(mint.address())
            .collection(self.config.collection)
            .authority(authority.address)
            .build()?;

        self.send(vec![instruction], &[mint.address()], &[self.user, mint])
            .await
    }

    /// Runs instructions through the assembler, signer and submitter with the user as fee
    /// payer. `additional_signers` are required beyond the fee payer; `identities` must cover
    /// every required signer or the run stops before submission.
    pub async fn send(
        &self,
        instructions: Vec<Instruction>,
        additional_signers: &[Pubkey],
        identities: &[&SigningIdentity],
    ) -> EnrollResult<SubmissionResult> {
        ensure_signers_covered(self.user, &instructions, additional_signers, identities)?;
        let anchor = self.ledger.latest_anchor().await?;

        let message = additional_signers
            .iter()
            .fold(
                TransactionAssembler::new(self.user, anchor)
                    .instructions(instructions)
                    .max_size(self.config.max_transaction_size),
                |assembler, signer| assembler.additional_signer(*signer),
            )
            .assemble()?;

        let signed = message.sign(identities)?;
        let sender = format!("{}: {}", "fee payer".color(LogColor::Gray), self.user.address());
        log_info("Sending", format!("{}\n{sender}", signed.signature()));

        let result = self.ledger.submit(&signed, &self.policy).await?;
        log_success(
            "Signature",
            format!("{} ({} at slot {})", result.signature, result.commitment, result.slot),
        );

        Ok(result)
    }
}

/// Fails with every signer `identities` can't produce a signature for: the fee payer, each
/// additional signer, and each signer account the instructions name. Runs before the anchor is
/// fetched so nothing reaches the network.
fn ensure_signers_covered(
    fee_payer: &SigningIdentity,
    instructions: &[Instruction],
    additional_signers: &[Pubkey],
    identities: &[&SigningIdentity],
) -> Result<(), MissingSignerError> {
    let required = std::iter::once(fee_payer.address())
        .chain(additional_signers.iter().copied())
        .chain(
            instructions
                .iter()
                .flat_map(|ixn| &ixn.accounts)
                .filter(|meta| meta.is_signer)
                .map(|meta| meta.pubkey),
        );

    let mut missing: Vec<Pubkey> = vec![];
    for signer in required {
        if !missing.contains(&signer) && !identities.iter().any(|id| id.address() == signer) {
            missing.push(signer);
        }
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(MissingSignerError { missing })
    }
}
