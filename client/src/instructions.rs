//! Builders for the enrollment program's instructions.
//!
//! Each builder collects the operation's accounts through setters and refuses to build until
//! every mandatory account is set. The built instruction is then checked against the account
//! schema in [`enrollment_interface::instructions`].

use enrollment_interface::instructions::{
    initialize::InitializeArgs,
    EnrollmentInstruction,
};
use solana_instruction::{
    AccountMeta,
    Instruction,
};
use solana_sdk::pubkey::Pubkey;

use crate::{
    config::ProgramConfig,
    error::ValidationError,
};

fn require<T>(
    instruction: EnrollmentInstruction,
    account: &'static str,
    value: Option<T>,
) -> Result<T, ValidationError> {
    value.ok_or(ValidationError::MissingAccount {
        instruction,
        account,
    })
}

fn checked(
    kind: EnrollmentInstruction,
    instruction: Instruction,
) -> Result<Instruction, ValidationError> {
    kind.validate(&instruction, &instruction.program_id)
        .map_err(|mismatch| ValidationError::Schema {
            instruction: kind,
            mismatch,
        })?;
    Ok(instruction)
}

/// `initialize(github)`: creates the enrollment account for `user`.
#[derive(Clone, Debug, Default)]
pub struct InitializeBuilder {
    program_id: Pubkey,
    user: Option<Pubkey>,
    account: Option<Pubkey>,
    system_program: Option<Pubkey>,
    github: Option<String>,
}

impl InitializeBuilder {
    /// Starts a builder with the system program taken from `config`.
    pub fn new(config: &ProgramConfig) -> Self {
        Self {
            program_id: config.program_id,
            system_program: Some(config.system_program),
            ..Default::default()
        }
    }

    pub fn user(mut self, user: Pubkey) -> Self {
        self.user = Some(user);
        self
    }

    pub fn account(mut self, account: Pubkey) -> Self {
        self.account = Some(account);
        self
    }

    pub fn system_program(mut self, system_program: Option<Pubkey>) -> Self {
        self.system_program = system_program;
        self
    }

    pub fn github(mut self, github: impl Into<String>) -> Self {
        self.github = Some(github.into());
        self
    }

    pub fn build(self) -> Result<Instruction, ValidationError> {
        let kind = EnrollmentInstruction::Initialize;
        let user = require(kind, "user", self.user)?;
        let account = require(kind, "account", self.account)?;
        let system_program = require(kind, "system_program", self.system_program)?;
        let github = self.github.ok_or(ValidationError::MissingArgument {
            instruction: kind,
            argument: "github",
        })?;

        let mut data = kind.discriminator().to_vec();
        borsh::to_writer(&mut data, &InitializeArgs { github }).map_err(|e| {
            ValidationError::Encoding {
                what: "initialize arguments",
                reason: e.to_string(),
            }
        })?;

        checked(
            kind,
            Instruction {
                program_id: self.program_id,
                accounts: vec![
                    AccountMeta::new(user, true),
                    AccountMeta::new(account, false),
                    AccountMeta::new_readonly(system_program, false),
                ],
                data,
            },
        )
    }
}

/// `submit_ts()`: mints the enrollment NFT for `user` into `collection`.
#[derive(Clone, Debug, Default)]
pub struct SubmitTsBuilder {
    program_id: Pubkey,
    user: Option<Pubkey>,
    account: Option<Pubkey>,
    mint: Option<Pubkey>,
    collection: Option<Pubkey>,
    authority: Option<Pubkey>,
    mpl_core_program: Option<Pubkey>,
    system_program: Option<Pubkey>,
}

impl SubmitTsBuilder {
    /// Starts a builder with the MPL Core and system programs taken from `config`.
    pub fn new(config: &ProgramConfig) -> Self {
        Self {
            program_id: config.program_id,
            mpl_core_program: Some(config.mpl_core_program),
            system_program: Some(config.system_program),
            ..Default::default()
        }
    }

    pub fn user(mut self, user: Pubkey) -> Self {
        self.user = Some(user);
        self
    }

    pub fn account(mut self, account: Pubkey) -> Self {
        self.account = Some(account);
        self
    }

    pub fn mint(mut self, mint: Pubkey) -> Self {
        self.mint = Some(mint);
        self
    }

    pub fn collection(mut self, collection: Pubkey) -> Self {
        self.collection = Some(collection);
        self
    }

    pub fn authority(mut self, authority: Pubkey) -> Self {
        self.authority = Some(authority);
        self
    }

    pub fn mpl_core_program(mut self, mpl_core_program: Option<Pubkey>) -> Self {
        self.mpl_core_program = mpl_core_program;
        self
    }

    pub fn system_program(mut self, system_program: Option<Pubkey>) -> Self {
        self.system_program = system_program;
        self
    }

    pub fn build(self) -> Result<Instruction, ValidationError> {
        let kind = EnrollmentInstruction::SubmitTs;
        let user = require(kind, "user", self.user)?;
        let account = require(kind, "account", self.account)?;
        let mint = require(kind, "mint", self.mint)?;
        let collection = require(kind, "collection", self.collection)?;
        let authority = require(kind, "authority", self.authority)?;
        let mpl_core_program = require(kind, "mpl_core_program", self.mpl_core_program)?;
        let system_program = require(kind, "system_program", self.system_program)?;

        checked(
            kind,
            Instruction {
                program_id: self.program_id,
                accounts: vec![
                    AccountMeta::new(user, true),
                    AccountMeta::new(account, false),
                    AccountMeta::new(mint, true),
                    AccountMeta::new(collection, false),
                    AccountMeta::new_readonly(authority, false),
                    AccountMeta::new_readonly(mpl_core_program, false),
                    AccountMeta::new_readonly(system_program, false),
                ],
                data: kind.discriminator().to_vec(),
            },
        )
    }
}
