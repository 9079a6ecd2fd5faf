use core::fmt;

use solana_instruction::Instruction;
use solana_sdk::pubkey::Pubkey;

pub mod initialize;
pub mod submit_ts;

/// Bumped whenever an account table or argument layout below changes to follow the program.
pub const SCHEMA_VERSION: u16 = 1;

/// The length of an Anchor instruction discriminator.
pub const DISCRIMINATOR_LEN: usize = 8;

/// The fixed role of one account slot in an instruction's account list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccountSpec {
    pub name: &'static str,
    pub is_signer: bool,
    pub is_writable: bool,
}

impl AccountSpec {
    pub const fn signer_writable(name: &'static str) -> Self {
        Self {
            name,
            is_signer: true,
            is_writable: true,
        }
    }

    pub const fn writable(name: &'static str) -> Self {
        Self {
            name,
            is_signer: false,
            is_writable: true,
        }
    }

    pub const fn readonly(name: &'static str) -> Self {
        Self {
            name,
            is_signer: false,
            is_writable: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[derive(strum_macros::Display, strum_macros::EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum EnrollmentInstruction {
    Initialize,
    SubmitTs,
}

impl EnrollmentInstruction {
    /// `sha256("global:<snake_case_name>")[..8]`, as generated by Anchor.
    pub const fn discriminator(self) -> [u8; DISCRIMINATOR_LEN] {
        match self {
            Self::Initialize => initialize::DISCRIMINATOR,
            Self::SubmitTs => submit_ts::DISCRIMINATOR,
        }
    }

    pub const fn accounts(self) -> &'static [AccountSpec] {
        match self {
            Self::Initialize => &initialize::ACCOUNTS,
            Self::SubmitTs => &submit_ts::ACCOUNTS,
        }
    }

    /// Recovers the instruction kind from the leading discriminator of instruction data.
    pub fn from_data(data: &[u8]) -> Option<Self> {
        let tag = data.get(..DISCRIMINATOR_LEN)?;
        [Self::Initialize, Self::SubmitTs]
            .into_iter()
            .find(|ixn| ixn.discriminator() == tag)
    }

    /// Checks a built instruction against this operation's fixed account schema.
    pub fn validate(self, instruction: &Instruction, program_id: &Pubkey) -> Result<(), SchemaMismatch> {
        if instruction.program_id != *program_id {
            return Err(SchemaMismatch::ProgramId {
                expected: *program_id,
                actual: instruction.program_id,
            });
        }

        if Self::from_data(&instruction.data) != Some(self) {
            return Err(SchemaMismatch::Discriminator);
        }

        let schema = self.accounts();
        if schema.len() != instruction.accounts.len() {
            return Err(SchemaMismatch::AccountCount {
                expected: schema.len(),
                actual: instruction.accounts.len(),
            });
        }

        for (spec, meta) in schema.iter().zip(&instruction.accounts) {
            if spec.is_signer != meta.is_signer || spec.is_writable != meta.is_writable {
                return Err(SchemaMismatch::Role {
                    account: spec.name,
                    expected: *spec,
                });
            }
        }

        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SchemaMismatch {
    ProgramId { expected: Pubkey, actual: Pubkey },
    Discriminator,
    AccountCount { expected: usize, actual: usize },
    Role { account: &'static str, expected: AccountSpec },
}

impl fmt::Display for SchemaMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProgramId { expected, actual } => {
                write!(f, "program id {actual} doesn't match {expected}")
            }
            Self::Discriminator => f.write_str("instruction data has the wrong discriminator"),
            Self::AccountCount { expected, actual } => {
                write!(f, "expected {expected} accounts, got {actual}")
            }
            Self::Role { account, expected } => write!(
                f,
                "account `{account}` must be signer={}, writable={}",
                expected.is_signer, expected.is_writable
            ),
        }
    }
}
