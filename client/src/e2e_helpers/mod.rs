//! An in-memory [`Ledger`] for exercising the pipeline without a cluster.

use std::{
    cell::{
        Cell,
        RefCell,
    },
    collections::HashSet,
};

use enrollment_interface::instructions::EnrollmentInstruction;
use solana_sdk::{
    hash::Hash,
    pubkey::Pubkey,
    signature::Signature,
};

use crate::{
    config::ConfirmationPolicy,
    connection::{
        Ledger,
        RecencyAnchor,
    },
    error::{
        EnrollResult,
        SubmissionError,
    },
    submit::{
        block_height_expired,
        SubmissionResult,
    },
    transactions::SignedTransaction,
};

pub mod test_accounts;

/// Block heights a blockhash stays valid for after it's handed out.
pub const BLOCKHASH_VALIDITY: u64 = 150;

/// A fixed anchor for building transactions outside a ledger.
pub fn test_anchor() -> RecencyAnchor {
    RecencyAnchor {
        blockhash: Hash::new_from_array([7; 32]),
        last_valid_block_height: BLOCKHASH_VALIDITY,
    }
}

/// Tracks block height, which accounts exist, and every call made against it. A successful
/// `initialize` creates the enrollment account it names, like the program would.
#[derive(Default)]
pub struct MockLedger {
    block_height: Cell<u64>,
    accounts: RefCell<HashSet<Pubkey>>,
    anchors_fetched: Cell<usize>,
    submissions: RefCell<Vec<Signature>>,
}

impl MockLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_account(self, address: Pubkey) -> Self {
        self.accounts.borrow_mut().insert(address);
        self
    }

    pub fn advance_block_height(&self, blocks: u64) {
        self.block_height.set(self.block_height.get() + blocks);
    }

    pub fn anchors_fetched(&self) -> usize {
        self.anchors_fetched.get()
    }

    pub fn submission_count(&self) -> usize {
        self.submissions.borrow().len()
    }

    pub fn submitted(&self) -> Vec<Signature> {
        self.submissions.borrow().clone()
    }

    pub fn has_account(&self, address: &Pubkey) -> bool {
        self.accounts.borrow().contains(address)
    }

    fn apply(&self, transaction: &SignedTransaction) {
        let message = &transaction.transaction().message;
        for compiled in &message.instructions {
            if EnrollmentInstruction::from_data(&compiled.data)
                == Some(EnrollmentInstruction::Initialize)
            {
                // Accounts: user, account, system_program.
                if let Some(account) = compiled
                    .accounts
                    .get(1)
                    .and_then(|index| message.account_keys.get(*index as usize))
                {
                    self.accounts.borrow_mut().insert(*account);
                }
            }
        }
    }
}

impl Ledger for MockLedger {
    async fn latest_anchor(&self) -> EnrollResult<RecencyAnchor> {
        self.anchors_fetched.set(self.anchors_fetched.get() + 1);
        let height = self.block_height.get();

        let mut bytes = [0u8; 32];
        bytes[..8].copy_from_slice(&height.to_le_bytes());
        bytes[8..16].copy_from_slice(&(self.anchors_fetched.get() as u64).to_le_bytes());

        Ok(RecencyAnchor {
            blockhash: Hash::new_from_array(bytes),
            last_valid_block_height: height + BLOCKHASH_VALIDITY,
        })
    }

    async fn account_exists(&self, address: &Pubkey) -> EnrollResult<bool> {
        Ok(self.has_account(address))
    }

    async fn submit(
        &self,
        transaction: &SignedTransaction,
        policy: &ConfirmationPolicy,
    ) -> EnrollResult<SubmissionResult> {
        let signature = transaction.signature();
        self.submissions.borrow_mut().push(signature);

        if block_height_expired(self.block_height.get(), transaction.anchor()) {
            return Err(SubmissionError::BlockhashExpired.into());
        }

        if let Err(err) = transaction.transaction().verify() {
            return Err(SubmissionError::Rejected {
                signature,
                reason: err.to_string(),
            }
            .into());
        }

        self.apply(transaction);
        Ok(SubmissionResult {
            signature,
            slot: self.block_height.get(),
            commitment: policy.commitment,
        })
    }
}
