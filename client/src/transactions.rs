//! Assembling instructions into size-checked messages and signing them.

use solana_instruction::Instruction;
use solana_sdk::{
    message::Message,
    pubkey::Pubkey,
    signature::{
        Keypair,
        Signature,
    },
    transaction::Transaction,
};

use crate::{
    config::MAX_TRANSACTION_SIZE,
    connection::RecencyAnchor,
    error::{
        EnrollResult,
        MissingSignerError,
        SizeLimitError,
        ValidationError,
    },
    keys::SigningIdentity,
};

/// Collects the fee payer, recency anchor, instructions and any signers beyond the fee payer.
pub struct TransactionAssembler {
    fee_payer: Pubkey,
    anchor: RecencyAnchor,
    instructions: Vec<Instruction>,
    additional_signers: Vec<Pubkey>,
    max_size: usize,
}

impl TransactionAssembler {
    pub fn new(fee_payer: &SigningIdentity, anchor: RecencyAnchor) -> Self {
        Self {
            fee_payer: fee_payer.address(),
            anchor,
            instructions: vec![],
            additional_signers: vec![],
            max_size: MAX_TRANSACTION_SIZE,
        }
    }

    pub fn instruction(mut self, instruction: Instruction) -> Self {
        self.instructions.push(instruction);
        self
    }

    pub fn instructions(mut self, instructions: impl IntoIterator<Item = Instruction>) -> Self {
        self.instructions.extend(instructions);
        self
    }

    /// Requires a signature from `signer`, which must be one of the instructions' accounts.
    pub fn additional_signer(mut self, signer: Pubkey) -> Self {
        self.additional_signers.push(signer);
        self
    }

    pub fn max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }

    /// Compiles the message and checks its serialized size against the packet limit.
    pub fn assemble(self) -> EnrollResult<TransactionMessage> {
        let Self {
            fee_payer,
            anchor,
            mut instructions,
            additional_signers,
            max_size,
        } = self;

        if instructions.is_empty() {
            return Err(ValidationError::EmptyTransaction.into());
        }

        for signer in additional_signers {
            let mut found = false;
            for meta in instructions
                .iter_mut()
                .flat_map(|ixn| ixn.accounts.iter_mut())
                .filter(|meta| meta.pubkey == signer)
            {
                meta.is_signer = true;
                found = true;
            }
            if !found {
                return Err(ValidationError::UnknownSigner(signer).into());
            }
        }

        let message = Message::new_with_blockhash(&instructions, Some(&fee_payer), &anchor.blockhash);

        // An unsigned transaction carries one zeroed placeholder per required signature, so it
        // serializes to exactly the signed size.
        let size = serialized_size(&Transaction::new_unsigned(message.clone()))?;
        if size > max_size {
            return Err(SizeLimitError {
                size,
                limit: max_size,
            }
            .into());
        }

        Ok(TransactionMessage {
            message,
            anchor,
            size,
        })
    }
}

fn serialized_size(transaction: &Transaction) -> Result<usize, ValidationError> {
    bincode::serialized_size(transaction)
        .map(|size| size as usize)
        .map_err(|e| ValidationError::Encoding {
            what: "transaction",
            reason: e.to_string(),
        })
}

/// A compiled, size-checked message waiting for signatures.
#[derive(Clone, Debug)]
pub struct TransactionMessage {
    message: Message,
    anchor: RecencyAnchor,
    size: usize,
}

impl TransactionMessage {
    pub fn message(&self) -> &Message {
        &self.message
    }

    pub fn anchor(&self) -> RecencyAnchor {
        self.anchor
    }

    pub fn serialized_size(&self) -> usize {
        self.size
    }

    pub fn fee_payer(&self) -> Pubkey {
        self.message.account_keys[0]
    }

    /// The accounts that must sign, fee payer first.
    pub fn required_signers(&self) -> &[Pubkey] {
        let count = self.message.header.num_required_signatures as usize;
        &self.message.account_keys[..count]
    }

    /// Signs with the identity matching each required signer. Identities the message doesn't
    /// need are ignored; a required signer with no identity fails before anything is signed.
    pub fn sign(self, identities: &[&SigningIdentity]) -> EnrollResult<SignedTransaction> {
        let mut keypairs: Vec<&Keypair> = Vec::with_capacity(self.required_signers().len());
        let mut missing = vec![];
        for signer in self.required_signers() {
            match identities.iter().find(|id| id.address() == *signer) {
                Some(identity) => keypairs.push(identity.keypair()),
                None => missing.push(*signer),
            }
        }
        if !missing.is_empty() {
            return Err(MissingSignerError { missing }.into());
        }

        let mut transaction = Transaction::new_unsigned(self.message);
        transaction.try_sign(&keypairs, self.anchor.blockhash)?;

        Ok(SignedTransaction {
            transaction,
            anchor: self.anchor,
        })
    }
}

/// A transaction bearing one signature per required signer.
#[derive(Clone, Debug)]
pub struct SignedTransaction {
    transaction: Transaction,
    anchor: RecencyAnchor,
}

impl SignedTransaction {
    /// The fee payer's signature, which identifies the transaction on chain.
    pub fn signature(&self) -> Signature {
        self.transaction.signatures[0]
    }

    pub fn signatures(&self) -> &[Signature] {
        &self.transaction.signatures
    }

    pub fn anchor(&self) -> RecencyAnchor {
        self.anchor
    }

    pub fn transaction(&self) -> &Transaction {
        &self.transaction
    }
}
