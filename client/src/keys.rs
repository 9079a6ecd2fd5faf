//! Loading signing identities from encoded secrets.

use std::fmt;

use solana_sdk::{
    pubkey::Pubkey,
    signature::Keypair,
    signer::Signer,
};

use crate::error::DecodeError;

/// Secret key bytes followed by the public key bytes.
pub const KEYPAIR_LENGTH: usize = 64;

/// A keypair able to authorize transactions. The secret half is never printed.
pub struct SigningIdentity {
    keypair: Keypair,
}

impl SigningIdentity {
    /// Decodes a base-58 encoded 64 byte keypair, the format wallets export private keys in.
    pub fn from_base58(encoded: &str) -> Result<Self, DecodeError> {
        let bytes = bs58::decode(encoded.trim()).into_vec()?;
        Self::from_bytes(&bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        if bytes.len() != KEYPAIR_LENGTH {
            return Err(DecodeError::InvalidLength {
                expected: KEYPAIR_LENGTH,
                actual: bytes.len(),
            });
        }

        let keypair =
            Keypair::try_from(bytes).map_err(|e| DecodeError::InvalidKeypair(e.to_string()))?;

        Ok(Self { keypair })
    }

    /// A fresh random identity, e.g. for a new mint account.
    pub fn generate() -> Self {
        Self {
            keypair: Keypair::new(),
        }
    }

    pub fn address(&self) -> Pubkey {
        self.keypair.pubkey()
    }

    pub fn keypair(&self) -> &Keypair {
        &self.keypair
    }
}

impl From<Keypair> for SigningIdentity {
    fn from(keypair: Keypair) -> Self {
        Self { keypair }
    }
}

impl fmt::Debug for SigningIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningIdentity")
            .field("address", &self.address())
            .finish_non_exhaustive()
    }
}
