//! PDA helpers for deriving enrollment program addresses.

use solana_sdk::pubkey::Pubkey;

use crate::{
    config::ProgramConfig,
    error::DerivationError,
};

/// Seeds per derivation, leaving one slot for the bump byte.
pub const MAX_SEEDS: usize = 15;
pub const MAX_SEED_LEN: usize = 32;

/// A program-owned address along with what it was derived from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgramAddress {
    pub program_id: Pubkey,
    pub seeds: Vec<Vec<u8>>,
    pub address: Pubkey,
    pub bump: u8,
}

impl ProgramAddress {
    /// Searches bumps from 255 down to 0 for the first off-curve address. Fails rather than
    /// retrying when no bump works.
    pub fn derive(program_id: &Pubkey, seeds: &[&[u8]]) -> Result<Self, DerivationError> {
        if seeds.len() > MAX_SEEDS {
            return Err(DerivationError::TooManySeeds {
                count: seeds.len(),
                max: MAX_SEEDS,
            });
        }
        if let Some((index, seed)) = seeds
            .iter()
            .enumerate()
            .find(|(_, seed)| seed.len() > MAX_SEED_LEN)
        {
            return Err(DerivationError::SeedTooLong {
                index,
                len: seed.len(),
                max: MAX_SEED_LEN,
            });
        }

        let (address, bump) = Pubkey::try_find_program_address(seeds, program_id).ok_or(
            DerivationError::NoViableBump {
                program_id: *program_id,
            },
        )?;

        Ok(Self {
            program_id: *program_id,
            seeds: seeds.iter().map(|seed| seed.to_vec()).collect(),
            address,
            bump,
        })
    }
}

/// The user's enrollment account: `[enrollment_seed, user]`.
pub fn find_enrollment_address(
    config: &ProgramConfig,
    user: &Pubkey,
) -> Result<ProgramAddress, DerivationError> {
    ProgramAddress::derive(
        &config.program_id,
        &[config.enrollment_seed.as_slice(), user.as_ref()],
    )
}

/// The program's update authority over the collection: `[collection_seed, collection]`.
pub fn find_collection_authority(config: &ProgramConfig) -> Result<ProgramAddress, DerivationError> {
    ProgramAddress::derive(
        &config.program_id,
        &[config.collection_seed.as_slice(), config.collection.as_ref()],
    )
}
