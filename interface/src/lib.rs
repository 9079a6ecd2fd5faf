//! Addresses, seeds and instruction schemas for the enrollment program and the external
//! programs its instructions touch.
//!
//! Instruction layouts mirror the program's published IDL. Changing the on-chain program means
//! changing [`instructions::SCHEMA_VERSION`] and the account tables here.

pub mod instructions;
pub mod seeds;

pub mod program {
    use solana_sdk::pubkey::Pubkey;

    pub const ID: Pubkey = Pubkey::from_str_const("TRBZyQHB3m68FGeVsqTK39Wm4xejadjVhP5MAZaKWDM");
}

pub mod mpl_core {
    use solana_sdk::pubkey::Pubkey;

    pub const ID: Pubkey = Pubkey::from_str_const("CoREENxT6tW1HoK8ypY1SxRMZTcVPm7R94rH4PZNhX7d");
}

pub mod system_program {
    use solana_sdk::pubkey::Pubkey;

    pub const ID: Pubkey = Pubkey::from_str_const("11111111111111111111111111111111");
}

/// The MPL Core collection that enrollment NFTs are minted into.
pub const COLLECTION: solana_sdk::pubkey::Pubkey =
    solana_sdk::pubkey::Pubkey::from_str_const("5ebsp5RChCGK7ssRZMVMufgVZhd2kFbNaotcZ5UvytN2");
