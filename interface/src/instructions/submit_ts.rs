//! `submit_ts`: mints the enrollment NFT into the MPL Core collection. Takes no arguments.

use super::AccountSpec;

pub const DISCRIMINATOR: [u8; 8] = [0x89, 0xf1, 0xc7, 0xdf, 0x7d, 0x21, 0x55, 0xd9];

pub const ACCOUNTS: [AccountSpec; 7] = [
    AccountSpec::signer_writable("user"),
    AccountSpec::writable("account"),
    AccountSpec::signer_writable("mint"),
    AccountSpec::writable("collection"),
    AccountSpec::readonly("authority"),
    AccountSpec::readonly("mpl_core_program"),
    AccountSpec::readonly("system_program"),
];
