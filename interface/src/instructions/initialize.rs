//! `initialize`: creates the caller's enrollment account and records their GitHub handle.

use borsh::{
    BorshDeserialize,
    BorshSerialize,
};

use super::AccountSpec;

pub const DISCRIMINATOR: [u8; 8] = [0xaf, 0xaf, 0x6d, 0x1f, 0x0d, 0x98, 0x9b, 0xed];

pub const ACCOUNTS: [AccountSpec; 3] = [
    AccountSpec::signer_writable("user"),
    AccountSpec::writable("account"),
    AccountSpec::readonly("system_program"),
];

#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct InitializeArgs {
    pub github: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_layout() {
        let args = InitializeArgs {
            github: "octocat".into(),
        };
        let bytes = borsh::to_vec(&args).unwrap();
        // u32 little-endian length prefix, then the utf-8 bytes.
        assert_eq!(&bytes[..4], &7u32.to_le_bytes());
        assert_eq!(&bytes[4..], b"octocat");
    }
}
