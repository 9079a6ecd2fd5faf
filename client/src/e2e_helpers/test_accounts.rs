//! Deterministic keypairs for tests and local runs, stored the way wallets export them.

use std::sync::LazyLock;

use crate::keys::SigningIdentity;

/// Pubkey: PAYRidU5w5wtJUxohMzVn9KH8p9p5PERU1SFsrUtKUV
pub const PAYER_SECRET: &str =
    "4UahpeecuKmCQJv3XbkzmBxSd5JxdviM6UGMCZ5FsMw5XZv7APjzDb1WM9WcCdKX7rmsYWSi7Cumcf59TvXyLR45";

/// Pubkey: 11113MwGAy1Aq8qkfPuukq892Zn3tV6uGHWoRYLaUBS
pub const USER_1_SECRET: &str =
    "4phi3FwSKx8CQssCGPgBZxabjeLBZK7ZhhPrVVo1vsP4T3F9iUdQPFf7wphop5dhYg9CJV35GoPMSTdb95w3FfoE";

/// Pubkey: 2222VkwR14uJeobbCRfr67aEudhqv9gwjaZHpHqja9M5
pub const USER_2_SECRET: &str =
    "5LqH8f3NYsSHGvEYbaWnRM8swJgEB9SdSrT6KkCeerTMbyZnQgSZhPQwJEVSsfZVMRPz4q4P4UYynEwvw2KApYrP";

fn load(secret: &str) -> SigningIdentity {
    SigningIdentity::from_base58(secret).expect("Test secret should decode")
}

pub static PAYER: LazyLock<SigningIdentity> = LazyLock::new(|| load(PAYER_SECRET));
pub static USER_1: LazyLock<SigningIdentity> = LazyLock::new(|| load(USER_1_SECRET));
pub static USER_2: LazyLock<SigningIdentity> = LazyLock::new(|| load(USER_2_SECRET));

#[test]
fn check_test_keys() {
    assert_eq!(
        PAYER.address().to_string(),
        "PAYRidU5w5wtJUxohMzVn9KH8p9p5PERU1SFsrUtKUV"
    );
    assert_eq!(
        USER_1.address().to_string(),
        "11113MwGAy1Aq8qkfPuukq892Zn3tV6uGHWoRYLaUBS"
    );
    assert_eq!(
        USER_2.address().to_string(),
        "2222VkwR14uJeobbCRfr67aEudhqv9gwjaZHpHqja9M5"
    );
}
