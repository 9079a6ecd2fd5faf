use anyhow::Context;

/// The base58 encoded 64-byte secret key of the enrolling wallet.
pub fn private_key() -> anyhow::Result<String> {
    std::env::var("PRIVATE_KEY").context("PRIVATE_KEY must be set to the wallet's base58 secret key")
}

pub fn github_handle() -> anyhow::Result<String> {
    std::env::var("GITHUB_HANDLE").context("Pass --github or set GITHUB_HANDLE")
}
