pub mod enrollment {
    /// Prefix for the per-user enrollment account: `["prereqs", user]`.
    pub const ENROLLMENT_SEED: &[u8] = b"prereqs";
}

pub mod collection {
    /// Prefix for the collection update authority: `["collection", collection]`.
    pub const COLLECTION_SEED: &[u8] = b"collection";
}
