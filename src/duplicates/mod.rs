pub mod grouper;
pub mod hasher;
pub mod metadata;
pub mod resolver;

pub use grouper::{group, hash_records, DuplicateGroups, FileRecord, FingerprintGroup};
pub use hasher::compute_fingerprint;
pub use metadata::{creation_time, file_size, CreatedAt};
pub use resolver::{resolve_all, resolve_group, Resolution, ResolveStrategy};
