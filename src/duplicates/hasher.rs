use indicatif::ProgressBar;
use rayon::prelude::*;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::common::errors::DedupError;

/// Read chunk size for streaming hashes (8 KiB)
pub const CHUNK_SIZE: usize = 8192;

/// A path paired with its fingerprint or the reason it has none
pub type Fingerprinted = (PathBuf, Result<String, DedupError>);

/// Compute the SHA-256 fingerprint of a file, hex encoded
///
/// The file is streamed in `CHUNK_SIZE` pieces and never loaded whole.
pub fn compute_fingerprint(path: &Path) -> Result<String, DedupError> {
    let hash_err = |source| DedupError::Hash {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::open(path).map_err(hash_err)?;
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; CHUNK_SIZE];

    loop {
        let bytes_read = match file.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(hash_err(e)),
        };
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

/// Fingerprint many files, keeping the input order in the output
///
/// `threads` bounds the hashing pool: 0 uses rayon's default, 1 hashes
/// on the calling thread.
pub fn fingerprint_all(
    paths: Vec<PathBuf>,
    threads: usize,
    pb: Option<&ProgressBar>,
) -> Vec<Fingerprinted> {
    let hash_one = |p: PathBuf| -> Fingerprinted {
        let fp = compute_fingerprint(&p);
        if let Some(pb) = pb {
            pb.inc(1);
        }
        (p, fp)
    };

    if threads == 1 || paths.len() < 2 {
        return paths.into_iter().map(hash_one).collect();
    }

    // Indexed collect keeps results in input order
    let run = move || -> Vec<Fingerprinted> { paths.into_par_iter().map(hash_one).collect() };

    if threads == 0 {
        return run();
    }

    match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
        Ok(pool) => pool.install(run),
        Err(e) => {
            tracing::warn!("Could not build hashing pool ({}), using global pool", e);
            run()
        }
    }
}
