//! Batch encryption and decryption of a directory tree.
//!
//! Each file is an independent job: one failure is logged and recorded in
//! the report, and the rest of the tree is still processed.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use envseal_crypto::{EnvelopeDecryptor, EnvelopeEncryptor, KeyDecryptor, KeyEncryptor};
use envseal_keys::{load_private_key, load_public_key, RecipientPrivateKey, RecipientPublicKey};
use rayon::prelude::*;
use tracing::{info, warn};

use crate::error::BatchError;
use crate::replace::replace_file;
use crate::walk::{collect_files, decrypted_path, encrypted_path, Selection};

#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Worker threads; `None` uses one per CPU.
    pub jobs: Option<usize>,
    /// Bind the plaintext file name into the AEAD tag.
    pub bind_name: bool,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    /// `(source, output)` for every file that was replaced.
    pub succeeded: Vec<(PathBuf, PathBuf)>,
    pub failed: Vec<(PathBuf, BatchError)>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Associated data for `--bind-name`: the plaintext file's name.
fn name_aad(plaintext_path: &Path, bind_name: bool) -> Vec<u8> {
    match plaintext_path.file_name() {
        Some(name) if bind_name => name.as_encoded_bytes().to_vec(),
        _ => Vec::new(),
    }
}

/// Encrypt one file to `<file>.enc` and remove the original.
pub fn encrypt_file<K: KeyEncryptor>(
    path: &Path,
    encryptor: &EnvelopeEncryptor<K>,
    bind_name: bool,
) -> Result<PathBuf, BatchError> {
    let plaintext = fs::read(path).map_err(BatchError::io(path))?;
    let packet = encryptor
        .encrypt_with_aad(&plaintext, &name_aad(path, bind_name))
        .map_err(BatchError::crypto(path))?;
    let target = encrypted_path(path);
    replace_file(path, &target, &packet)?;
    Ok(target)
}

/// Decrypt one `.enc` file back to its original name and remove it.
pub fn decrypt_file<K: KeyDecryptor>(
    path: &Path,
    decryptor: &EnvelopeDecryptor<K>,
    bind_name: bool,
) -> Result<PathBuf, BatchError> {
    let packet = fs::read(path).map_err(BatchError::io(path))?;
    let target = decrypted_path(path);
    let plaintext = decryptor
        .decrypt_with_aad(&packet, &name_aad(&target, bind_name))
        .map_err(BatchError::crypto(path))?;
    replace_file(path, &target, &plaintext)?;
    Ok(target)
}

/// Load the public key an encrypt run seals to.
pub fn load_recipient(path: &Path) -> Result<RecipientPublicKey, BatchError> {
    Ok(load_public_key(path)?)
}

/// Load the private key a decrypt run recovers packet keys with.
pub fn load_decryption_key(path: &Path) -> Result<RecipientPrivateKey, BatchError> {
    Ok(load_private_key(path)?)
}

/// Split `.enc` files into those whose outputs collide with another
/// selected file and those that are fully independent.
///
/// `a.go.enc.enc` decrypts onto `a.go.enc`, which is itself a selected
/// packet; both belong to the chained set. Input order is preserved, so a
/// sorted input yields the shorter name of each chain first.
fn split_chained(files: Vec<PathBuf>) -> (Vec<PathBuf>, Vec<PathBuf>) {
    let selected: HashSet<PathBuf> = files.iter().cloned().collect();
    files.into_iter().partition(|path| {
        selected.contains(&decrypted_path(path)) || selected.contains(&encrypted_path(path))
    })
}

fn run_one<F>(path: PathBuf, op: &F) -> (PathBuf, Result<PathBuf, BatchError>)
where
    F: Fn(&Path) -> Result<PathBuf, BatchError>,
{
    let outcome = op(&path);
    match &outcome {
        Ok(output) => info!(source = %path.display(), output = %output.display(), "processed"),
        Err(e) => warn!(source = %path.display(), error = %e, "failed"),
    }
    (path, outcome)
}

/// Run `ordered` one at a time in the given order, then `parallel` on the
/// worker pool.
fn run_jobs<F>(
    ordered: Vec<PathBuf>,
    parallel: Vec<PathBuf>,
    jobs: Option<usize>,
    op: F,
) -> Result<BatchReport, BatchError>
where
    F: Fn(&Path) -> Result<PathBuf, BatchError> + Sync,
{
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs.unwrap_or(0))
        .build()
        .map_err(|e| BatchError::ThreadPool(e.to_string()))?;

    let mut outcomes: Vec<(PathBuf, Result<PathBuf, BatchError>)> =
        ordered.into_iter().map(|path| run_one(path, &op)).collect();
    outcomes.extend(pool.install(|| {
        parallel
            .into_par_iter()
            .map(|path| run_one(path, &op))
            .collect::<Vec<_>>()
    }));

    let mut report = BatchReport::default();
    for (path, outcome) in outcomes {
        match outcome {
            Ok(output) => report.succeeded.push((path, output)),
            Err(e) => report.failed.push((path, e)),
        }
    }
    Ok(report)
}

/// Encrypt every selected file under `root`.
pub fn encrypt_tree<K: KeyEncryptor>(
    root: &Path,
    selection: &Selection,
    recipient: K,
    options: &BatchOptions,
) -> Result<BatchReport, BatchError> {
    let files = collect_files(root, selection)?;
    info!(root = %root.display(), files = files.len(), "encrypting");
    let encryptor = EnvelopeEncryptor::new(recipient);
    run_jobs(Vec::new(), files, options.jobs, |path| {
        encrypt_file(path, &encryptor, options.bind_name)
    })
}

/// Decrypt every `.enc` file under `root`.
///
/// Packets whose output is another selected packet are decrypted
/// sequentially, shortest name first, before the rest run in parallel.
pub fn decrypt_tree<K: KeyDecryptor>(
    root: &Path,
    key: K,
    options: &BatchOptions,
) -> Result<BatchReport, BatchError> {
    let files = collect_files(root, &Selection::Encrypted)?;
    info!(root = %root.display(), files = files.len(), "decrypting");
    let (chained, independent) = split_chained(files);
    if !chained.is_empty() {
        info!(files = chained.len(), "decrypting nested packets sequentially");
    }
    let decryptor = EnvelopeDecryptor::new(key);
    run_jobs(chained, independent, options.jobs, |path| {
        decrypt_file(path, &decryptor, options.bind_name)
    })
}
