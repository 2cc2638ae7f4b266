//! Batch front end for the envseal envelope engine.
//!
//! Walks a directory tree, encrypts or decrypts each selected file
//! independently, and replaces it on disk crash-safely.

pub mod batch;
pub mod config;
pub mod error;
pub mod logging;
pub mod replace;
pub mod walk;

pub use batch::{
    decrypt_file, decrypt_tree, encrypt_file, encrypt_tree, load_decryption_key, load_recipient,
    BatchOptions, BatchReport,
};
pub use config::{Cli, Command, TreeArgs};
pub use error::BatchError;
pub use walk::{collect_files, decrypted_path, encrypted_path, Selection, ENCRYPTED_EXTENSION};
