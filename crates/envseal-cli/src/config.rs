use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use envseal_keys::DEFAULT_KEY_BITS;

use crate::batch::BatchOptions;

#[derive(Debug, Parser)]
#[command(
    name = "envseal",
    version,
    about = "Encrypt source trees for an RSA public key, decrypt with the private key"
)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Encrypt matching files to `<file>.enc` and remove the originals
    Encrypt {
        #[command(flatten)]
        tree: TreeArgs,
        /// File extension to encrypt (repeatable)
        #[arg(long = "ext", default_value = "go", value_delimiter = ',')]
        extensions: Vec<String>,
    },
    /// Decrypt `.enc` files back to their original names
    Decrypt {
        #[command(flatten)]
        tree: TreeArgs,
    },
    /// Generate `private.pem` and `public.pem`
    Keygen {
        /// Directory to write the key files into
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
        /// RSA modulus size in bits
        #[arg(long, default_value_t = DEFAULT_KEY_BITS)]
        bits: usize,
    },
}

#[derive(Debug, Args)]
pub struct TreeArgs {
    /// PEM key file: public.pem to encrypt, private.pem to decrypt
    #[arg(long, env = "ENVSEAL_KEY")]
    pub key: PathBuf,
    /// Root directory to process
    #[arg(long, default_value = "./src")]
    pub path: PathBuf,
    /// Worker threads (default: one per CPU)
    #[arg(long)]
    pub jobs: Option<usize>,
    /// Bind each file's name into its authentication tag
    #[arg(long)]
    pub bind_name: bool,
}

impl TreeArgs {
    pub fn batch_options(&self) -> BatchOptions {
        BatchOptions {
            jobs: self.jobs,
            bind_name: self.bind_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encrypt_defaults() {
        let cli = Cli::try_parse_from(["envseal", "encrypt", "--key", "public.pem"]).unwrap();
        assert_eq!(cli.log_level, "info");
        match cli.command {
            Command::Encrypt { tree, extensions } => {
                assert_eq!(tree.key, PathBuf::from("public.pem"));
                assert_eq!(tree.path, PathBuf::from("./src"));
                assert_eq!(extensions, vec!["go".to_string()]);
                assert!(!tree.bind_name);
                assert!(tree.jobs.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn encrypt_with_multiple_extensions() {
        let cli = Cli::try_parse_from([
            "envseal", "encrypt", "--key", "k.pem", "--ext", "go", "--ext", "rs,toml",
        ])
        .unwrap();
        match cli.command {
            Command::Encrypt { extensions, .. } => {
                assert_eq!(extensions, vec!["go", "rs", "toml"]);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn decrypt_options() {
        let cli = Cli::try_parse_from([
            "envseal",
            "decrypt",
            "--key",
            "private.pem",
            "--path",
            "tree",
            "--jobs",
            "2",
            "--bind-name",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(cli.log_level, "debug");
        match cli.command {
            Command::Decrypt { tree } => {
                let options = tree.batch_options();
                assert_eq!(options.jobs, Some(2));
                assert!(options.bind_name);
                assert_eq!(tree.path, PathBuf::from("tree"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn keygen_defaults() {
        let cli = Cli::try_parse_from(["envseal", "keygen"]).unwrap();
        match cli.command {
            Command::Keygen { out_dir, bits } => {
                assert_eq!(out_dir, PathBuf::from("."));
                assert_eq!(bits, 2048);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn unknown_mode_is_rejected() {
        assert!(Cli::try_parse_from(["envseal", "shred", "--key", "k.pem"]).is_err());
    }

    #[test]
    fn command_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
