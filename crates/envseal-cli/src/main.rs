use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use envseal_cli::config::{Cli, Command};
use envseal_cli::logging::init_tracing;
use envseal_cli::{
    decrypt_tree, encrypt_tree, load_decryption_key, load_recipient, BatchReport, Selection,
};
use envseal_keys::{generate_keypair, write_keypair};
use tracing::{error, info};

fn summarize(report: &BatchReport) -> ExitCode {
    info!(
        succeeded = report.succeeded.len(),
        failed = report.failed.len(),
        "done"
    );
    if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    match cli.command {
        Command::Encrypt { tree, extensions } => {
            let recipient = load_recipient(&tree.key)
                .with_context(|| format!("loading public key {}", tree.key.display()))?;
            let report = encrypt_tree(
                &tree.path,
                &Selection::plaintext(&extensions),
                recipient,
                &tree.batch_options(),
            )?;
            Ok(summarize(&report))
        }
        Command::Decrypt { tree } => {
            let key = load_decryption_key(&tree.key)
                .with_context(|| format!("loading private key {}", tree.key.display()))?;
            let report = decrypt_tree(&tree.path, key, &tree.batch_options())?;
            Ok(summarize(&report))
        }
        Command::Keygen { out_dir, bits } => {
            std::fs::create_dir_all(&out_dir)
                .with_context(|| format!("creating {}", out_dir.display()))?;
            let key = generate_keypair(bits)?;
            write_keypair(&key, &out_dir)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
