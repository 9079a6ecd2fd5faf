//! Enrolls a wallet with the prerequisites program: creates its enrollment account, then mints
//! the enrollment NFT into the collection.

use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use enrollment_client::{
    config::ProgramConfig,
    connection::Connection,
    error::{
        EnrollError,
        EnrollResult,
        SubmissionError,
    },
    keys::SigningIdentity,
    logs::{
        log_divider,
        log_error,
        log_info,
        log_warning,
    },
    pda::{
        find_collection_authority,
        find_enrollment_address,
    },
    pipeline::Enrollment,
    LogColor,
};

use crate::cli::{
    Cli,
    Command,
};

pub mod cli;
pub mod load_env;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report(&err),
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = cli.program_config();
    let policy = cli.policy();

    let user = SigningIdentity::from_base58(&load_env::private_key()?).map_err(EnrollError::from)?;
    log_info("Fee payer", user.address());

    let github = match cli.command {
        Command::Address => return Ok(addresses(&config, &user)?),
        Command::Initialize { github: Some(github) } => Some(github),
        Command::Initialize { github: None } => Some(load_env::github_handle()?),
        Command::SubmitTs => None,
    };

    // Only subcommands that reach the cluster need valid endpoints.
    let conn = Connection::new(
        cli.cluster,
        cli.rpc_url.as_deref(),
        cli.ws_url.as_deref(),
        policy,
    )
    .map_err(EnrollError::from)?;
    announce(&conn, policy.skip_preflight);

    let enrollment = Enrollment::new(&conn, &config, &user, policy);
    let result = match github {
        Some(github) => enrollment.initialize(&github).await?,
        None => enrollment.submit_ts(&SigningIdentity::generate()).await?,
    };

    log_divider();
    log_info("Explorer", conn.cluster().explorer_tx_url(result.signature));
    Ok(())
}

/// Derives and prints the wallet's program addresses without a connection.
fn addresses(config: &ProgramConfig, user: &SigningIdentity) -> EnrollResult<()> {
    let account = find_enrollment_address(config, &user.address())?;
    let authority = find_collection_authority(config)?;
    log_info("Enrollment account", format!("{} (bump {})", account.address, account.bump));
    log_info("Collection authority", format!("{} (bump {})", authority.address, authority.bump));
    Ok(())
}

fn announce(conn: &Connection, skip_preflight: bool) {
    log_info("Cluster", format!("{} ({})", conn.cluster(), conn.rpc_url()));
    if skip_preflight {
        log_warning("Preflight", "skipped; program errors only show up after landing");
    }
}

fn report(err: &anyhow::Error) -> ExitCode {
    let Some(err) = err.downcast_ref::<EnrollError>() else {
        log_error("Usage", format!("{err:#}"));
        return ExitCode::from(1);
    };

    log_error(err.stage(), err);
    if let EnrollError::Submission(SubmissionError::Preflight { logs, .. }) = err {
        for line in logs {
            eprintln!("    {}", line.color(LogColor::Gray));
        }
    }
    ExitCode::from(err.exit_code())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_ignores_endpoint_flags() {
        let cli = Cli::try_parse_from(["enroll", "--rpc-url", "not a url", "address"]).unwrap();
        assert!(matches!(cli.command, Command::Address));
        assert!(addresses(&cli.program_config(), &SigningIdentity::generate()).is_ok());
    }
}
