use std::time::Duration;

use anyhow::Context;
use bookstore_authz::{TokenVerifier, ROLE_ADMIN};
use bookstore_kernel::settings::Settings;
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "bookstore", version, about = "Bookstore catalogue service")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server
    Serve,
    /// Print a signed bearer token for local testing
    IssueToken {
        #[arg(long)]
        subject: String,
        #[arg(long, default_value = ROLE_ADMIN)]
        role: String,
        /// Lifetime in seconds; defaults to auth.token_ttl_secs
        #[arg(long)]
        ttl_secs: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load().with_context(|| "failed to load bookstore settings")?;

    match cli.command {
        Command::Serve => {
            bookstore_telemetry::init(&settings.telemetry)?;
            tracing::info!(env = ?settings.environment, "bookstore serve starting");
            bookstore_app::run(settings).await
        }
        Command::IssueToken {
            subject,
            role,
            ttl_secs,
        } => {
            let ttl = Duration::from_secs(ttl_secs.unwrap_or(settings.auth.token_ttl_secs));
            let token = TokenVerifier::new(&settings.auth.jwt_secret)
                .issue(&subject, &role, ttl)
                .context("failed to issue token")?;
            println!("{token}");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn issue_token_defaults_to_admin_role() {
        let cli = Cli::try_parse_from(["bookstore", "issue-token", "--subject", "ops"]).unwrap();
        match cli.command {
            Command::IssueToken { role, ttl_secs, .. } => {
                assert_eq!(role, ROLE_ADMIN);
                assert_eq!(ttl_secs, None);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
