use clap::Parser;
use tracing_subscriber::EnvFilter;
use txvault::cli::{commands, output, Cli, Commands};

/// Log filter env var; falls back to `warn` (or `debug` with `--verbose`).
const LOG_ENV: &str = "TXVAULT_LOG";

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "txvault=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Seal {
            ref input,
            ref output,
        } => commands::seal::execute(&cli, input, output.as_deref()),
        Commands::Open {
            ref package,
            ref output,
        } => commands::open::execute(&cli, package, output.as_deref()),
        Commands::SealFile {
            ref input,
            ref output,
        } => commands::seal_file::execute_seal(&cli, input, output.as_deref()),
        Commands::OpenFile {
            ref package,
            ref output,
        } => commands::seal_file::execute_open(&cli, package, output),
        Commands::Inspect { ref package } => commands::inspect::execute(&cli, package),
        #[cfg(feature = "audit-log")]
        Commands::Audit { last, ref since } => {
            commands::audit_cmd::execute(&cli, last, since.as_deref())
        }
        #[cfg(not(feature = "audit-log"))]
        Commands::Audit { .. } => Err(txvault::TxVaultError::CommandFailed(
            "audit log support was not compiled in (feature `audit-log`)".into(),
        )),
        Commands::Completions { shell } => commands::completions::execute(shell),
        Commands::Version => commands::version::execute(),
    };

    if let Err(e) = result {
        tracing::debug!(kind = ?e.kind(), "command failed");
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
