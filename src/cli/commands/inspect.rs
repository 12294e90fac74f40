//! `txvault inspect` — decrypt a customer export and summarize it.
//!
//! The record is checked for the customer-export fields first; a record
//! that fails the check is reported and the command exits non-zero.

use std::path::Path;

use crate::cli::{output, prompt_password, record_audit, Cli};
use crate::errors::{Result, TxVaultError};
use crate::package::record::{verify_customer_record, CustomerSummary};
use crate::package::{decrypt_package, read_package};

/// Execute the `inspect` command.
pub fn execute(cli: &Cli, package_path: &str) -> Result<()> {
    let path = Path::new(package_path);
    let package = read_package(path)?;
    let password = prompt_password()?;
    let record = decrypt_package(&package, &password)?;

    if let Err(problems) = verify_customer_record(&record) {
        for p in &problems {
            output::warning(p);
        }
        record_audit(cli, "inspect", path, Some("verification failed"));
        return Err(TxVaultError::CommandFailed(format!(
            "{package_path} is not a customer export ({} problem(s))",
            problems.len()
        )));
    }

    output::success("Decrypted record has the customer export structure");
    output::print_customer_summary(&CustomerSummary::from_record(&record));

    record_audit(cli, "inspect", path, Some("verified"));
    Ok(())
}
