//! Customer transaction records.
//!
//! The sealing layer treats records as opaque JSON.  The transaction
//! exports this tool is used for do have a known shape, though, and
//! `inspect` uses the helpers here to check a decrypted record and pull
//! out a short summary.

use serde_json::Value;

/// Top-level fields every customer export must have.
pub const REQUIRED_FIELDS: [&str; 6] = [
    "customer_id",
    "customer_name",
    "account",
    "deposits",
    "purchases",
    "statistics",
];

/// How many deposits / purchases the summary keeps.
const PREVIEW_LEN: usize = 3;

/// Check that `record` looks like a customer export.
///
/// Returns every problem found rather than stopping at the first.
pub fn verify_customer_record(record: &Value) -> Result<(), Vec<String>> {
    let mut problems = Vec::new();

    for field in REQUIRED_FIELDS {
        if record.get(field).is_none() {
            problems.push(format!("missing field `{field}`"));
        }
    }

    for field in ["deposits", "purchases"] {
        if let Some(v) = record.get(field) {
            if !v.is_array() {
                problems.push(format!("`{field}` is not a list"));
            }
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(problems)
    }
}

/// One line of the deposit / purchase preview.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionLine {
    pub date: String,
    pub amount: f64,
    /// Deposit description or purchase merchant name.
    pub label: String,
}

/// Human-oriented digest of a customer export.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerSummary {
    pub customer_id: String,
    pub customer_name: String,
    pub account_type: String,
    pub balance: f64,
    pub rewards: String,
    pub total_deposits: u64,
    pub total_purchases: u64,
    pub total_deposited: f64,
    pub total_spent: f64,
    pub categories_active: u64,
    pub date_range: String,
    pub first_deposits: Vec<TransactionLine>,
    pub first_purchases: Vec<TransactionLine>,
}

impl CustomerSummary {
    /// Build a summary, filling gaps with placeholders.
    pub fn from_record(record: &Value) -> Self {
        let account = record.get("account").unwrap_or(&Value::Null);
        let stats = record.get("statistics").unwrap_or(&Value::Null);

        Self {
            customer_id: text(record, "customer_id", "N/A"),
            customer_name: text(record, "customer_name", "N/A"),
            account_type: text(account, "type", "N/A"),
            balance: number(account, "balance"),
            rewards: text(account, "rewards", "N/A"),
            total_deposits: count(stats, "total_deposits"),
            total_purchases: count(stats, "total_purchases"),
            total_deposited: number(stats, "total_deposited"),
            total_spent: number(stats, "total_spent"),
            categories_active: count(stats, "categories_active"),
            date_range: text(stats, "date_range", "N/A"),
            first_deposits: preview(record, "deposits", "transaction_date", "description", "N/A"),
            first_purchases: preview(record, "purchases", "purchase_date", "merchant_name", "Unknown"),
        }
    }
}

fn preview(
    record: &Value,
    list: &str,
    date_key: &str,
    label_key: &str,
    label_default: &str,
) -> Vec<TransactionLine> {
    record
        .get(list)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .take(PREVIEW_LEN)
                .map(|item| TransactionLine {
                    date: text(item, date_key, "N/A"),
                    amount: number(item, "amount"),
                    label: text(item, label_key, label_default),
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Strings come back as-is; numbers and booleans are rendered.
fn text(v: &Value, key: &str, default: &str) -> String {
    match v.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => default.to_string(),
    }
}

fn number(v: &Value, key: &str) -> f64 {
    v.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}

fn count(v: &Value, key: &str) -> u64 {
    v.get(key).and_then(Value::as_u64).unwrap_or(0)
}
