//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::package::record::{CustomerSummary, TransactionLine};

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    eprintln!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    eprintln!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    eprintln!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print a customer summary as two tables: account facts, then the
/// first few deposits and purchases.
pub fn print_customer_summary(s: &CustomerSummary) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Field", "Value"]);

    let rows = [
        ("Customer ID", s.customer_id.clone()),
        ("Customer Name", s.customer_name.clone()),
        ("Account Type", s.account_type.clone()),
        ("Balance", money(s.balance)),
        ("Rewards", s.rewards.clone()),
        ("Total Deposits", s.total_deposits.to_string()),
        ("Total Purchases", s.total_purchases.to_string()),
        ("Total Deposited", money(s.total_deposited)),
        ("Total Spent", money(s.total_spent)),
        ("Categories Active", s.categories_active.to_string()),
        ("Date Range", s.date_range.clone()),
    ];
    for (field, value) in rows {
        table.add_row(vec![field.to_string(), value]);
    }
    println!("{table}");

    print_transactions("First deposits", "Description", &s.first_deposits);
    print_transactions("First purchases", "Merchant", &s.first_purchases);
}

fn print_transactions(title: &str, label_header: &str, lines: &[TransactionLine]) {
    println!("{}", style(title).bold());
    if lines.is_empty() {
        println!("  {}", style("none").dim());
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Date", "Amount", label_header]);
    for line in lines {
        table.add_row(vec![line.date.clone(), money(line.amount), line.label.clone()]);
    }
    println!("{table}");
}

/// `1234.5` -> `$1,234.50`
fn money(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();

    let mut grouped = String::new();
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{sign}${grouped}.{:02}", cents % 100)
}
