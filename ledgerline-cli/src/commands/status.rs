//! Status command - show dataset status and summary

use anyhow::Result;
use colored::Colorize;

use super::get_context;
use crate::output;

pub fn run(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let status = ctx.status_service.get_status()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!("{}", "Invoicing Data Status".bold());
    println!();

    let mut table = output::create_table();
    table.add_row(vec!["Companies", &status.total_companies.to_string()]);
    table.add_row(vec!["Users", &status.total_users.to_string()]);
    table.add_row(vec!["Clients", &status.total_clients.to_string()]);
    table.add_row(vec!["Invoices", &status.total_invoices.to_string()]);
    table.add_row(vec!["Payments", &status.total_payments.to_string()]);
    table.add_row(vec!["Expenses", &status.total_expenses.to_string()]);
    table.add_row(vec!["Currencies", &status.total_currencies.to_string()]);

    println!("{}", table);
    println!();

    if let (Some(earliest), Some(latest)) =
        (&status.invoice_dates.earliest, &status.invoice_dates.latest)
    {
        println!("Invoice dates: {} to {}", earliest, latest);
    }

    if ctx.config.demo_mode {
        println!();
        output::warning("Demo mode is enabled (reporting against demo.duckdb)");
    }

    Ok(())
}
