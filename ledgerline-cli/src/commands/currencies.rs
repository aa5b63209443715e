//! Currencies command - show the resolved currency set

use anyhow::Result;
use colored::Colorize;

use super::{get_context, resolve_acting, ActingArgs};
use crate::output;

pub fn run(acting: &ActingArgs, refresh: bool, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let (company_id, actor) = resolve_acting(&ctx, acting)?;

    if refresh {
        let count = ctx.currency_service.refresh_directory()?;
        if !json {
            output::info(&format!("Directory refreshed: {} currencies", count));
        }
    }

    let resolved = ctx.currency_service.resolve_decorated(company_id, &actor)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&resolved)?);
        return Ok(());
    }

    println!("{}", "Resolved Currencies".bold());
    println!();

    let mut table = output::create_table();
    table.set_header(vec!["Id", "Code"]);
    for currency in &resolved {
        let code = if currency.code.is_empty() {
            "(not in directory)".to_string()
        } else {
            currency.code.clone()
        };
        table.add_row(vec![currency.id.to_string(), code]);
    }

    println!("{}", table);
    println!();
    println!(
        "{} currencies for {} (as {})",
        resolved.len(),
        company_id,
        actor.name
    );

    Ok(())
}
