//! Totals command - point-in-time totals report

use anyhow::Result;
use chrono::NaiveDate;
use colored::Colorize;
use ledgerline_core::domain::report::MetricSlot;
use ledgerline_core::LogEvent;

use super::{get_context, get_logger, log_event, report_range, resolve_acting, ActingArgs};
use crate::output;

pub fn run(
    acting: &ActingArgs,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    json: bool,
) -> Result<()> {
    let logger = get_logger();
    let ctx = get_context()?;
    let (company_id, actor) = resolve_acting(&ctx, acting)?;
    let range = report_range(from, to);

    let report = match ctx.report_service.totals(company_id, &actor, range) {
        Ok(report) => report,
        Err(e) => {
            log_event(
                &logger,
                LogEvent::new("report_failed")
                    .with_report("totals")
                    .with_error(e.to_string()),
            );
            return Err(e.into());
        }
    };
    log_event(&logger, LogEvent::new("report_generated").with_report("totals"));

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} {} to {}",
        "Totals Report".bold(),
        report.start_date,
        report.end_date
    );
    println!();

    let mut table = output::create_table();
    table.set_header(vec!["Currency", "Invoiced", "Revenue", "Outstanding", "Expenses"]);

    let mut ids: Vec<_> = report.data.keys().copied().collect();
    ids.sort_unstable();

    for id in ids {
        let block = &report.data[&id];
        let label = if block.code.is_empty() {
            format!("#{}", id)
        } else {
            block.code.clone()
        };
        table.add_row(vec![
            label,
            slot_total(&block.invoices),
            slot_total(&block.revenue),
            slot_total(&block.outstanding),
            slot_total(&block.expenses),
        ]);
    }

    println!("{}", table);

    Ok(())
}

/// Slot total, with an explicit dash for currencies without activity
fn slot_total(slot: &MetricSlot) -> String {
    match slot.row() {
        Some(row) => row.total.to_string(),
        None => "-".to_string(),
    }
}
