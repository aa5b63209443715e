//! Summary command - per-currency summary report

use anyhow::Result;
use chrono::NaiveDate;
use colored::Colorize;
use ledgerline_core::domain::report::MetricRow;
use ledgerline_core::LogEvent;
use rust_decimal::Decimal;

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

    let report = match ctx.report_service.summary(company_id, &actor, range) {
        Ok(report) => report,
        Err(e) => {
            log_event(
                &logger,
                LogEvent::new("report_failed")
                    .with_report("summary")
                    .with_error(e.to_string()),
            );
            return Err(e.into());
        }
    };
    log_event(&logger, LogEvent::new("report_generated").with_report("summary"));

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} {} to {}",
        "Summary Report".bold(),
        report.start_date,
        report.end_date
    );
    println!();

    let mut table = output::create_table();
    table.set_header(vec!["Currency", "Invoiced", "Outstanding", "Payments", "Expenses"]);

    // Stable display order by currency id
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
            list_total(&block.invoices),
            list_total(&block.outstanding),
            list_total(&block.payments),
            list_total(&block.expenses),
        ]);
    }

    println!("{}", table);

    Ok(())
}

/// Total across a per-currency result list (usually zero or one row)
fn list_total(rows: &[MetricRow]) -> String {
    let total: Decimal = rows.iter().map(|r| r.total).sum();
    total.to_string()
}
