use crate::commands::actions::execute;
use crate::commands::lists::load;
use crate::context::Context;
use crate::output::{Table, print_json};
use anyhow::{Context as _, Result};
use chrono::{NaiveDate, Utc};
use clap::Subcommand;
use shared::actions::AdminAction;
use shared::export::{settlements_csv, settlements_filename};
use shared::format::money;
use shared::query::{Criteria, Settlements};
use std::fs;
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum SettlementCommand {
    /// Mark a driver's pending settlement as paid
    Pay {
        driver_id: String,

        /// Name shown in the confirmation prompt
        #[arg(long)]
        name: Option<String>,
    },
}

/// Prints the daily settlement report and optionally writes it as CSV.
///
/// # Arguments
/// * `date` - Report day, today in UTC when `None`
/// * `export` - `Some(dir)` writes `settlements_<date>.csv` into `dir`
///   (current directory when `dir` is `None`)
///
/// # Errors
/// Returns the localized fetch failure, or an error when there is nothing
/// to export or the file cannot be written.
pub async fn report(ctx: &Context, date: Option<NaiveDate>, export: Option<Option<PathBuf>>) -> Result<()> {
    let date = date.unwrap_or_else(|| Utc::now().date_naive());
    let query = load::<Settlements>(
        ctx,
        Criteria {
            date: Some(date),
            ..Criteria::default()
        },
    )
    .await?;
    let drivers = query.items();
    let summary = query.summary();

    if let Some(dir) = export {
        let csv = settlements_csv(drivers)?;
        let dir = dir.unwrap_or_else(|| PathBuf::from("."));
        let path = dir.join(settlements_filename(date));
        fs::write(&path, csv).with_context(|| format!("failed to write {}", path.display()))?;
        println!("{}", path.display());
        return Ok(());
    }

    if ctx.json {
        return print_json(drivers);
    }

    println!(
        "تسويات {}: إجمالي المستحق {}  عدد السائقين {}",
        date.format("%Y-%m-%d"),
        money(summary.total_pending),
        summary.drivers_count
    );
    let mut table = Table::new(["المعرف", "السائق", "الهاتف", "المبلغ المستحق", "الحالة"]);
    for driver in drivers {
        let amount = if driver.is_highlighted() {
            format!("{} !", money(driver.pending_settlement))
        } else {
            money(driver.pending_settlement)
        };
        table.row([
            driver.id.clone(),
            driver.name.clone().unwrap_or_default(),
            driver.phone.clone().unwrap_or_default(),
            amount,
            driver.state_label().to_string(),
        ]);
    }
    table.print_or("لا توجد تسويات معلقة");
    Ok(())
}

pub async fn settlement(ctx: &Context, command: SettlementCommand) -> Result<()> {
    let SettlementCommand::Pay { driver_id, name } = command;
    let driver_name = name.unwrap_or_else(|| driver_id.clone());
    execute(ctx, AdminAction::PaySettlement { driver_id, driver_name }).await
}
