use crate::context::Context;
use crate::output::print_json;
use anyhow::{Result, anyhow};
use clap::Subcommand;
use shared::format::money;
use shared::models::SystemSettings;
use shared::models::settings::notices;

#[derive(Subcommand, Debug)]
pub enum SettingsCommand {
    /// Print the current settings
    Show,
    /// Change one or more settings
    Set {
        /// Flat commission per order
        #[arg(long)]
        commission: Option<f64>,

        #[arg(long)]
        stores_enabled: Option<bool>,

        #[arg(long)]
        points_enabled: Option<bool>,

        #[arg(long)]
        points_per_order: Option<u64>,

        #[arg(long)]
        points_for_free_order: Option<u64>,
    },
}

pub async fn run(ctx: &Context, command: SettingsCommand) -> Result<()> {
    ctx.require_session()?;
    let mut settings = ctx
        .client
        .fetch_settings()
        .await
        .map_err(|err| anyhow!("{}: {}", notices::LOAD_FAILED, err.user_message()))?;

    match command {
        SettingsCommand::Show => {
            if ctx.json {
                return print_json(&settings);
            }
            print_settings(&settings);
        }
        SettingsCommand::Set {
            commission,
            stores_enabled,
            points_enabled,
            points_per_order,
            points_for_free_order,
        } => {
            if let Some(value) = commission {
                settings.commission_amount = value;
            }
            if let Some(value) = stores_enabled {
                settings.stores_enabled = value;
            }
            if let Some(value) = points_enabled {
                settings.points_enabled = value;
            }
            if let Some(value) = points_per_order {
                settings.points_per_order = value;
            }
            if let Some(value) = points_for_free_order {
                settings.points_for_free_order = value;
            }
            ctx.client
                .update_settings(&settings)
                .await
                .map_err(|err| anyhow!(err.user_message()))?;
            println!("{}", notices::SAVED);
        }
    }
    Ok(())
}

fn print_settings(settings: &SystemSettings) {
    let flag = |enabled: bool| if enabled { "مفعل" } else { "معطل" };
    println!("العمولة لكل طلب: {}", money(settings.commission_amount));
    println!("المتاجر: {}", flag(settings.stores_enabled));
    println!("نظام النقاط: {}", flag(settings.points_enabled));
    if settings.points_enabled {
        println!("النقاط لكل طلب: {}", settings.points_per_order);
        println!("النقاط للطلب المجاني: {}", settings.points_for_free_order);
    }
}
