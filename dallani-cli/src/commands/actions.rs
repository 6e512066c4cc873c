//! Mutating commands. Each one goes through the shared [`ActionDesk`], so the
//! operator confirms before anything is sent.

use crate::context::Context;
use anyhow::{Result, bail};
use clap::Subcommand;
use shared::actions::{ActionDesk, ActionOutcome, AdminAction};
use shared::messages;
use shared::models::Resolution;
use std::io::{self, BufRead, Write};
use tracing::debug;

#[derive(Subcommand, Debug)]
pub enum DriverCommand {
    /// Approve a driver awaiting review
    Approve { id: String },
    /// Block a driver
    Block { id: String },
    /// Lift a driver's block
    Unblock { id: String },
}

#[derive(Subcommand, Debug)]
pub enum CustomerCommand {
    /// Block a customer
    Block { id: String },
    /// Lift a customer's block
    Unblock { id: String },
}

#[derive(Subcommand, Debug)]
pub enum DisputeCommand {
    /// Close a dispute with a resolution
    Resolve {
        id: String,

        #[arg(long, default_value = "no-action")]
        resolution: Resolution,

        #[arg(long, default_value = "")]
        notes: String,
    },
}

pub async fn driver(ctx: &Context, command: DriverCommand) -> Result<()> {
    let action = match command {
        DriverCommand::Approve { id } => AdminAction::ApproveDriver { driver_id: id },
        DriverCommand::Block { id } => AdminAction::BlockDriver { driver_id: id },
        DriverCommand::Unblock { id } => AdminAction::UnblockDriver { driver_id: id },
    };
    execute(ctx, action).await
}

pub async fn customer(ctx: &Context, command: CustomerCommand) -> Result<()> {
    let action = match command {
        CustomerCommand::Block { id } => AdminAction::BlockCustomer { customer_id: id },
        CustomerCommand::Unblock { id } => AdminAction::UnblockCustomer { customer_id: id },
    };
    execute(ctx, action).await
}

pub async fn dispute(ctx: &Context, command: DisputeCommand) -> Result<()> {
    let DisputeCommand::Resolve { id, resolution, notes } = command;
    execute(
        ctx,
        AdminAction::ResolveDispute {
            dispute_id: id,
            resolution,
            notes,
        },
    )
    .await
}

/// Requests, confirms and sends `action`.
///
/// # Errors
/// Returns the server message or a localized fallback when the action fails.
pub async fn execute(ctx: &Context, action: AdminAction) -> Result<()> {
    ctx.require_session()?;
    let mut desk = ActionDesk::new();
    if !desk.request(action) {
        bail!(messages::ACTION_IN_FLIGHT);
    }

    let prompt = desk.pending().map(AdminAction::confirmation_prompt).unwrap_or_default();
    if !ctx.assume_yes && !confirm(&prompt)? {
        desk.cancel();
        println!("تم الإلغاء");
        return Ok(());
    }

    let Some(action) = desk.confirm() else {
        bail!(messages::ACTION_IN_FLIGHT);
    };
    let outcome = ActionOutcome::from_result(ctx.client.perform(&action).await);
    desk.finish(&action);
    debug!(path = %action.path(), refresh = outcome.should_refresh(), "action finished");

    match outcome {
        ActionOutcome::Completed(message) => {
            println!("{message}");
            Ok(())
        }
        ActionOutcome::Failed(message) => bail!(message),
        ActionOutcome::SessionExpired => bail!(messages::SESSION_EXPIRED),
    }
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt} [y/N] ");
    io::stdout().flush().ok();
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes" | "نعم" | "ن")
}
