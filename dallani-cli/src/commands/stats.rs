use crate::context::Context;
use crate::output::print_json;
use anyhow::{Result, anyhow};
use shared::format::money;

/// Prints the six dashboard figures.
///
/// # Errors
/// Returns the localized failure of `admin/stats`.
pub async fn show(ctx: &Context) -> Result<()> {
    ctx.require_session()?;
    let stats = ctx
        .client
        .fetch_stats()
        .await
        .map_err(|err| anyhow!(err.user_message()))?;
    if ctx.json {
        return print_json(&stats);
    }

    println!("إجمالي الطلبات: {}", stats.total_orders);
    println!("الطلبات المعلقة: {}", stats.pending_orders);
    println!("السائقون النشطون: {}", stats.active_drivers);
    println!("السائقون المحظورون: {}", stats.blocked_drivers);
    println!("إجمالي السائقين: {}", stats.total_drivers);
    println!("إجمالي التسويات المعلقة: {}", money(stats.total_pending_settlement));
    Ok(())
}
