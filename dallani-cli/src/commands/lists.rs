//! Read-only listings. Each one drives the shared list controller exactly
//! like a dashboard page does: preset criteria, mount, resolve, then print
//! the derived view.

use crate::context::Context;
use crate::output::{Table, print_json};
use anyhow::{Result, anyhow, bail};
use chrono::NaiveDate;
use shared::format::{display_timestamp, money, or_dash, short_id, stars};
use shared::messages;
use shared::models::{
    AuditAction, AuditFilter, CustomerFilter, CustomerSort, CustomerStats, DisputeCounts, DisputeFilter,
    DriverFilter, InvoiceFilter, InvoiceState, OrderStatus, RatingFilter, RatingSummary,
};
use shared::query::{
    AuditLogs, Criteria, Customers, Disputes, Drivers, Effect, Invoices, ListQuery, ListResource, Orders,
    Ratings,
};

/// Mounts a controller with `criteria` and waits for its first page.
///
/// # Errors
/// Returns the localized failure of the fetch.
pub async fn load<R: ListResource>(ctx: &Context, criteria: Criteria<R::Filter, R::Sort>) -> Result<ListQuery<R>> {
    ctx.require_session()?;
    let mut query = ListQuery::<R>::with_criteria(criteria, ctx.config.search_debounce());
    let Effect::Fetch(ticket) = query.mount() else {
        bail!("nothing to fetch for {}", R::PATH);
    };
    let result = ctx.client.fetch_list::<R>(&ticket).await;
    let failure = result.as_ref().err().map(|err| err.user_message());
    query.resolve(&ticket, result);
    match failure {
        Some(message) => Err(anyhow!(message)),
        None => Ok(query),
    }
}

fn optional_money(amount: Option<f64>) -> String {
    amount.map_or_else(|| "-".to_string(), money)
}

pub async fn orders(
    ctx: &Context,
    status: Option<OrderStatus>,
    date: Option<NaiveDate>,
    search: Option<String>,
) -> Result<()> {
    let query = load::<Orders>(
        ctx,
        Criteria {
            filter: status,
            date,
            search: search.unwrap_or_default(),
            sort: (),
        },
    )
    .await?;
    let orders = query.visible();
    if ctx.json {
        return print_json(&orders);
    }

    let mut table = Table::new(["رقم الطلب", "الزبون", "السائق", "الحالة", "السعر", "التاريخ"]);
    for order in orders {
        table.row([
            short_id(&order.id).to_string(),
            or_dash(order.customer_name()).to_string(),
            or_dash(order.driver_name()).to_string(),
            order.status_badge().0,
            optional_money(order.estimated_price),
            display_timestamp(order.created_at.as_deref()),
        ]);
    }
    table.print_or("لا توجد طلبات");
    Ok(())
}

/// Detail view of one order, as the dashboard's order modal shows it.
pub async fn order_details(ctx: &Context, id: &str) -> Result<()> {
    let query = load::<Orders>(ctx, Criteria::default()).await?;
    let order = query
        .items()
        .iter()
        .find(|order| order.id == id)
        .ok_or_else(|| anyhow!("الطلب {id} غير موجود"))?;
    if ctx.json {
        return print_json(order);
    }

    println!("الطلب #{}", order.id);
    println!("الزبون: {}", or_dash(order.customer_name()));
    println!("الهاتف: {}", or_dash(order.customer_phone()));
    println!("الطلبات: {}", or_dash(order.items_text.as_deref()));
    println!("السائق: {}", or_dash(order.driver_name()));
    println!("السعر التقديري: {}", optional_money(order.estimated_price));
    println!("رسوم التوصيل: {}", optional_money(order.delivery_fee));
    println!("الحالة: {}", order.status_badge().0);
    println!("التاريخ: {}", display_timestamp(order.created_at.as_deref()));
    if let Some(image) = order.invoice_image_url.as_deref().filter(|url| !url.is_empty()) {
        println!("صورة الفاتورة: {}", ctx.client.asset_url(image));
    }
    Ok(())
}

pub async fn drivers(ctx: &Context, filter: DriverFilter, search: Option<String>) -> Result<()> {
    let query = load::<Drivers>(
        ctx,
        Criteria {
            filter,
            search: search.unwrap_or_default(),
            ..Criteria::default()
        },
    )
    .await?;
    let drivers = query.visible();
    if ctx.json {
        return print_json(&drivers);
    }

    let mut table = Table::new(["المعرف", "الاسم", "الهاتف", "اللوحة", "التقييم", "التوصيلات", "التسوية المعلقة", "الحالة"]);
    for driver in drivers {
        let pending = if driver.pending_settlement > 0.0 {
            format!("{} !", money(driver.pending_settlement))
        } else {
            money(driver.pending_settlement)
        };
        table.row([
            driver.id.clone(),
            or_dash(driver.name()).to_string(),
            or_dash(driver.phone()).to_string(),
            or_dash(driver.plate_number.as_deref()).to_string(),
            driver.rating.map_or_else(|| "-".to_string(), |rating| format!("{rating:.1}")),
            driver.total_deliveries.to_string(),
            pending,
            driver.status().label().to_string(),
        ]);
    }
    table.print_or("لا يوجد سائقون");
    Ok(())
}

pub async fn customers(
    ctx: &Context,
    sort: CustomerSort,
    search: Option<String>,
    filter: CustomerFilter,
) -> Result<()> {
    let query = load::<Customers>(
        ctx,
        Criteria {
            filter,
            date: None,
            search: search.unwrap_or_default(),
            sort,
        },
    )
    .await?;
    let customers = query.visible();
    if ctx.json {
        return print_json(&customers);
    }

    let stats = CustomerStats::from_customers(query.items());
    println!(
        "إجمالي الزبائن: {}  لديهم طلبات: {}  بدون طلبات: {}",
        stats.total, stats.with_orders, stats.without_orders
    );
    let mut table = Table::new(["المعرف", "الاسم", "الهاتف", "الطلبات", "تاريخ التسجيل", "الحالة"]);
    for customer in customers {
        table.row([
            customer.id.clone(),
            or_dash(customer.name.as_deref()).to_string(),
            or_dash(customer.phone.as_deref()).to_string(),
            customer.orders_count.to_string(),
            display_timestamp(customer.register_time.as_deref()),
            if customer.is_blocked { "محظور" } else { "نشط" }.to_string(),
        ]);
    }
    table.print_or("لا يوجد زبائن");
    Ok(())
}

pub async fn disputes(ctx: &Context, filter: DisputeFilter) -> Result<()> {
    let query = load::<Disputes>(
        ctx,
        Criteria {
            filter,
            ..Criteria::default()
        },
    )
    .await?;
    let disputes = query.visible();
    if ctx.json {
        return print_json(&disputes);
    }

    let counts = DisputeCounts::from_disputes(query.items());
    println!(
        "مفتوحة: {}  قيد التحقيق: {}  تم حلها: {}",
        counts.open, counts.investigating, counts.resolved
    );
    let mut table = Table::new(["المعرف", "الطلب", "الزبون", "السائق", "السبب", "الحالة"]);
    for dispute in disputes {
        table.row([
            dispute.id.clone(),
            or_dash(dispute.order_ref()).to_string(),
            or_dash(dispute.customer_name()).to_string(),
            or_dash(dispute.driver_name()).to_string(),
            or_dash(dispute.dispute_reason.as_deref()).to_string(),
            dispute.status().label().to_string(),
        ]);
    }
    table.print_or("لا توجد نزاعات");
    Ok(())
}

pub async fn invoices(
    ctx: &Context,
    location: Option<String>,
    state: InvoiceState,
    search: Option<String>,
) -> Result<()> {
    let query = load::<Invoices>(
        ctx,
        Criteria {
            filter: InvoiceFilter { location, state },
            search: search.unwrap_or_default(),
            ..Criteria::default()
        },
    )
    .await?;
    let invoices = query.visible();
    if ctx.json {
        return print_json(&invoices);
    }

    let mut table = Table::new(["رقم الطلب", "السائق", "الموقع", "المبلغ", "الحالة", "تاريخ الرفع"]);
    for invoice in invoices {
        table.row([
            short_id(&invoice.order_id).to_string(),
            or_dash(invoice.driver.as_deref()).to_string(),
            or_dash(invoice.location.as_deref()).to_string(),
            money(invoice.amount),
            invoice.state_badge().0.to_string(),
            display_timestamp(invoice.uploaded_at.as_deref()),
        ]);
    }
    table.print_or("لا توجد فواتير");
    Ok(())
}

pub async fn ratings(ctx: &Context, filter: RatingFilter, search: Option<String>) -> Result<()> {
    let query = load::<Ratings>(
        ctx,
        Criteria {
            filter,
            search: search.unwrap_or_default(),
            ..Criteria::default()
        },
    )
    .await?;
    let ratings = query.visible();
    if ctx.json {
        return print_json(&ratings);
    }

    let summary = RatingSummary::from_ratings(query.items());
    println!(
        "متوسط التقييم: {:.1}  الإجمالي: {}  إيجابية: {}  سلبية: {}",
        summary.average, summary.total, summary.positive, summary.negative
    );
    let mut table = Table::new(["الطلب", "الزبون", "السائق", "التقييم", "التعليق", "التاريخ"]);
    for rating in ratings {
        table.row([
            short_id(&rating.order_id).to_string(),
            or_dash(rating.customer.as_deref()).to_string(),
            or_dash(rating.driver.as_deref()).to_string(),
            stars(rating.stars()),
            or_dash(rating.comment.as_deref()).to_string(),
            display_timestamp(rating.created_at.as_deref()),
        ]);
    }
    table.print_or("لا توجد تقييمات");
    Ok(())
}

pub async fn audit_logs(
    ctx: &Context,
    action: Option<AuditAction>,
    date: Option<NaiveDate>,
    search: Option<String>,
) -> Result<()> {
    let query = load::<AuditLogs>(
        ctx,
        Criteria {
            filter: AuditFilter { action },
            date,
            search: search.unwrap_or_default(),
            sort: (),
        },
    )
    .await?;
    let entries = query.visible();
    if ctx.json {
        return print_json(&entries);
    }

    let mut table = Table::new(["الإجراء", "المسؤول", "الهدف", "التفاصيل", "التاريخ"]);
    for entry in entries {
        let action = entry.action().map_or_else(
            || entry.action.clone().unwrap_or_else(|| messages::NOT_AVAILABLE.to_string()),
            |action| format!("{} {}", action.icon(), action.label()),
        );
        table.row([
            action,
            or_dash(entry.admin.as_deref()).to_string(),
            or_dash(entry.target.as_deref()).to_string(),
            or_dash(entry.details.as_deref()).to_string(),
            display_timestamp(entry.created_at.as_deref()),
        ]);
    }
    table.print_or("لا توجد سجلات");
    Ok(())
}
