use crate::pages::*;
use strum::{EnumIter, IntoEnumIterator};
use yew::prelude::*;
use yew_router::prelude::*;

/// Dashboard sections, in sidebar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Routable, EnumIter)]
pub enum Route {
    #[at("/")]
    Dashboard,
    #[at("/orders")]
    Orders,
    #[at("/customers")]
    Customers,
    #[at("/drivers")]
    Drivers,
    #[at("/invoices")]
    Invoices,
    #[at("/disputes")]
    Disputes,
    #[at("/settlements")]
    Settlements,
    #[at("/ratings")]
    Ratings,
    #[at("/audit-logs")]
    AuditLogs,
    #[at("/settings")]
    Settings,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl Route {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "لوحة التحكم",
            Self::Orders => "الطلبات",
            Self::Customers => "الزبائن",
            Self::Drivers => "السائقين",
            Self::Invoices => "الفواتير",
            Self::Disputes => "النزاعات",
            Self::Settlements => "التسويات",
            Self::Ratings => "التقييمات",
            Self::AuditLogs => "سجل العمليات",
            Self::Settings => "الإعدادات",
            Self::NotFound => "الصفحة غير موجودة",
        }
    }

    pub const fn icon(self) -> &'static str {
        match self {
            Self::Dashboard => "fas fa-chart-line",
            Self::Orders => "fas fa-box",
            Self::Customers => "fas fa-users",
            Self::Drivers => "fas fa-motorcycle",
            Self::Invoices => "fas fa-file-invoice-dollar",
            Self::Disputes => "fas fa-exclamation-triangle",
            Self::Settlements => "fas fa-money-bill-wave",
            Self::Ratings => "fas fa-star",
            Self::AuditLogs => "fas fa-clipboard-list",
            Self::Settings => "fas fa-cog",
            Self::NotFound => "fas fa-question",
        }
    }

    /// Routes listed in the sidebar.
    pub fn menu() -> impl Iterator<Item = Self> {
        Self::iter().filter(|route| *route != Self::NotFound)
    }
}

pub fn switch(route: Route) -> Html {
    web_sys::console::debug_1(&format!("Switching to route: {route:?}").into());
    match route {
        Route::Dashboard => html! { <DashboardPage /> },
        Route::Orders => html! { <OrdersPage /> },
        Route::Customers => html! { <CustomersPage /> },
        Route::Drivers => html! { <DriversPage /> },
        Route::Invoices => html! { <InvoicesPage /> },
        Route::Disputes => html! { <DisputesPage /> },
        Route::Settlements => html! { <SettlementsPage /> },
        Route::Ratings => html! { <RatingsPage /> },
        Route::AuditLogs => html! { <AuditLogsPage /> },
        Route::Settings => html! { <SettingsPage /> },
        Route::NotFound => html! { <ErrorPage /> },
    }
}
