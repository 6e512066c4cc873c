use super::{badge, placeholder_row, refetch_error};
use crate::api;
use crate::components::form::{enum_options, selected, textarea_value};
use crate::components::modal::Modal;
use crate::components::notice::NoticeBanner;
use crate::components::stat_card::StatCard;
use crate::hooks::{use_admin_action, use_list_query};
use shared::actions::AdminAction;
use shared::format::{or_dash, short_id};
use shared::models::{Dispute, DisputeCounts, DisputeFilter, DisputeStatus, Resolution};
use shared::query::{Criteria, Disputes};
use yew::prelude::*;

/// Resolution form of the dispute being closed.
#[derive(Debug, Clone, PartialEq)]
struct ResolutionDraft {
    dispute: Dispute,
    resolution: Resolution,
    notes: String,
}

impl ResolutionDraft {
    fn action(&self) -> AdminAction {
        AdminAction::ResolveDispute {
            dispute_id: self.dispute.id.clone(),
            resolution: self.resolution,
            notes: self.notes.trim().to_string(),
        }
    }
}

#[function_component(DisputesPage)]
pub fn disputes_page() -> Html {
    let list = use_list_query::<Disputes, _>(Criteria::default);
    let actions = {
        let list = list.clone();
        use_admin_action(Callback::from(move |()| list.refresh()))
    };
    let draft = use_state(|| None::<ResolutionDraft>);

    let on_filter = {
        let list = list.clone();
        Callback::from(move |event: Event| {
            if let Some(filter) = selected::<DisputeFilter>(&event) {
                list.update(|query| query.set_filter(filter));
            }
        })
    };
    let on_dismiss = {
        let actions = actions.clone();
        Callback::from(move |()| actions.set_notice(None))
    };

    let on_retry = list.retry_callback();
    let query = list.read();
    let disputes = query.visible();
    let counts = DisputeCounts::from_disputes(query.items());

    let rows = disputes.iter().map(|dispute| {
        let status = dispute.status();
        let on_resolve = {
            let draft = draft.clone();
            let dispute = (*dispute).clone();
            Callback::from(move |_: MouseEvent| {
                draft.set(Some(ResolutionDraft {
                    dispute: dispute.clone(),
                    resolution: Resolution::default(),
                    notes: String::new(),
                }));
            })
        };
        let evidence = dispute
            .evidence_url()
            .filter(|url| !url.is_empty())
            .map(|url| api::client().asset_url(url));
        html! {
            <tr key={dispute.id.clone()}>
                <td>{dispute.order_ref().map_or_else(|| "-".to_string(), |id| format!("#{}", short_id(id)))}</td>
                <td>{or_dash(dispute.customer_name())}</td>
                <td>{or_dash(dispute.driver_name())}</td>
                <td>{dispute.dispute_reason.as_deref().unwrap_or("غير محدد")}</td>
                <td>{badge(status.label(), status.tone())}</td>
                <td>
                    if status != DisputeStatus::Resolved {
                        <button class="btn btn-primary" onclick={on_resolve}>{"حل النزاع"}</button>
                    }
                    if let Some(href) = evidence {
                        {" "}<a {href} target="_blank" rel="noopener">{"عرض الأدلة"}</a>
                    }
                </td>
            </tr>
        }
    });

    let resolution_modal = (*draft).clone().map(|current| {
        let on_close = {
            let draft = draft.clone();
            Callback::from(move |()| draft.set(None))
        };
        let on_resolution = {
            let draft = draft.clone();
            let current = current.clone();
            Callback::from(move |event: Event| {
                if let Some(resolution) = selected::<Resolution>(&event) {
                    draft.set(Some(ResolutionDraft {
                        resolution,
                        ..current.clone()
                    }));
                }
            })
        };
        let on_notes = {
            let draft = draft.clone();
            let current = current.clone();
            Callback::from(move |event: InputEvent| {
                if let Some(notes) = textarea_value(&event) {
                    draft.set(Some(ResolutionDraft {
                        notes,
                        ..current.clone()
                    }));
                }
            })
        };
        let on_submit = {
            let draft = draft.clone();
            let actions = actions.clone();
            let action = current.action();
            Callback::from(move |_: MouseEvent| {
                draft.set(None);
                actions.request(action.clone());
            })
        };
        let busy = actions.is_in_flight(&current.action());
        let evidence = current
            .dispute
            .evidence_url()
            .filter(|url| !url.is_empty())
            .map(|url| api::client().asset_url(url));

        html! {
            <Modal title="حل النزاع" {on_close}>
                <p><strong>{"السبب: "}</strong>{current.dispute.dispute_reason.clone().unwrap_or_else(|| "غير محدد".to_string())}</p>
                if let Some(src) = evidence {
                    <p><strong>{"صورة الفاتورة:"}</strong></p>
                    <img {src} alt="دليل" style="max-width: 100%" />
                }
                <div class="form-field">
                    <label>{"القرار:"}</label>
                    <select onchange={on_resolution}>
                        {enum_options(current.resolution, Resolution::label)}
                    </select>
                </div>
                <div class="form-field">
                    <label>{"ملاحظات:"}</label>
                    <textarea placeholder="ملاحظات إضافية..." value={current.notes.clone()} oninput={on_notes} />
                </div>
                <button class="btn btn-success" disabled={busy} onclick={on_submit}>{"تأكيد الحل"}</button>
            </Modal>
        }
    });

    html! {
        <div>
            <h1>{"النزاعات"}</h1>
            <NoticeBanner notice={actions.notice()} on_dismiss={Some(on_dismiss)} />
            <div class="stats-grid">
                <StatCard label="نزاعات مفتوحة" value={counts.open.to_string()} icon="fas fa-exclamation-circle" color="#dc2626" />
                <StatCard label="قيد التحقيق" value={counts.investigating.to_string()} icon="fas fa-search" color="#f59e0b" />
                <StatCard label="تم حلها" value={counts.resolved.to_string()} icon="fas fa-check-circle" color="#16a34a" />
            </div>
            <div class="toolbar">
                <select onchange={on_filter}>
                    {enum_options(query.criteria().filter, DisputeFilter::label)}
                </select>
            </div>
            {refetch_error(query.phase(), disputes.is_empty(), &on_retry)}
            <table>
                <thead>
                    <tr>
                        <th>{"رقم الطلب"}</th>
                        <th>{"الزبون"}</th>
                        <th>{"السائق"}</th>
                        <th>{"الوصف"}</th>
                        <th>{"الحالة"}</th>
                        <th>{"إجراءات"}</th>
                    </tr>
                </thead>
                <tbody>
                    {placeholder_row(query.phase(), disputes.is_empty(), 6, "لا توجد نزاعات", &on_retry).unwrap_or_else(|| rows.collect())}
                </tbody>
            </table>
            {for resolution_modal}
            {actions.dialog()}
        </div>
    }
}
