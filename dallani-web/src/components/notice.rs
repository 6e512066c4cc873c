use yew::{Callback, Html, MouseEvent, Properties, classes, function_component, html};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Transient message shown above a page's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct NoticeBannerProps {
    pub notice: Option<Notice>,
    #[prop_or_default]
    pub on_dismiss: Option<Callback<()>>,
}

#[function_component(NoticeBanner)]
pub fn notice_banner(props: &NoticeBannerProps) -> Html {
    let Some(notice) = &props.notice else {
        return html! {};
    };
    let kind = match notice.kind {
        NoticeKind::Success => "notice-success",
        NoticeKind::Error => "notice-error",
    };
    let dismiss = props.on_dismiss.clone().map(|callback| {
        let onclick = Callback::from(move |_: MouseEvent| callback.emit(()));
        html! { <button class="btn btn-secondary" {onclick}>{"×"}</button> }
    });

    html! {
        <div class={classes!("notice", kind)} role="status">
            <span>{notice.text.clone()}</span>
            {for dismiss}
        </div>
    }
}
