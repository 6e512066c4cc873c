use yew::{Html, Properties, classes, function_component, html};

#[derive(Properties, PartialEq)]
pub struct StatCardProps {
    pub label: String,
    pub value: String,
    pub icon: &'static str,
    #[prop_or_default]
    pub color: Option<&'static str>,
}

#[function_component(StatCard)]
pub fn stat_card(props: &StatCardProps) -> Html {
    let style = props.color.map(|color| format!("color: {color}"));
    html! {
        <div class="card stat-card">
            <i class={classes!(props.icon, "fa-2x")} {style}></i>
            <div>
                <div class="stat-value">{props.value.clone()}</div>
                <div>{props.label.clone()}</div>
            </div>
        </div>
    }
}
