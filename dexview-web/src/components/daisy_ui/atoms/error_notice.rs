use crate::components::daisy_ui::foundation as f;

#[derive(f::Properties, PartialEq, Clone)]
pub struct ErrorNoticeProps {
    pub title: f::AttrValue,
    /// The load error as shown to the user, e.g. `Failed to load out/dex.json: HTTP 404`.
    pub message: f::AttrValue,
    /// Shows a Retry button when set.
    #[prop_or_default]
    pub on_retry: Option<f::Callback<f::MouseEvent>>,
}

/// A failed load. Always announced assertively.
#[f::function_component(ErrorNotice)]
pub fn error_notice(props: &ErrorNoticeProps) -> f::Html {
    f::html! {
        <div class={f::classes!("alert", f::DaisyColor::Error.class("alert"))} role="alert">
            <div class="alert-content">
                <strong>{ props.title.clone() }</strong>
                <p class="error-message">{ props.message.clone() }</p>
            </div>
            if let Some(on_retry) = props.on_retry.clone() {
                <button class="btn btn-sm" onclick={on_retry}>{ "Retry" }</button>
            }
        </div>
    }
}
