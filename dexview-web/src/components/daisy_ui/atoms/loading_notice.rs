use crate::components::daisy_ui::foundation as f;

#[derive(f::Properties, PartialEq, Eq, Clone)]
pub struct LoadingNoticeProps {
    /// What is being fetched: `dex` at startup, a mon id on the detail page.
    pub subject: f::AttrValue,
    /// Full-page spinner for the startup screen.
    #[prop_or_default]
    pub large: bool,
}

#[must_use]
pub fn loading_text(subject: &str) -> String {
    format!("Loading {subject}…")
}

#[f::function_component(LoadingNotice)]
pub fn loading_notice(props: &LoadingNoticeProps) -> f::Html {
    let mut spinner = f::classes!("loading", "loading-spinner");
    if props.large {
        spinner.push(f::DaisySize::Lg.class("loading"));
    }
    f::html! {
        <div class="loading-notice inline-flex items-center gap-2" role="status" aria-live="polite" data-loading={props.subject.clone()}>
            <span class={spinner}></span>
            <span>{ loading_text(&props.subject) }</span>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    #[test]
    fn names_what_is_loading() {
        assert_eq!(loading_text("eevee"), "Loading eevee…");
        let html = block_on(
            LocalServerRenderer::<LoadingNotice>::with_props(LoadingNoticeProps {
                subject: "dex".into(),
                large: true,
            })
            .render(),
        );
        assert!(html.contains("Loading dex…"));
        assert!(html.contains(r#"data-loading="dex""#));
        assert!(html.contains("loading-lg"));
    }
}
