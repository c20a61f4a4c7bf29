use crate::components::daisy_ui::{ErrorNotice, LoadingNotice};
use dexview_core::LoadState;
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct StatusPageProps {
    pub state: LoadState,
}

/// Startup screen shown until the index is available. Renders nothing once ready.
#[function_component(StatusPage)]
pub fn status_page(props: &StatusPageProps) -> Html {
    match &props.state {
        LoadState::Loading => html! {
            <section class="panel status" aria-busy="true" data-testid="status-loading">
                <LoadingNotice subject="dex" large=true />
            </section>
        },
        LoadState::Failed(message) => html! {
            <section class="panel status" data-testid="status-failed">
                <ErrorNotice title="The dex could not be loaded" message={message.clone()} />
            </section>
        },
        LoadState::Ready => Html::default(),
    }
}
