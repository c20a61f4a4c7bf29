use crate::components::daisy_ui::foundation as f;

/// Page buttons shown on each side of the current page.
const WINDOW: usize = 2;

#[derive(f::Properties, PartialEq, Clone)]
pub struct PaginationProps {
    pub total_pages: usize,
    /// 1-based.
    pub current_page: usize,
    #[prop_or_default]
    pub class: f::Classes,
    #[prop_or_default]
    pub on_change: f::Callback<usize>,
}

/// 1-based page numbers to render around `current`.
#[must_use]
pub fn visible_pages(current: usize, total: usize) -> std::ops::RangeInclusive<usize> {
    let total = total.max(1);
    let current = current.clamp(1, total);
    current.saturating_sub(WINDOW).max(1)..=(current + WINDOW).min(total)
}

/// Navigation never wraps: the arrows are disabled at either end.
#[f::function_component(Pagination)]
pub fn pagination(props: &PaginationProps) -> f::Html {
    let class = f::class_list(&["join"], &props.class);
    let total = props.total_pages.max(1);
    let current = props.current_page.clamp(1, total);
    let go_to = |page: usize| {
        let cb = props.on_change.clone();
        f::Callback::from(move |_: f::MouseEvent| cb.emit(page))
    };
    f::html! {
        <div class={class} role="group" aria-label="Pagination">
            <button class="join-item btn" aria-label="Previous page" disabled={current <= 1} onclick={go_to(current.saturating_sub(1))}>{"«"}</button>
            { for visible_pages(current, total).map(|page| {
                let mut btn_class = f::classes!("join-item", "btn");
                if page == current {
                    btn_class.push("btn-active");
                }
                let aria_current = (page == current).then(|| f::AttrValue::from("page"));
                f::html! { <button class={btn_class} aria-current={aria_current} onclick={go_to(page)}>{ page.to_string() }</button> }
            })}
            <button class="join-item btn" aria-label="Next page" disabled={current >= total} onclick={go_to(current + 1)}>{"»"}</button>
            <span class="join-item px-3 self-center">{ format!("Page {current} of {total}") }</span>
        </div>
    }
}
