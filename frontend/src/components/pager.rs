use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PagerProps {
    /// 1-based.
    pub page: u32,
    pub total: u64,
    pub page_size: u32,
    pub on_change: Callback<u32>,
}

pub fn page_count(total: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 1;
    }
    (total.div_ceil(page_size as u64) as u32).max(1)
}

/// Previous/next controls for a paginated list.
#[function_component(Pager)]
pub fn pager(props: &PagerProps) -> Html {
    let pages = page_count(props.total, props.page_size);
    if pages <= 1 {
        return html! {};
    }

    let on_previous = {
        let on_change = props.on_change.clone();
        let page = props.page;
        Callback::from(move |_: MouseEvent| on_change.emit(page.saturating_sub(1).max(1)))
    };
    let on_next = {
        let on_change = props.on_change.clone();
        let page = props.page;
        Callback::from(move |_: MouseEvent| on_change.emit((page + 1).min(pages)))
    };

    html! {
        <div class="pager">
            <button type="button" class="btn btn-secondary" onclick={on_previous} disabled={props.page <= 1}>
                {"Previous"}
            </button>
            <span class="pager-status">{format!("Page {} of {} ({} records)", props.page, pages, props.total)}</span>
            <button type="button" class="btn btn-secondary" onclick={on_next} disabled={props.page >= pages}>
                {"Next"}
            </button>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(0, 50), 1);
        assert_eq!(page_count(50, 50), 1);
        assert_eq!(page_count(51, 50), 2);
        assert_eq!(page_count(10, 0), 1);
    }
}
