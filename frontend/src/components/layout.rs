use yew::prelude::*;

use crate::navigation::{Page, Section};

#[derive(Properties, PartialEq)]
pub struct SidebarProps {
    pub current: Page,
    pub on_navigate: Callback<Page>,
}

#[function_component(Sidebar)]
pub fn sidebar(props: &SidebarProps) -> Html {
    html! {
        <nav class="sidebar">
            <div class="sidebar-brand">
                <span class="brand-mark">{"TC"}</span>
                <span class="brand-name">{"CareConnect"}</span>
            </div>
            {for Section::ALL.iter().map(|section| html! {
                <div class="sidebar-section">
                    <h5 class="sidebar-section-title">{section.label()}</h5>
                    <ul class="sidebar-links">
                        {for section.pages().into_iter().map(|page| {
                            let onclick = {
                                let on_navigate = props.on_navigate.clone();
                                Callback::from(move |e: MouseEvent| {
                                    e.prevent_default();
                                    on_navigate.emit(page);
                                })
                            };
                            html! {
                                <li>
                                    <a
                                        href="#"
                                        class={classes!("sidebar-link", (page == props.current).then_some("active"))}
                                        aria-current={(page == props.current).then_some("page")}
                                        {onclick}
                                    >
                                        <span class="sidebar-icon">{page.icon()}</span>
                                        {page.label()}
                                    </a>
                                </li>
                            }
                        })}
                    </ul>
                </div>
            })}
        </nav>
    }
}

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub page: Page,
    pub user_name: AttrValue,
    #[prop_or_default]
    pub user_role: Option<AttrValue>,
    pub on_logout: Callback<()>,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    let on_logout = {
        let on_logout = props.on_logout.clone();
        Callback::from(move |_: MouseEvent| on_logout.emit(()))
    };

    html! {
        <header class="header">
            <div class="header-left">
                <Breadcrumbs page={props.page} />
                <h1 class="page-title">{props.page.label()}</h1>
            </div>
            <div class="header-right">
                <div class="header-user">
                    <span class="user-name">{props.user_name.clone()}</span>
                    {if let Some(role) = &props.user_role {
                        html! { <span class="user-role">{role.clone()}</span> }
                    } else {
                        html! {}
                    }}
                </div>
                <button type="button" class="btn btn-secondary btn-logout" onclick={on_logout}>
                    {"Log out"}
                </button>
            </div>
        </header>
    }
}

#[derive(Properties, PartialEq)]
pub struct BreadcrumbsProps {
    pub page: Page,
}

#[function_component(Breadcrumbs)]
pub fn breadcrumbs(props: &BreadcrumbsProps) -> Html {
    let crumbs = props.page.breadcrumbs();
    let last = crumbs.len().saturating_sub(1);

    html! {
        <nav class="breadcrumbs" aria-label="Breadcrumb">
            {for crumbs.into_iter().enumerate().map(|(i, crumb)| html! {
                <>
                    <span class={classes!("crumb", (i == last).then_some("crumb-current"))}>{crumb}</span>
                    {if i < last { html! { <span class="crumb-separator">{"/"}</span> } } else { html! {} }}
                </>
            })}
        </nav>
    }
}
