use shared::{Choice, DeleteTarget, FormMode, ListFilters, User, UserRole};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::components::modals::{DeleteModal, UserModal};
use crate::components::pager::Pager;
use crate::components::query_status::{EmptyState, QueryStatus};
use crate::components::status_badge::StatusBadge;
use crate::hooks::use_api::use_config;
use crate::hooks::use_resources::use_users;

/// Staff and family accounts.
#[function_component(CarersPage)]
pub fn carers_page() -> Html {
    let config = use_config();
    let search = use_state(String::new);
    let role = use_state(String::new);
    let pending_only = use_state(|| false);
    let page = use_state(|| 1_u32);
    let form_mode = use_state(|| None::<FormMode<User>>);
    let delete_target = use_state(|| None::<DeleteTarget>);

    let filters = ListFilters::new()
        .with("search", search.trim())
        .with("role", &*role)
        .with_opt("is_approved", pending_only.then_some("false"))
        .with("page", *page);
    let users = use_users(filters);

    let on_search = {
        let search = search.clone();
        let page = page.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            search.set(input.value());
            page.set(1);
        })
    };
    let on_role = {
        let role = role.clone();
        let page = page.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            role.set(select.value());
            page.set(1);
        })
    };
    let on_pending = {
        let pending_only = pending_only.clone();
        let page = page.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            pending_only.set(input.checked());
            page.set(1);
        })
    };
    let on_add = {
        let form_mode = form_mode.clone();
        Callback::from(move |_: MouseEvent| form_mode.set(Some(FormMode::Create)))
    };
    let on_close_form = {
        let form_mode = form_mode.clone();
        Callback::from(move |_| form_mode.set(None))
    };
    let on_close_delete = {
        let delete_target = delete_target.clone();
        Callback::from(move |_| delete_target.set(None))
    };
    let on_page = {
        let page = page.clone();
        Callback::from(move |next: u32| page.set(next))
    };

    let body = match &users.data {
        Some(data) if !data.results.is_empty() => html! {
            <>
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>{"Name"}</th>
                            <th>{"Email"}</th>
                            <th>{"Phone"}</th>
                            <th>{"Role"}</th>
                            <th>{"Approval"}</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        {for data.results.iter().map(|user| {
                            let on_edit = {
                                let form_mode = form_mode.clone();
                                let user = user.clone();
                                Callback::from(move |_: MouseEvent| form_mode.set(Some(FormMode::Edit(user.clone()))))
                            };
                            let on_delete = {
                                let delete_target = delete_target.clone();
                                let user = user.clone();
                                Callback::from(move |_: MouseEvent| delete_target.set(Some(DeleteTarget::User(user.clone()))))
                            };
                            html! {
                                <tr key={user.id} class={classes!((!user.is_active).then_some("row-muted"))}>
                                    <td>{user.full_name()}</td>
                                    <td>{user.email.clone()}</td>
                                    <td>{user.phone.clone().unwrap_or_default()}</td>
                                    <td><StatusBadge value={user.role.value()} label={user.role.label()} /></td>
                                    <td>
                                        {if user.is_approved {
                                            html! { <StatusBadge value="approved" label="Approved" /> }
                                        } else {
                                            html! { <StatusBadge value="pending" label="Pending" /> }
                                        }}
                                    </td>
                                    <td class="row-actions">
                                        <button type="button" class="btn btn-small" onclick={on_edit}>{"Edit"}</button>
                                        <button type="button" class="btn btn-small btn-danger" onclick={on_delete}>{"Delete"}</button>
                                    </td>
                                </tr>
                            }
                        })}
                    </tbody>
                </table>
                <Pager page={*page} total={data.count} page_size={config.page_size} on_change={on_page} />
            </>
        },
        Some(_) => html! { <EmptyState message="No users match these filters." /> },
        None => html! {},
    };

    html! {
        <section class="page carers-page">
            <div class="page-toolbar">
                <input
                    type="search"
                    class="form-input search-input"
                    placeholder="Search by name or email"
                    value={(*search).clone()}
                    oninput={on_search}
                />
                <select class="form-select" onchange={on_role}>
                    <option value="" selected={role.is_empty()}>{"All roles"}</option>
                    {for UserRole::all().iter().map(|r| html! {
                        <option value={r.value()} selected={*role == r.value()}>{r.label()}</option>
                    })}
                </select>
                <label class="toolbar-toggle">
                    <input type="checkbox" checked={*pending_only} onchange={on_pending} />
                    {" Awaiting approval"}
                </label>
                <button type="button" class="btn btn-primary" onclick={on_add}>{"Add User"}</button>
            </div>

            <QueryStatus
                is_loading={users.is_loading}
                error={users.error_message()}
                on_retry={users.revalidate.clone()}
            />
            {body}

            <UserModal
                is_open={form_mode.is_some()}
                mode={(*form_mode).clone().unwrap_or(FormMode::Create)}
                on_saved={Callback::noop()}
                on_close={on_close_form}
            />
            <DeleteModal
                target={(*delete_target).clone()}
                on_deleted={Callback::noop()}
                on_close={on_close_delete}
            />
        </section>
    }
}
