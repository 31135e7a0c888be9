use shared::{CareLevel, Choice, Client, DeleteTarget, FormMode, ListFilters};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::components::modals::{ClientModal, DeleteModal};
use crate::components::pager::Pager;
use crate::components::query_status::{EmptyState, QueryStatus};
use crate::components::status_badge::StatusBadge;
use crate::hooks::use_api::use_config;
use crate::hooks::use_resources::use_clients;

#[function_component(ClientsPage)]
pub fn clients_page() -> Html {
    let config = use_config();
    let search = use_state(String::new);
    let care_level = use_state(String::new);
    let page = use_state(|| 1_u32);
    let form_mode = use_state(|| None::<FormMode<Client>>);
    let delete_target = use_state(|| None::<DeleteTarget>);

    let filters = ListFilters::new()
        .with("search", search.trim())
        .with("care_level", &*care_level)
        .with("page", *page);
    let clients = use_clients(filters);

    let on_search = {
        let search = search.clone();
        let page = page.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            search.set(input.value());
            page.set(1);
        })
    };

    let on_care_level = {
        let care_level = care_level.clone();
        let page = page.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            care_level.set(select.value());
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

    let rows = clients.data.as_ref().map(|data| {
        data.results
            .iter()
            .map(|client| {
                let on_edit = {
                    let form_mode = form_mode.clone();
                    let client = client.clone();
                    Callback::from(move |_: MouseEvent| form_mode.set(Some(FormMode::Edit(client.clone()))))
                };
                let on_delete = {
                    let delete_target = delete_target.clone();
                    let client = client.clone();
                    Callback::from(move |_: MouseEvent| {
                        delete_target.set(Some(DeleteTarget::Client(client.clone())))
                    })
                };
                html! {
                    <tr key={client.id}>
                        <td>{client.client_id.clone()}</td>
                        <td>{client.full_name()}</td>
                        <td class="truncate">{client.diagnosis.clone()}</td>
                        <td>
                            <StatusBadge value={client.care_level.value()} label={client.care_level.label()} />
                        </td>
                        <td>{if client.is_active { "Active" } else { "Inactive" }}</td>
                        <td class="row-actions">
                            <button type="button" class="btn btn-small" onclick={on_edit}>{"Edit"}</button>
                            <button type="button" class="btn btn-small btn-danger" onclick={on_delete}>{"Delete"}</button>
                        </td>
                    </tr>
                }
            })
            .collect::<Html>()
    });

    html! {
        <section class="page clients-page">
            <div class="page-toolbar">
                <input
                    type="search"
                    class="form-input search-input"
                    placeholder="Search clients"
                    value={(*search).clone()}
                    oninput={on_search}
                />
                <select class="form-select" onchange={on_care_level}>
                    <option value="" selected={care_level.is_empty()}>{"All care levels"}</option>
                    {for CareLevel::all().iter().map(|level| html! {
                        <option value={level.value()} selected={*care_level == level.value()}>{level.label()}</option>
                    })}
                </select>
                <button type="button" class="btn btn-primary" onclick={on_add}>{"Add Client"}</button>
            </div>

            <QueryStatus
                is_loading={clients.is_loading}
                error={clients.error_message()}
                on_retry={clients.revalidate.clone()}
            />

            {match (&clients.data, rows) {
                (Some(data), Some(rows)) if !data.results.is_empty() => html! {
                    <>
                        <table class="data-table">
                            <thead>
                                <tr>
                                    <th>{"ID"}</th>
                                    <th>{"Name"}</th>
                                    <th>{"Diagnosis"}</th>
                                    <th>{"Care level"}</th>
                                    <th>{"Status"}</th>
                                    <th></th>
                                </tr>
                            </thead>
                            <tbody>{rows}</tbody>
                        </table>
                        <Pager page={*page} total={data.count} page_size={config.page_size} on_change={on_page} />
                    </>
                },
                (Some(_), _) => html! { <EmptyState message="No clients match these filters." /> },
                _ => html! {},
            }}

            <ClientModal
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
