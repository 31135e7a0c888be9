use shared::{format_duration, Activity, ActivityCategory, Choice, DeleteTarget, FormMode, ListFilters};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::components::modals::{ActivityModal, DeleteModal};
use crate::components::pager::Pager;
use crate::components::query_status::{EmptyState, QueryStatus};
use crate::components::status_badge::StatusBadge;
use crate::hooks::use_api::use_config;
use crate::hooks::use_resources::use_activities;

/// Comma-separated goal titles for the table, falling back to ids.
fn goal_summary(activity: &Activity) -> String {
    if activity.goals.is_empty() {
        return "-".to_string();
    }
    activity
        .goals
        .iter()
        .map(|link| {
            link.goal_title
                .clone()
                .unwrap_or_else(|| format!("Goal #{}", link.goal))
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[function_component(ActivitiesPage)]
pub fn activities_page() -> Html {
    let config = use_config();
    let search = use_state(String::new);
    let category = use_state(String::new);
    let page = use_state(|| 1_u32);
    let form_mode = use_state(|| None::<FormMode<Activity>>);
    let delete_target = use_state(|| None::<DeleteTarget>);

    let filters = ListFilters::new()
        .with("search", search.trim())
        .with("category", &*category)
        .with("page", *page);
    let activities = use_activities(filters);

    let on_search = {
        let search = search.clone();
        let page = page.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            search.set(input.value());
            page.set(1);
        })
    };
    let on_category = {
        let category = category.clone();
        let page = page.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            category.set(select.value());
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

    let rows = activities.data.as_ref().map(|data| {
        data.results
            .iter()
            .map(|activity| {
                let on_edit = {
                    let form_mode = form_mode.clone();
                    let activity = activity.clone();
                    Callback::from(move |_: MouseEvent| form_mode.set(Some(FormMode::Edit(activity.clone()))))
                };
                let on_delete = {
                    let delete_target = delete_target.clone();
                    let activity = activity.clone();
                    Callback::from(move |_: MouseEvent| {
                        delete_target.set(Some(DeleteTarget::Activity(activity.clone())))
                    })
                };
                html! {
                    <tr key={activity.id} class={classes!((!activity.is_active).then_some("row-muted"))}>
                        <td>
                            <div class="cell-title">{activity.name.clone()}</div>
                            <div class="cell-hint truncate">{activity.description.clone()}</div>
                        </td>
                        <td>{activity.category.label()}</td>
                        <td>
                            <StatusBadge value={activity.difficulty.value()} label={activity.difficulty.label()} />
                        </td>
                        <td>
                            {activity.estimated_duration
                                .map(|minutes| format_duration(minutes as i64))
                                .unwrap_or_else(|| "-".to_string())}
                        </td>
                        <td class="truncate">{goal_summary(activity)}</td>
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
        <section class="page activities-page">
            <div class="page-toolbar">
                <input
                    type="search"
                    class="form-input search-input"
                    placeholder="Search activities"
                    value={(*search).clone()}
                    oninput={on_search}
                />
                <select class="form-select" onchange={on_category}>
                    <option value="" selected={category.is_empty()}>{"All categories"}</option>
                    {for ActivityCategory::all().iter().map(|c| html! {
                        <option value={c.value()} selected={*category == c.value()}>{c.label()}</option>
                    })}
                </select>
                <button type="button" class="btn btn-primary" onclick={on_add}>{"Add Activity"}</button>
            </div>

            <QueryStatus
                is_loading={activities.is_loading}
                error={activities.error_message()}
                on_retry={activities.revalidate.clone()}
            />

            {match (&activities.data, rows) {
                (Some(data), Some(rows)) if !data.results.is_empty() => html! {
                    <>
                        <table class="data-table">
                            <thead>
                                <tr>
                                    <th>{"Activity"}</th>
                                    <th>{"Category"}</th>
                                    <th>{"Difficulty"}</th>
                                    <th>{"Duration"}</th>
                                    <th>{"Goals"}</th>
                                    <th></th>
                                </tr>
                            </thead>
                            <tbody>{rows}</tbody>
                        </table>
                        <Pager page={*page} total={data.count} page_size={config.page_size} on_change={on_page} />
                    </>
                },
                (Some(_), _) => html! { <EmptyState message="No activities match these filters." /> },
                _ => html! {},
            }}

            <ActivityModal
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

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use shared::{Difficulty, GoalLink};

    fn activity(goals: Vec<GoalLink>) -> Activity {
        let stamp = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
        Activity {
            id: 4,
            name: "Garden walk".to_string(),
            description: "Short walk around the garden".to_string(),
            category: ActivityCategory::default(),
            difficulty: Difficulty::default(),
            instructions: None,
            estimated_duration: Some(30),
            client: None,
            goals,
            is_active: true,
            created_at: stamp,
            updated_at: stamp,
        }
    }

    #[test]
    fn test_goal_summary() {
        assert_eq!(goal_summary(&activity(vec![])), "-");
        let linked = activity(vec![
            GoalLink { goal: 2, goal_title: Some("Walk daily".to_string()), contribution_weight: 5 },
            GoalLink { goal: 9, goal_title: None, contribution_weight: 1 },
        ]);
        assert_eq!(goal_summary(&linked), "Walk daily, Goal #9");
    }
}
