use chrono::NaiveDate;
use shared::{Choice, Client, DeleteTarget, FormMode, Goal, GoalPriority, GoalStatus, ListFilters};
use web_sys::HtmlSelectElement;
use yew::prelude::*;

use crate::components::modals::{DeleteModal, GoalModal};
use crate::components::pager::Pager;
use crate::components::query_status::{EmptyState, QueryStatus};
use crate::components::status_badge::StatusBadge;
use crate::hooks::use_api::use_config;
use crate::hooks::use_resources::{use_all, use_goals};
use crate::services::date_utils::{format_date, today};

/// "Due in 5 days", "Due today" or "3 days overdue" for open goals.
fn due_label(goal: &Goal, today: NaiveDate) -> Option<String> {
    let target = goal.target_date?;
    if matches!(goal.status, GoalStatus::Completed | GoalStatus::Cancelled) {
        return None;
    }
    let days = (target - today).num_days();
    Some(match days {
        0 => "Due today".to_string(),
        1 => "Due tomorrow".to_string(),
        d if d > 1 => format!("Due in {d} days"),
        -1 => "1 day overdue".to_string(),
        d => format!("{} days overdue", -d),
    })
}

#[derive(Properties, PartialEq)]
struct GoalCardProps {
    goal: Goal,
    today: NaiveDate,
    on_edit: Callback<Goal>,
    on_delete: Callback<Goal>,
}

#[function_component(GoalCard)]
fn goal_card(props: &GoalCardProps) -> Html {
    let goal = &props.goal;
    let progress = goal.progress_percentage.clamp(0.0, 100.0);
    let due = due_label(goal, props.today);
    let overdue = due.as_deref().is_some_and(|label| label.ends_with("overdue"));

    let on_edit = {
        let on_edit = props.on_edit.clone();
        let goal = goal.clone();
        Callback::from(move |_: MouseEvent| on_edit.emit(goal.clone()))
    };
    let on_delete = {
        let on_delete = props.on_delete.clone();
        let goal = goal.clone();
        Callback::from(move |_: MouseEvent| on_delete.emit(goal.clone()))
    };

    html! {
        <article class="goal-card">
            <header class="goal-card-header">
                <h3>{goal.title.clone()}</h3>
                <StatusBadge value={goal.status.value()} label={goal.status.label()} />
            </header>
            <p class="goal-card-client">
                {goal.client_name.clone().unwrap_or_else(|| format!("Client #{}", goal.client))}
                <span class={format!("priority priority-{}", goal.priority.value())}>
                    {format!(" · {} priority", goal.priority.label())}
                </span>
            </p>
            <p class="goal-card-description">{goal.description.clone()}</p>
            <div class="progress-bar" role="progressbar" aria-valuenow={format!("{progress:.0}")}>
                <div class="progress-fill" style={format!("width: {progress:.0}%")}></div>
            </div>
            <div class="goal-card-meta">
                <span>{format!("{progress:.0}% complete")}</span>
                {match goal.target_date {
                    Some(target) => html! {
                        <span class={classes!("goal-due", overdue.then_some("goal-due-overdue"))} title={format_date(target)}>
                            {due.unwrap_or_else(|| format_date(target))}
                        </span>
                    },
                    None => html! {},
                }}
            </div>
            <div class="goal-card-meta">
                <span>{format!("{} primary activities", goal.primary_activities.len())}</span>
                <span>{format!("{} carers", goal.assigned_carers.len())}</span>
            </div>
            <footer class="goal-card-actions">
                <button type="button" class="btn btn-small" onclick={on_edit}>{"Edit"}</button>
                <button type="button" class="btn btn-small btn-danger" onclick={on_delete}>{"Delete"}</button>
            </footer>
        </article>
    }
}

#[function_component(GoalsPage)]
pub fn goals_page() -> Html {
    let config = use_config();
    let today = today();
    let status = use_state(String::new);
    let priority = use_state(String::new);
    let client = use_state(String::new);
    let page = use_state(|| 1_u32);
    let form_mode = use_state(|| None::<FormMode<Goal>>);
    let delete_target = use_state(|| None::<DeleteTarget>);

    let clients = use_all::<Client>();
    let filters = ListFilters::new()
        .with("status", &*status)
        .with("priority", &*priority)
        .with("client", &*client)
        .with("page", *page);
    let goals = use_goals(filters);

    let select_handler = |state: &UseStateHandle<String>| {
        let state = state.clone();
        let page = page.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            state.set(select.value());
            page.set(1);
        })
    };
    let on_status = select_handler(&status);
    let on_priority = select_handler(&priority);
    let on_client = select_handler(&client);

    let on_add = {
        let form_mode = form_mode.clone();
        Callback::from(move |_: MouseEvent| form_mode.set(Some(FormMode::Create)))
    };
    let on_edit = {
        let form_mode = form_mode.clone();
        Callback::from(move |goal: Goal| form_mode.set(Some(FormMode::Edit(goal))))
    };
    let on_delete = {
        let delete_target = delete_target.clone();
        Callback::from(move |goal: Goal| delete_target.set(Some(DeleteTarget::Goal(goal))))
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

    let client_options = clients
        .data
        .as_deref()
        .map(|clients| {
            clients
                .iter()
                .map(|c| {
                    let id = c.id.to_string();
                    html! {
                        <option value={id.clone()} selected={*client == id}>{c.full_name()}</option>
                    }
                })
                .collect::<Html>()
        })
        .unwrap_or_default();

    html! {
        <section class="page goals-page">
            <div class="page-toolbar">
                <select class="form-select" onchange={on_client}>
                    <option value="" selected={client.is_empty()}>{"All clients"}</option>
                    {client_options}
                </select>
                <select class="form-select" onchange={on_status}>
                    <option value="" selected={status.is_empty()}>{"All statuses"}</option>
                    {for GoalStatus::all().iter().map(|s| html! {
                        <option value={s.value()} selected={*status == s.value()}>{s.label()}</option>
                    })}
                </select>
                <select class="form-select" onchange={on_priority}>
                    <option value="" selected={priority.is_empty()}>{"All priorities"}</option>
                    {for GoalPriority::all().iter().map(|p| html! {
                        <option value={p.value()} selected={*priority == p.value()}>{p.label()}</option>
                    })}
                </select>
                <button type="button" class="btn btn-primary" onclick={on_add}>{"Add Goal"}</button>
            </div>

            <QueryStatus
                is_loading={goals.is_loading}
                error={goals.error_message()}
                on_retry={goals.revalidate.clone()}
            />

            {match &goals.data {
                Some(data) if !data.results.is_empty() => html! {
                    <>
                        <div class="goal-grid">
                            {for data.results.iter().map(|goal| html! {
                                <GoalCard key={goal.id} goal={goal.clone()} {today}
                                    on_edit={on_edit.clone()} on_delete={on_delete.clone()} />
                            })}
                        </div>
                        <Pager page={*page} total={data.count} page_size={config.page_size} on_change={on_page} />
                    </>
                },
                Some(_) => html! { <EmptyState message="No goals match these filters." /> },
                None => html! {},
            }}

            <GoalModal
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

    fn goal(status: GoalStatus, target_date: Option<NaiveDate>) -> Goal {
        let stamp = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
        Goal {
            id: 1,
            title: "Independent dressing".to_string(),
            description: String::new(),
            client: 3,
            client_name: None,
            category: None,
            priority: GoalPriority::Medium,
            status,
            target_date,
            primary_activities: vec![],
            related_activities: vec![],
            assigned_carers: vec![],
            progress_percentage: 40.0,
            created_at: stamp,
            updated_at: stamp,
        }
    }

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
    }

    #[test]
    fn test_due_label() {
        let today = d(10);
        assert_eq!(due_label(&goal(GoalStatus::InProgress, None), today), None);
        assert_eq!(
            due_label(&goal(GoalStatus::InProgress, Some(d(10))), today).as_deref(),
            Some("Due today")
        );
        assert_eq!(
            due_label(&goal(GoalStatus::NotStarted, Some(d(15))), today).as_deref(),
            Some("Due in 5 days")
        );
        assert_eq!(
            due_label(&goal(GoalStatus::InProgress, Some(d(7))), today).as_deref(),
            Some("3 days overdue")
        );
        assert_eq!(due_label(&goal(GoalStatus::Completed, Some(d(7))), today), None);
    }
}
