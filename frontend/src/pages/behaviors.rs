use shared::{
    Behavior, BehaviorPayload, Choice, DateRange, Id, ListFilters, MediaAttachment, Severity,
};
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::components::pager::Pager;
use crate::components::query_status::{EmptyState, QueryStatus};
use crate::components::status_badge::StatusBadge;
use crate::hooks::use_api::use_config;
use crate::hooks::use_mutation::use_mutation;
use crate::hooks::use_resources::{use_behaviors, use_record};
use crate::services::date_utils::{format_date, format_time, format_timestamp, iso_date, today};

/// Link target for an attachment; relative paths are served from the API host.
fn media_url(api_url: &str, file: &str) -> String {
    if file.starts_with("http://") || file.starts_with("https://") || file.starts_with('/') {
        return file.to_string();
    }
    format!("{}/{}", api_url.trim_end_matches('/'), file)
}

fn yes_no(value: Option<bool>) -> &'static str {
    match value {
        Some(true) => "Yes",
        Some(false) => "No",
        None => "Not recorded",
    }
}

/// Flags raised on an incident, in display order.
fn incident_flags(behavior: &Behavior) -> Vec<&'static str> {
    [
        (behavior.harm_to_self, "Harm to self"),
        (behavior.harm_to_others, "Harm to others"),
        (behavior.property_damage, "Property damage"),
        (behavior.follow_up_required, "Follow-up required"),
    ]
    .into_iter()
    .filter_map(|(set, label)| set.then_some(label))
    .collect()
}

fn detail_row(label: &'static str, value: impl ToString) -> Html {
    html! {
        <div class="detail-row">
            <dt>{label}</dt>
            <dd>{value.to_string()}</dd>
        </div>
    }
}

fn optional_text(value: &Option<String>) -> String {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or("-")
        .to_string()
}

#[derive(Properties, PartialEq)]
struct FollowUpEditorProps {
    behavior: Behavior,
}

/// Follow-up flag and notes, saved as a partial update.
#[function_component(FollowUpEditor)]
fn follow_up_editor(props: &FollowUpEditorProps) -> Html {
    let mutator = use_mutation();
    let required = use_state(|| props.behavior.follow_up_required);
    let notes = use_state(|| props.behavior.follow_up_notes.clone().unwrap_or_default());

    let on_required = {
        let required = required.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            required.set(input.checked());
        })
    };
    let on_notes = {
        let notes = notes.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            notes.set(input.value());
        })
    };
    let on_save = {
        let id = props.behavior.id;
        let required = required.clone();
        let notes = notes.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let payload = BehaviorPayload {
                follow_up_required: Some(*required),
                follow_up_notes: Some(notes.trim().to_string()),
            };
            mutator.run("behaviors", "Follow-up updated", move |api| async move {
                api.update::<Behavior>(id, &payload).await
            });
        })
    };

    html! {
        <form class="follow-up-editor" onsubmit={on_save}>
            <label class="checkbox-label">
                <input type="checkbox" checked={*required} onchange={on_required} />
                {" Follow-up required"}
            </label>
            <textarea class="form-textarea" rows="3" placeholder="Follow-up notes"
                value={(*notes).clone()} oninput={on_notes} />
            <button type="submit" class="btn btn-small btn-primary">{"Save follow-up"}</button>
        </form>
    }
}

#[derive(Properties, PartialEq)]
struct BehaviorDetailProps {
    behavior: Behavior,
    on_close: Callback<()>,
}

#[function_component(BehaviorDetail)]
fn behavior_detail(props: &BehaviorDetailProps) -> Html {
    let config = use_config();
    let fresh = use_record::<Behavior>(props.behavior.id);
    let b = fresh.data.as_deref().unwrap_or(&props.behavior);
    let flags = incident_flags(b);
    let on_close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    html! {
        <aside class="detail-panel">
            <header class="detail-panel-header">
                <h3>{b.behavior_type.clone()}</h3>
                <StatusBadge value={b.severity.value()} label={b.severity.label()} />
                <button type="button" class="modal-close" aria-label="Close" onclick={on_close}>{"×"}</button>
            </header>
            <dl class="detail-list">
                {detail_row("Client", b.client_name.clone().unwrap_or_else(|| format!("Client #{}", b.client)))}
                {detail_row("Reported by", b.user_name.clone().unwrap_or_else(|| format!("User #{}", b.user)))}
                {detail_row("When", format!("{} at {}", format_date(b.date), format_time(b.time)))}
                {detail_row("Location", optional_text(&b.location))}
                {detail_row("Description", b.description.clone())}
                {detail_row("Triggers", optional_text(&b.triggers_identified))}
                {detail_row("Intervention", optional_text(&b.intervention_used))}
                {detail_row("Intervention effective", yes_no(b.intervention_effective))}
                {detail_row("Duration", b.duration_minutes.map(|m| format!("{m} min")).unwrap_or_else(|| "-".to_string()))}
                {detail_row("Logged", format_timestamp(&b.created_at))}
            </dl>
            <div class="flag-list">
                {if flags.is_empty() {
                    html! { <span class="cell-hint">{"No flags raised"}</span> }
                } else {
                    flags.iter().map(|flag| html! { <span class="flag">{*flag}</span> }).collect::<Html>()
                }}
            </div>
            {if b.media.is_empty() {
                html! {}
            } else {
                html! {
                    <ul class="media-list">
                        {for b.media.iter().map(|m: &MediaAttachment| html! {
                            <li key={m.id}>
                                <a href={media_url(&config.api_url, &m.file)} target="_blank" rel="noopener noreferrer">
                                    {m.caption.clone()
                                        .or_else(|| m.media_type.clone())
                                        .unwrap_or_else(|| format!("Attachment #{}", m.id))}
                                </a>
                            </li>
                        })}
                    </ul>
                }
            }}
            <FollowUpEditor key={b.id} behavior={b.clone()} />
        </aside>
    }
}

/// Incident log with severity and date-range filters.
#[function_component(BehaviorsPage)]
pub fn behaviors_page() -> Html {
    let config = use_config();
    let today = today();
    let severity = use_state(String::new);
    let range = use_state(|| DateRange::Last30Days);
    let page = use_state(|| 1_u32);
    let selected = use_state(|| None::<Id>);

    let filters = ListFilters::new()
        .with("severity", &*severity)
        .with("start_date", iso_date(range.start(today)))
        .with("end_date", iso_date(today))
        .with("page", *page);
    let behaviors = use_behaviors(filters);

    let on_severity = {
        let severity = severity.clone();
        let page = page.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            severity.set(select.value());
            page.set(1);
        })
    };
    let on_range = {
        let range = range.clone();
        let page = page.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Some(next) = DateRange::from_value(&select.value()) {
                range.set(next);
                page.set(1);
            }
        })
    };
    let on_page = {
        let page = page.clone();
        Callback::from(move |next: u32| page.set(next))
    };
    let on_close_detail = {
        let selected = selected.clone();
        Callback::from(move |_| selected.set(None))
    };

    let detail = selected.and_then(|id| {
        behaviors
            .data
            .as_ref()
            .and_then(|data| data.results.iter().find(|b| b.id == id).cloned())
    });

    html! {
        <section class="page behaviors-page">
            <div class="page-toolbar">
                <select class="form-select" onchange={on_severity}>
                    <option value="" selected={severity.is_empty()}>{"All severities"}</option>
                    {for Severity::all().iter().map(|s| html! {
                        <option value={s.value()} selected={*severity == s.value()}>{s.label()}</option>
                    })}
                </select>
                <select class="form-select" onchange={on_range}>
                    {for DateRange::ALL.iter().map(|r| html! {
                        <option value={r.value()} selected={*range == *r}>{r.label()}</option>
                    })}
                </select>
            </div>

            <QueryStatus
                is_loading={behaviors.is_loading}
                error={behaviors.error_message()}
                on_retry={behaviors.revalidate.clone()}
            />

            <div class={classes!("split-view", detail.is_some().then_some("split-view-open"))}>
                {match &behaviors.data {
                    Some(data) if !data.results.is_empty() => html! {
                        <div class="split-view-main">
                            <table class="data-table">
                                <thead>
                                    <tr>
                                        <th>{"Date"}</th>
                                        <th>{"Client"}</th>
                                        <th>{"Type"}</th>
                                        <th>{"Severity"}</th>
                                        <th>{"Flags"}</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    {for data.results.iter().map(|b| {
                                        let onclick = {
                                            let selected = selected.clone();
                                            let id = b.id;
                                            Callback::from(move |_: MouseEvent| selected.set(Some(id)))
                                        };
                                        html! {
                                            <tr key={b.id} class={classes!("row-clickable", (*selected == Some(b.id)).then_some("row-selected"))} {onclick}>
                                                <td>{format!("{} {}", format_date(b.date), format_time(b.time))}</td>
                                                <td>{b.client_name.clone().unwrap_or_else(|| format!("Client #{}", b.client))}</td>
                                                <td>{b.behavior_type.clone()}</td>
                                                <td><StatusBadge value={b.severity.value()} label={b.severity.label()} /></td>
                                                <td>{incident_flags(b).len()}</td>
                                            </tr>
                                        }
                                    })}
                                </tbody>
                            </table>
                            <Pager page={*page} total={data.count} page_size={config.page_size} on_change={on_page} />
                        </div>
                    },
                    Some(_) => html! { <EmptyState message="No incidents recorded in this period." /> },
                    None => html! {},
                }}
                {match detail {
                    Some(behavior) => html! { <BehaviorDetail {behavior} on_close={on_close_detail} /> },
                    None => html! {},
                }}
            </div>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};

    fn behavior() -> Behavior {
        let stamp = Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap();
        Behavior {
            id: 8,
            client: 2,
            client_name: None,
            user: 5,
            user_name: None,
            date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            time: NaiveTime::from_hms_opt(14, 30, 0).unwrap(),
            location: None,
            behavior_type: "Verbal aggression".to_string(),
            severity: Severity::High,
            description: "Shouting at staff".to_string(),
            triggers_identified: None,
            intervention_used: None,
            intervention_effective: None,
            duration_minutes: Some(10),
            harm_to_self: false,
            harm_to_others: true,
            property_damage: false,
            follow_up_required: true,
            follow_up_notes: None,
            media: vec![],
            created_at: stamp,
            updated_at: stamp,
        }
    }

    #[test]
    fn test_incident_flags() {
        assert_eq!(
            incident_flags(&behavior()),
            vec!["Harm to others", "Follow-up required"]
        );
    }

    #[test]
    fn test_media_url() {
        assert_eq!(
            media_url("/api/v1", "media/behaviors/photo.jpg"),
            "/api/v1/media/behaviors/photo.jpg"
        );
        assert_eq!(media_url("/api/v1/", "/media/a.png"), "/media/a.png");
        assert_eq!(
            media_url("/api/v1", "https://cdn.example.org/a.png"),
            "https://cdn.example.org/a.png"
        );
    }

    #[test]
    fn test_optional_text() {
        assert_eq!(optional_text(&None), "-");
        assert_eq!(optional_text(&Some("  ".to_string())), "-");
        assert_eq!(optional_text(&Some("Garden".to_string())), "Garden");
        assert_eq!(yes_no(Some(true)), "Yes");
    }
}
