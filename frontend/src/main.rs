mod components;
mod config;
mod hooks;
mod navigation;
mod pages;
mod services;

use shared::Choice;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::layout::{Header, Sidebar};
use crate::components::toast::{ToastContext, ToastList, ToastState};
use crate::config::AppConfig;
use crate::hooks::use_api::{use_api, use_query_cache};
use crate::navigation::Page;
use crate::pages::{
    ActivitiesPage, BehaviorsPage, CarersPage, ClientsPage, DashboardPage, GoalsPage, LoginPage,
    ReportsPage, SchedulesPage, ShiftsPage,
};
use crate::services::cache::QueryCache;
use crate::services::logging::Logger;
use crate::services::session::{SessionAction, SessionContext, SessionState};

/// Signed-in chrome: sidebar, header and the active page.
#[function_component(AdminShell)]
fn admin_shell() -> Html {
    let api = use_api();
    let session = use_context::<SessionContext>();
    let page = use_state(Page::default);

    let needs_profile = session
        .as_ref()
        .is_some_and(|s| s.is_authenticated() && s.user().is_none());
    {
        let session = session.clone();
        use_effect_with(needs_profile, move |needs_profile| {
            if let (true, Some(session)) = (*needs_profile, session) {
                spawn_local(async move {
                    match api.current_user().await {
                        Ok(user) => session.dispatch(SessionAction::SetUser(user)),
                        Err(error) if error.is_unauthorized() => session.dispatch(SessionAction::LogOut),
                        Err(error) => Logger::warn_with_component(
                            "app",
                            &format!("Could not load the signed-in user: {error}"),
                        ),
                    }
                });
            }
        });
    }

    let on_navigate = {
        let page = page.clone();
        Callback::from(move |next: Page| {
            Logger::debug_with_component("app", &format!("Navigating to {}", next.label()));
            page.set(next);
        })
    };
    let on_logout = {
        let session = session.clone();
        Callback::from(move |_| {
            if let Some(session) = &session {
                session.dispatch(SessionAction::LogOut);
            }
        })
    };

    let (user_name, user_role) = match session.as_ref().and_then(|s| s.session.clone()) {
        Some(current) => (
            current.display_name(),
            current.user.as_ref().map(|user| AttrValue::from(user.role.label())),
        ),
        None => (String::new(), None),
    };

    let content = match *page {
        Page::Dashboard => html! { <DashboardPage on_navigate={on_navigate.clone()} /> },
        Page::Clients => html! { <ClientsPage /> },
        Page::Carers => html! { <CarersPage /> },
        Page::Shifts => html! { <ShiftsPage /> },
        Page::Schedules => html! { <SchedulesPage /> },
        Page::Activities => html! { <ActivitiesPage /> },
        Page::Goals => html! { <GoalsPage /> },
        Page::Behaviors => html! { <BehaviorsPage /> },
        Page::Reports => html! { <ReportsPage /> },
    };

    html! {
        <div class="app-shell">
            <Sidebar current={*page} on_navigate={on_navigate} />
            <div class="app-main">
                <Header page={*page} user_name={user_name} user_role={user_role} on_logout={on_logout} />
                <main class="app-content">{content}</main>
            </div>
        </div>
    }
}

/// Login screen or the admin shell, depending on the session.
#[function_component(Gate)]
fn gate() -> Html {
    let session = use_context::<SessionContext>();
    let cache = use_query_cache();
    let authenticated = session.as_ref().is_some_and(|s| s.is_authenticated());

    // Cached data belongs to the previous account once the session ends.
    use_effect_with(authenticated, move |authenticated| {
        if !*authenticated {
            cache.clear();
        }
    });

    if authenticated {
        html! { <AdminShell /> }
    } else {
        html! { <LoginPage /> }
    }
}

#[function_component(App)]
fn app() -> Html {
    let config = use_memo((), |_| AppConfig::from_env());
    let session = use_reducer(SessionState::restore);
    let cache = use_memo((), |_| QueryCache::new());
    let toasts = use_reducer(ToastState::default);

    html! {
        <ContextProvider<AppConfig> context={(*config).clone()}>
            <ContextProvider<SessionContext> context={session}>
                <ContextProvider<QueryCache> context={(*cache).clone()}>
                    <ContextProvider<ToastContext> context={toasts.clone()}>
                        <Gate />
                        <ToastList context={toasts} duration_ms={config.toast_duration_ms} />
                    </ContextProvider<ToastContext>>
                </ContextProvider<QueryCache>>
            </ContextProvider<SessionContext>>
        </ContextProvider<AppConfig>>
    }
}

fn main() {
    console_error_panic_hook::set_once();
    let config = AppConfig::from_env();
    Logger::init(config.log_level);
    Logger::info_with_component("app", &format!("Starting CareConnect admin against {}", config.api_url));
    yew::Renderer::<App>::new().render();
}
