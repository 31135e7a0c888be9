use shared::FieldErrors;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::forms::{error_for, TextField};
use crate::hooks::use_api::use_api;
use crate::services::logging::Logger;
use crate::services::session::{Session, SessionAction, SessionContext};

fn validate_login(email: &str, password: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if errors.require("email", email, "Email") {
        errors.check_email("email", email);
    }
    errors.require("password", password, "Password");
    errors
}

#[function_component(LoginPage)]
pub fn login_page() -> Html {
    let api = use_api();
    let session = use_context::<SessionContext>();
    let email = use_state(String::new);
    let password = use_state(String::new);
    let errors = use_state(FieldErrors::new);
    let failure = use_state(|| None::<String>);
    let submitting = use_state(|| false);

    let on_field = {
        let email = email.clone();
        let password = password.clone();
        let errors = errors.clone();
        Callback::from(move |(field, value): (&'static str, String)| {
            match field {
                "email" => email.set(value),
                "password" => password.set(value),
                _ => return,
            }
            let mut next = (*errors).clone();
            next.clear_field(field);
            errors.set(next);
        })
    };

    let on_submit = {
        let email = email.clone();
        let password = password.clone();
        let errors = errors.clone();
        let failure = failure.clone();
        let submitting = submitting.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *submitting {
                return;
            }
            let found = validate_login(&email, &password);
            if !found.is_empty() {
                errors.set(found);
                return;
            }
            errors.set(FieldErrors::new());
            failure.set(None);
            submitting.set(true);

            let api = api.clone();
            let session = session.clone();
            let email = (*email).clone();
            let password = (*password).clone();
            let failure = failure.clone();
            let submitting = submitting.clone();
            spawn_local(async move {
                match api.login(&email, &password).await {
                    Ok(token) => {
                        if let Some(session) = session {
                            session.dispatch(SessionAction::LogIn(Session {
                                access_token: token.access,
                                user: token.user,
                            }));
                        }
                    }
                    Err(error) => {
                        Logger::warn_with_component("login", &format!("Sign-in failed: {error}"));
                        // A 401 here means bad credentials, not an expired session.
                        let message = if error.is_unauthorized() {
                            "Incorrect email or password".to_string()
                        } else {
                            error.to_string()
                        };
                        failure.set(Some(message));
                    }
                }
                submitting.set(false);
            });
        })
    };

    html! {
        <div class="login-screen">
            <form class="login-card" onsubmit={on_submit} novalidate={true}>
                <h1 class="login-title">{"Tavonga CareConnect"}</h1>
                <p class="login-subtitle">{"Sign in to the admin dashboard"}</p>
                {match &*failure {
                    Some(message) => html! { <div class="form-alert form-alert-error" role="alert">{message.clone()}</div> },
                    None => html! {},
                }}
                <TextField
                    name="email"
                    label="Email"
                    input_type="email"
                    value={(*email).clone()}
                    on_change={on_field.clone()}
                    error={error_for(&errors, "email")}
                    required={true}
                    disabled={*submitting}
                />
                <TextField
                    name="password"
                    label="Password"
                    input_type="password"
                    value={(*password).clone()}
                    on_change={on_field}
                    error={error_for(&errors, "password")}
                    required={true}
                    disabled={*submitting}
                />
                <button type="submit" class="btn btn-primary btn-block" disabled={*submitting}>
                    {if *submitting { "Signing in..." } else { "Sign in" }}
                </button>
            </form>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_validation() {
        let errors = validate_login("", "");
        assert!(errors.contains("email"));
        assert!(errors.contains("password"));

        let errors = validate_login("not-an-email", "secret");
        assert!(errors.contains("email"));
        assert!(!errors.contains("password"));

        assert!(validate_login("admin@tavonga.org", "secret").is_empty());
    }
}
