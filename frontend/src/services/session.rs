use std::rc::Rc;

use gloo::storage::{LocalStorage, Storage};
use serde::{Deserialize, Serialize};
use shared::User;
use yew::prelude::*;

use crate::services::logging::Logger;

const SESSION_KEY: &str = "careconnect.session";

/// Signed-in state persisted in local storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub user: Option<User>,
}

impl Session {
    pub fn display_name(&self) -> String {
        self.user
            .as_ref()
            .map(User::full_name)
            .unwrap_or_else(|| "Administrator".to_string())
    }
}

pub fn load() -> Option<Session> {
    LocalStorage::get::<Session>(SESSION_KEY).ok()
}

fn persist(session: Option<&Session>) {
    match session {
        Some(session) => {
            if let Err(e) = LocalStorage::set(SESSION_KEY, session) {
                Logger::error_with_component("session", &format!("Failed to store session: {e}"));
            }
        }
        None => LocalStorage::delete(SESSION_KEY),
    }
}

pub enum SessionAction {
    LogIn(Session),
    SetUser(User),
    LogOut,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionState {
    pub session: Option<Session>,
}

impl SessionState {
    pub fn restore() -> Self {
        Self { session: load() }
    }

    pub fn token(&self) -> Option<String> {
        self.session.as_ref().map(|s| s.access_token.clone())
    }

    pub fn user(&self) -> Option<&User> {
        self.session.as_ref().and_then(|s| s.user.as_ref())
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }
}

impl Reducible for SessionState {
    type Action = SessionAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let session = match action {
            SessionAction::LogIn(session) => {
                Logger::info_with_component("session", "Signed in");
                Some(session)
            }
            SessionAction::SetUser(user) => match &self.session {
                Some(current) => Some(Session {
                    access_token: current.access_token.clone(),
                    user: Some(user),
                }),
                None => return self,
            },
            SessionAction::LogOut => {
                if self.session.is_none() {
                    return self;
                }
                Logger::info_with_component("session", "Signed out");
                None
            }
        };
        persist(session.as_ref());
        Rc::new(SessionState { session })
    }
}

pub type SessionContext = UseReducerHandle<SessionState>;
