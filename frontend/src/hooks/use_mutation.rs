use std::future::Future;

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::toast::{use_toast, Toaster};
use crate::hooks::use_api::{use_api, use_query_cache};
use crate::services::api::{ApiClient, ApiError};
use crate::services::cache::QueryCache;
use crate::services::logging::Logger;
use crate::services::session::{SessionAction, SessionContext};

/// Runs one-off writes from list rows and refreshes the affected resource.
#[derive(Clone, PartialEq)]
pub struct Mutator {
    api: ApiClient,
    cache: QueryCache,
    toaster: Toaster,
    session: Option<SessionContext>,
}

impl Mutator {
    pub fn run<T, F, Fut>(&self, resource: &'static str, success: impl Into<String>, request: F)
    where
        T: 'static,
        F: FnOnce(ApiClient) -> Fut,
        Fut: Future<Output = Result<T, ApiError>> + 'static,
    {
        let request = request(self.api.clone());
        let success = success.into();
        let cache = self.cache.clone();
        let toaster = self.toaster.clone();
        let session = self.session.clone();
        spawn_local(async move {
            match request.await {
                Ok(_) => {
                    cache.invalidate(resource);
                    toaster.success(success);
                }
                Err(error) => {
                    Logger::error_with_component("mutation", &format!("{resource}: {error}"));
                    toaster.error(error.to_string());
                    if error.is_unauthorized() {
                        if let Some(session) = session {
                            session.dispatch(SessionAction::LogOut);
                        }
                    }
                }
            }
        });
    }
}

#[hook]
pub fn use_mutation() -> Mutator {
    Mutator {
        api: use_api(),
        cache: use_query_cache(),
        toaster: use_toast(),
        session: use_context::<SessionContext>(),
    }
}
