use std::future::Future;
use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::hooks::use_api::{use_api, use_query_cache};
use crate::services::api::{ApiClient, ApiError};
use crate::services::logging::Logger;
use crate::services::session::{SessionAction, SessionContext};

/// Snapshot of a cached query.
///
/// `data` keeps the last good value through refreshes and failed refreshes.
pub struct QueryState<T> {
    pub data: Option<Rc<T>>,
    /// Nothing to show yet.
    pub is_loading: bool,
    /// A request for this key is in flight.
    pub is_validating: bool,
    pub is_error: bool,
    pub error: Option<ApiError>,
    pub revalidate: Callback<()>,
}

impl<T> Clone for QueryState<T> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            is_loading: self.is_loading,
            is_validating: self.is_validating,
            is_error: self.is_error,
            error: self.error.clone(),
            revalidate: self.revalidate.clone(),
        }
    }
}

impl<T> QueryState<T> {
    /// Derive a view of the data, keeping the request flags.
    pub fn map<U>(&self, f: impl FnOnce(&T) -> U) -> QueryState<U> {
        QueryState {
            data: self.data.as_deref().map(|data| Rc::new(f(data))),
            is_loading: self.is_loading,
            is_validating: self.is_validating,
            is_error: self.is_error,
            error: self.error.clone(),
            revalidate: self.revalidate.clone(),
        }
    }

    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }
}

/// Stale-while-revalidate fetch of `key`.
///
/// Cached data is returned straight away and refreshed in the background on
/// mount, on key change and whenever the key's resource is invalidated.
#[hook]
pub fn use_query<T, F, Fut>(key: String, fetcher: F) -> QueryState<T>
where
    T: 'static,
    F: Fn(ApiClient) -> Fut + 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    let cache = use_query_cache();
    let api = use_api();
    let session = use_context::<SessionContext>();
    let rerender = use_force_update();

    let fetch: Rc<dyn Fn()> = {
        let cache = cache.clone();
        let key = key.clone();
        Rc::new(move || {
            let Some(epoch) = cache.try_begin(&key) else {
                return;
            };
            Logger::debug_with_component("query", &format!("Fetching {key}"));
            let request = fetcher(api.clone());
            let cache = cache.clone();
            let key = key.clone();
            let session = session.clone();
            spawn_local(async move {
                match request.await {
                    Ok(value) => cache.store(&key, epoch, value),
                    Err(error) => {
                        Logger::warn_with_component("query", &format!("{key}: {error}"));
                        let unauthorized = error.is_unauthorized();
                        cache.store_error(&key, epoch, error);
                        if unauthorized {
                            if let Some(session) = session {
                                session.dispatch(SessionAction::LogOut);
                            }
                        }
                    }
                }
            });
        })
    };

    {
        let cache = cache.clone();
        let fetch = fetch.clone();
        let rerender = rerender.clone();
        use_effect_with(key.clone(), move |key| {
            let key = key.clone();
            let on_change = {
                let cache = cache.clone();
                let key = key.clone();
                let fetch = fetch.clone();
                Callback::from(move |_| {
                    if cache.is_stale(&key) {
                        fetch();
                    }
                    rerender.force_update();
                })
            };
            let subscription = cache.subscribe(&key, on_change);
            fetch();
            move || cache.unsubscribe(&key, subscription)
        });
    }

    let revalidate = {
        let fetch = fetch.clone();
        Callback::from(move |_| fetch())
    };

    let data = cache.get::<T>(&key);
    let error = cache.error(&key);
    QueryState {
        is_loading: data.is_none() && error.is_none(),
        is_validating: cache.is_fetching(&key),
        is_error: error.is_some(),
        data,
        error,
        revalidate,
    }
}
