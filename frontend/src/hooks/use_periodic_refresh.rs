use gloo::timers::callback::Interval;
use yew::prelude::*;

use crate::services::logging::Logger;

/// Emit `refresh` every `interval_ms` while mounted and not paused.
///
/// The timer is rebuilt when the interval or pause flag changes, and dropped on unmount.
#[hook]
pub fn use_periodic_refresh(interval_ms: u32, refresh: Callback<()>, paused: bool) {
    // Keep the latest callback without restarting the timer on every render.
    let latest = use_mut_ref(|| refresh.clone());
    *latest.borrow_mut() = refresh;

    use_effect_with((interval_ms, paused), move |(interval_ms, paused)| {
        let interval = if *paused || *interval_ms == 0 {
            Logger::debug_with_component("periodic-refresh", "Paused");
            None
        } else {
            let latest = latest.clone();
            Some(Interval::new(*interval_ms, move || {
                Logger::debug_with_component("periodic-refresh", "Refreshing");
                latest.borrow().emit(());
            }))
        };
        move || drop(interval)
    });
}
