//! One hook per REST collection, all backed by [`use_query`].

use chrono::NaiveDate;
use shared::{
    overdue_schedules, schedules_on, shifts_on, Activity, Behavior, Client, Goal, Id, ListFilters,
    Paginated, Schedule, Shift, User,
};
use yew::prelude::*;

use crate::hooks::use_api::use_config;
use crate::hooks::use_query::{use_query, QueryState};
use crate::services::api::{ApiClient, Resource};
use crate::services::cache::cache_key;
use crate::services::date_utils::iso_date;

/// Page of `R` matching `filters`.
#[hook]
pub fn use_list<R>(filters: ListFilters) -> QueryState<Paginated<R>>
where
    R: Resource,
{
    let page_size = use_config().page_size;
    let filters = if filters.params().iter().any(|(key, _)| key == "page_size") {
        filters
    } else {
        filters.with("page_size", page_size)
    };
    let key = cache_key(R::PATH, &filters.canonical());
    use_query(key, move |api: ApiClient| {
        let filters = filters.clone();
        async move { api.list::<R>(&filters).await }
    })
}

/// One record of `R`, cached under `resource/id` so collection invalidation refreshes it.
#[hook]
pub fn use_record<R>(id: Id) -> QueryState<R>
where
    R: Resource,
{
    let key = format!("{}/{id}", R::PATH);
    use_query(key, move |api: ApiClient| async move { api.get::<R>(id).await })
}

/// Page size used when a view needs the whole collection.
const ALL_RECORDS: u32 = 1_000;

#[hook]
pub fn use_clients(filters: ListFilters) -> QueryState<Paginated<Client>> {
    use_list::<Client>(filters)
}

#[hook]
pub fn use_users(filters: ListFilters) -> QueryState<Paginated<User>> {
    use_list::<User>(filters)
}

/// Users who can be rostered onto shifts and activities.
#[hook]
pub fn use_carers() -> QueryState<Vec<User>> {
    let users = use_all::<User>();
    users.map(|users| {
        users
            .iter()
            .filter(|user| user.is_carer() && user.is_active)
            .cloned()
            .collect()
    })
}

#[hook]
pub fn use_behaviors(filters: ListFilters) -> QueryState<Paginated<Behavior>> {
    use_list::<Behavior>(filters)
}

#[hook]
pub fn use_activities(filters: ListFilters) -> QueryState<Paginated<Activity>> {
    use_list::<Activity>(filters)
}

#[hook]
pub fn use_goals(filters: ListFilters) -> QueryState<Paginated<Goal>> {
    use_list::<Goal>(filters)
}

#[hook]
pub fn use_schedules(filters: ListFilters) -> QueryState<Paginated<Schedule>> {
    use_list::<Schedule>(filters)
}

#[hook]
pub fn use_todays_schedules(today: NaiveDate) -> QueryState<Vec<Schedule>> {
    let schedules = use_schedules(ListFilters::new().with("date", iso_date(today)));
    schedules.map(|page| schedules_on(&page.results, today))
}

/// Open schedules dated before today, from the same collection the dashboard counts.
#[hook]
pub fn use_overdue_schedules(today: NaiveDate) -> QueryState<Vec<Schedule>> {
    use_all::<Schedule>().map(|schedules| overdue_schedules(schedules, today))
}

#[hook]
pub fn use_shifts(filters: ListFilters) -> QueryState<Paginated<Shift>> {
    use_list::<Shift>(filters)
}

#[hook]
pub fn use_todays_shifts(today: NaiveDate) -> QueryState<Vec<Shift>> {
    let shifts = use_shifts(ListFilters::new().with("date", iso_date(today)));
    shifts.map(|page| shifts_on(&page.results, today))
}

/// Every record of `R`, for selects and client-side aggregation.
#[hook]
pub fn use_all<R>() -> QueryState<Vec<R>>
where
    R: Resource + Clone,
{
    use_list::<R>(ListFilters::new().with("page_size", ALL_RECORDS)).map(|page| page.results.clone())
}
