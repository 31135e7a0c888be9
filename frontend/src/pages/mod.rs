pub mod activities;
pub mod behaviors;
pub mod carers;
pub mod clients;
pub mod dashboard;
pub mod goals;
pub mod login;
pub mod reports;
pub mod schedules;
pub mod shifts;

pub use activities::ActivitiesPage;
pub use behaviors::BehaviorsPage;
pub use carers::CarersPage;
pub use clients::ClientsPage;
pub use dashboard::DashboardPage;
pub use goals::GoalsPage;
pub use login::LoginPage;
pub use reports::ReportsPage;
pub use schedules::SchedulesPage;
pub use shifts::ShiftsPage;
