mod chat;
mod curriculum;
mod dashboard;
mod guide;
mod login;
mod resources;
mod state;
mod topic;

pub use chat::ChatPanel;
pub use curriculum::CurriculumView;
pub use dashboard::DashboardView;
pub use guide::GuideView;
pub use login::LoginView;
pub use resources::ResourcesView;
pub use state::{view_state_from_resource, ViewError, ViewState};
pub use topic::TopicView;

#[cfg(test)]
mod guide_smoke;
#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;
