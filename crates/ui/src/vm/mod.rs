mod chat_vm;
mod curriculum_vm;
mod dashboard_vm;
mod login_vm;
mod markdown_vm;
mod visual_vm;

pub use chat_vm::{ChatBlock, TextSpan, split_chat_content};
pub use curriculum_vm::{PhaseColumnVm, TopicCardVm, map_curriculum};
pub use dashboard_vm::{DashboardVm, PhaseBarVm, map_dashboard};
pub use login_vm::{LoginForm, LoginMode, auth_error_message, experience_option_label};
pub use markdown_vm::markdown_to_html;
pub use visual_vm::{TopicVisualVm, VisualFrame};
