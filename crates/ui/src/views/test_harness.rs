use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use async_trait::async_trait;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use prep_core::Catalog;
use prep_core::model::{ExperienceLevel, TopicId, UserSettings, UserSettingsDraft};
use prep_core::time::fixed_clock;
use services::chat::ChatClient;
use services::{
    ApiConfig, ApiError, AuthApi, AuthResponse, Clock, ProgressService, RegisterRequest,
    RemoteSync, UserService,
};
use storage::repository::Storage;

use crate::context::{AppContext, UiApp, build_app_context};
use crate::shell::ShellState;
use crate::views::guide::{GuidePager, use_guide_pager};
use crate::views::topic::{GuideProgress, use_guide_progress};
use crate::views::{CurriculumView, DashboardView, LoginView, ResourcesView, TopicView};

/// Remote that is never reachable.
struct Offline;

#[async_trait]
impl RemoteSync for Offline {
    async fn sync_progress(
        &self,
        _token: Option<&str>,
        _topic: &TopicId,
        _completed: bool,
    ) -> Result<(), ApiError> {
        Err(ApiError::Rejected("offline".into()))
    }

    async fn sync_bookmark(
        &self,
        _token: Option<&str>,
        _topic: &TopicId,
        _page_index: u32,
    ) -> Result<(), ApiError> {
        Err(ApiError::Rejected("offline".into()))
    }
}

#[async_trait]
impl AuthApi for Offline {
    async fn login(&self, _email: &str, _password: &str) -> Result<AuthResponse, ApiError> {
        Err(ApiError::Rejected("offline".into()))
    }

    async fn register(&self, _request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        Err(ApiError::Rejected("offline".into()))
    }
}

#[derive(Clone)]
struct TestApp {
    catalog: Arc<Catalog>,
    progress: Arc<ProgressService>,
    users: Arc<UserService>,
}

impl UiApp for TestApp {
    fn clock(&self) -> Clock {
        fixed_clock()
    }

    fn catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    fn users(&self) -> Arc<UserService> {
        Arc::clone(&self.users)
    }

    fn chat(&self) -> ChatClient {
        ChatClient::new(ApiConfig::default())
    }
}

#[derive(Clone, PartialEq, Eq)]
pub enum ViewKind {
    Dashboard,
    Curriculum,
    Topic(String),
    Resources,
    Login,
    /// Bare guide pager for a topic, with its handles exposed to the test.
    GuidePager(String),
}

/// Slot the guide pager registers itself in on first render.
#[derive(Clone, Default)]
pub struct GuideHandles(Rc<RefCell<Option<GuidePager>>>);

impl GuideHandles {
    pub fn pager(&self) -> GuidePager {
        (*self.0.borrow()).expect("guide pager registered")
    }
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    user: Option<UserSettings>,
    guide: GuideHandles,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    let ctx = use_context_provider(|| build_app_context(&app));
    use_context_provider(|| ShellState::new(&ctx, props.user.clone()));
    use_context_provider(|| props.view.clone());
    use_context_provider(|| props.guide.clone());
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Dashboard => rsx! { DashboardView {} },
        ViewKind::Curriculum => rsx! { CurriculumView {} },
        ViewKind::Topic(id) => rsx! { TopicView { id } },
        ViewKind::Resources => rsx! { ResourcesView {} },
        ViewKind::Login => rsx! { LoginView {} },
        ViewKind::GuidePager(id) => rsx! { GuideIntentHarness { id } },
    }
}

#[component]
fn GuideIntentHarness(id: String) -> Element {
    let ctx = use_context::<AppContext>();
    let handles = use_context::<GuideHandles>();
    let topic = TopicId::new(id).expect("topic id");
    let guide = ctx
        .catalog()
        .guide_for(&topic)
        .cloned()
        .expect("guide for topic");

    let GuideProgress {
        on_page_change,
        on_complete,
    } = use_guide_progress(topic);
    let pager = use_guide_pager(&guide, on_page_change, on_complete);
    let mut registered = use_signal(|| false);
    if !registered() {
        registered.set(true);
        *handles.0.borrow_mut() = Some(pager);
    }

    let label = pager
        .controller
        .read()
        .as_ref()
        .map(|controller| controller.page_label())
        .unwrap_or_default();
    let step = {
        let steps = pager.steps.read();
        format!("{}/{}", steps.index() + 1, steps.len())
    };
    rsx! {
        p { id: "pager-label", "{label}" }
        p { id: "pager-step", "{step}" }
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }

    pub fn drive(&mut self) {
        drive_dom(&mut self.dom);
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// Operative profile used by views that need a signed-in user.
pub fn test_user() -> UserSettings {
    UserSettingsDraft {
        name: "Ada".into(),
        target_date: "2023-12-14".into(),
        experience_level: ExperienceLevel::NewGrad,
    }
    .validate()
    .expect("valid profile")
}

/// Services over in-memory storage; seed them before building the harness.
pub struct Fixture {
    pub progress: Arc<ProgressService>,
    pub guide: GuideHandles,
    app: Arc<TestApp>,
}

impl Fixture {
    pub fn new() -> Self {
        let storage = Storage::in_memory();
        let offline = Arc::new(Offline);
        let progress = Arc::new(ProgressService::new(
            Arc::clone(&storage.state),
            offline.clone(),
        ));
        let users = Arc::new(UserService::new(
            Arc::clone(&storage.state),
            offline,
            Arc::clone(&progress),
        )
        .with_clock(fixed_clock()));
        let catalog = Arc::new(Catalog::embedded().expect("embedded catalog"));
        let app = Arc::new(TestApp {
            catalog,
            progress: Arc::clone(&progress),
            users,
        });
        Self {
            progress,
            guide: GuideHandles::default(),
            app,
        }
    }

    pub fn harness(&self, view: ViewKind, user: Option<UserSettings>) -> ViewHarness {
        let dom = VirtualDom::new_with_props(
            ViewRouterHarness,
            ViewHarnessProps {
                app: Arc::clone(&self.app),
                view,
                user,
                guide: self.guide.clone(),
            },
        );
        ViewHarness { dom }
    }
}

pub fn setup_view_harness(view: ViewKind) -> ViewHarness {
    Fixture::new().harness(view, Some(test_user()))
}
