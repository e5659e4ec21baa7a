//! Application context
//!
//! [`App`] owns one instance of every controller and is the only entry point
//! the platform layer talks to after start-up. Platform effects are injected
//! through [`Ports`].

use crate::animation::{AnimationManager, AnimationSurface};
use crate::clock::Clock;
use crate::command::Command;
use crate::config::UiConfig;
use crate::connectivity::{BannerSurface, ConnectivityBanner};
use crate::form_enhancer::{FieldSurface, FormEnhancer};
use crate::keyboard::{KeyPress, Shortcut};
use crate::modal::{ModalController, ModalSurface};
use crate::navigation::{NavSurface, NavigationManager};
use crate::notification::{NotificationCenter, NotificationSurface};
use crate::scheduler::Scheduler;
use crate::storage::KeyValueStore;
use crate::style::StyleHost;
use crate::task::TaskBackend;
use crate::task_manager::{TaskManager, TaskPage};
use crate::theme::{ThemeManager, ThemeSurface};
use std::rc::Rc;
use tracing::{debug, info};

/// Platform implementations the controllers run against
#[derive(Clone)]
pub struct Ports {
    pub store: Rc<dyn KeyValueStore>,
    pub scheduler: Rc<dyn Scheduler>,
    pub clock: Rc<dyn Clock>,
    pub styles: Rc<dyn StyleHost>,
    pub theme: Rc<dyn ThemeSurface>,
    pub navigation: Rc<dyn NavSurface>,
    pub modals: Rc<dyn ModalSurface>,
    pub notifications: Rc<dyn NotificationSurface>,
    pub page: Rc<dyn TaskPage>,
    pub backend: Rc<dyn TaskBackend>,
    pub fields: Rc<dyn FieldSurface>,
    pub animation: Rc<dyn AnimationSurface>,
    pub banner: Rc<dyn BannerSurface>,
}

/// All page controllers
pub struct App {
    pub theme: ThemeManager,
    pub navigation: NavigationManager,
    pub tasks: TaskManager,
    pub forms: FormEnhancer,
    pub animations: AnimationManager,
    pub connectivity: ConnectivityBanner,
}

impl App {
    pub fn new(config: &UiConfig, ports: Ports) -> Self {
        let theme = ThemeManager::new(config, Rc::clone(&ports.store), ports.theme);
        let navigation = NavigationManager::new(ports.navigation, ports.styles.as_ref());

        let notifications = NotificationCenter::new(
            config,
            ports.notifications,
            Rc::clone(&ports.scheduler),
        );
        let tasks = TaskManager::new(
            config,
            ModalController::new(ports.modals),
            notifications,
            ports.backend,
            ports.page,
            Rc::clone(&ports.clock),
            Rc::clone(&ports.scheduler),
        );

        let forms = FormEnhancer::new(
            config,
            ports.fields,
            Rc::clone(&ports.scheduler),
            Rc::clone(&ports.clock),
        );
        let animations = AnimationManager::new(
            config,
            ports.animation,
            Rc::clone(&ports.scheduler),
            ports.styles.as_ref(),
        );
        let connectivity = ConnectivityBanner::new(config, ports.banner, ports.scheduler);

        info!(theme = %theme.theme(), "Controllers ready");

        Self {
            theme,
            navigation,
            tasks,
            forms,
            animations,
            connectivity,
        }
    }

    /// Run a command issued from page markup
    pub fn dispatch(&self, command: Command) {
        debug!(%command, "Dispatching command");
        match command {
            Command::ViewTask(id) => self.tasks.view_task(id),
            Command::EditTask(id) => self.tasks.edit_task(id),
            Command::ConfirmDelete(id) => self.tasks.confirm_delete(id),
            Command::CloseDeleteModal => self.tasks.close_delete_modal(),
            Command::DeleteTask => self.tasks.delete_task(),
            Command::MarkAsProgress(id) => self.tasks.mark_as_progress(id),
            Command::MarkAsCompleted(id) => self.tasks.mark_as_completed(id),
            Command::CloseStatusModal => self.tasks.close_status_modal(),
            Command::UpdateStatus => self.tasks.update_status(),
            Command::SignInWithGoogle => self.tasks.sign_in_with_google(),
            Command::ToggleTheme => {
                self.theme.toggle_theme();
            }
        }
    }

    /// Handle a global key press.
    ///
    /// `Escape` is handled here. The recognised shortcut is returned so the
    /// platform layer can carry out the parts that need the real document
    /// (focusing the search input, suppressing the default action).
    pub fn handle_key(&self, press: &KeyPress) -> Option<Shortcut> {
        let shortcut = Shortcut::from_key(press)?;
        if shortcut == Shortcut::CloseModal {
            if let Some(id) = self.tasks.open_modal() {
                self.tasks.close_modal(&id);
            }
        }
        Some(shortcut)
    }
}
