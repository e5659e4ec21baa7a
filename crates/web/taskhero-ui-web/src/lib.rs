//! Browser bindings for the TaskHero page controllers
//!
//! The module start function installs the panic hook and console logging,
//! reads the page configuration, builds an [`App`](taskhero_ui_core::App)
//! against the live document and attaches every event listener.
//!
//! Configuration is read from an optional JSON block in the page:
//!
//! ```html
//! <script type="application/json" id="taskhero-config">
//!   { "log_level": "debug", "notification_lifetime": 8000 }
//! </script>
//! ```

#[cfg(target_arch = "wasm32")]
pub mod bindings;
#[cfg(target_arch = "wasm32")]
pub mod dom;
#[cfg(target_arch = "wasm32")]
pub mod logging;
#[cfg(target_arch = "wasm32")]
pub mod page;
#[cfg(target_arch = "wasm32")]
pub mod platform;


/// Element id of the JSON configuration block
pub const CONFIG_ELEMENT_ID: &str = "taskhero-config";

#[cfg(target_arch = "wasm32")]
pub use wasm::{boot, load_config, start};

#[cfg(target_arch = "wasm32")]
mod wasm {
    use crate::page::BrowserPage;
    use crate::platform::{BrowserClock, LocalStorageStore, TimeoutScheduler};
    use crate::{CONFIG_ELEMENT_ID, bindings, dom, logging};
    use std::rc::Rc;
    use taskhero_ui_core::{App, Ports, SimulatedBackend, UiConfig, UiError, UiResult};
    use tracing::{error, info, warn};
    use wasm_bindgen::prelude::*;

    /// Read and validate the page configuration.
    ///
    /// A missing block yields the defaults. A malformed or invalid block also
    /// yields the defaults, together with the error that caused the fallback.
    pub fn load_config() -> (UiConfig, Option<UiError>) {
        let Some(raw) = dom::by_id(CONFIG_ELEMENT_ID).and_then(|el| el.text_content()) else {
            return (UiConfig::default(), None);
        };

        match UiConfig::from_json(&raw) {
            Ok(config) => (config, None),
            Err(e) => (UiConfig::default(), Some(e)),
        }
    }

    /// Build the controllers against the live document and attach listeners
    pub fn boot(config: &UiConfig) -> UiResult<Rc<App>> {
        let page = Rc::new(BrowserPage::new());
        let ports = Ports {
            store: Rc::new(LocalStorageStore::open()),
            scheduler: Rc::new(TimeoutScheduler::new()),
            clock: Rc::new(BrowserClock),
            styles: page.clone(),
            theme: page.clone(),
            navigation: page.clone(),
            modals: page.clone(),
            notifications: page.clone(),
            page: page.clone(),
            backend: Rc::new(SimulatedBackend),
            fields: page.clone(),
            animation: page.clone(),
            banner: page.clone(),
        };

        let app = Rc::new(App::new(config, ports));
        bindings::bind_all(&app, &page, config)?;
        Ok(app)
    }

    #[cfg_attr(not(test), wasm_bindgen(start))]
    pub fn start() {
        console_error_panic_hook::set_once();

        let (config, config_error) = load_config();
        logging::init(&config.log_level);
        if let Some(e) = config_error {
            warn!("Using default configuration: {}", e);
        }

        match boot(&config) {
            Ok(_) => info!("TaskHero initialized successfully!"),
            Err(e) => error!("TaskHero failed to start: {}", e),
        }
    }
}
