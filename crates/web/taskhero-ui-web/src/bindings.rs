//! Event listeners connecting the document to the controllers
//!
//! Every listener lives for the lifetime of the page and is leaked with
//! `forget()` once attached.

use crate::dom::{apply_min_date, field_value, js_error, query, query_all};
use crate::page::{
    BrowserPage, HAMBURGER_SELECTOR, NAV_MENU_SELECTOR, PRIORITY_OPTION_SELECTOR, THEME_TOGGLE_ID,
};
use gloo_events::{EventListener, EventListenerOptions};
use gloo_utils::{document, window};
use std::rc::Rc;
use taskhero_ui_core::animation::{HoverPhase, REVEAL_SELECTOR};
use taskhero_ui_core::command::{COMMAND_ATTR, COMMAND_SELECTOR, TASK_ID_ATTR};
use taskhero_ui_core::connectivity::Connectivity;
use taskhero_ui_core::form_enhancer::FieldKind;
use taskhero_ui_core::keyboard::{KeyPress, SEARCH_INPUT_SELECTOR, Shortcut};
use taskhero_ui_core::navigation::ClickTarget;
use taskhero_ui_core::validation::TaskForm;
use taskhero_ui_core::{App, Command, Priority, SubmitOutcome, UiConfig, UiError, UiResult};
use tracing::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Element, Event, FormData, HtmlButtonElement, HtmlElement, HtmlFormElement, HtmlInputElement,
    IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, KeyboardEvent, Node,
    ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
};

const TASK_FORM_SELECTOR: &str = ".task-form";
const NAV_LINK_SELECTOR: &str = ".nav-link";
const MODAL_SELECTOR: &str = ".modal";
const FIELD_SELECTOR: &str = "input, textarea, select";
const BUTTON_SELECTOR: &str = ".btn";
const ANCHOR_SELECTOR: &str = r##"a[href^="#"]"##;

/// Attach every page listener
pub fn bind_all(app: &Rc<App>, page: &Rc<BrowserPage>, config: &UiConfig) -> UiResult<()> {
    bind_release(app, page);
    bind_theme_toggle(app);
    bind_navigation(app)?;
    bind_modals(app)?;
    bind_task_forms(app)?;
    bind_priority_options(app)?;
    bind_form_fields(app, page)?;
    bind_scroll_reveal(app, page, config)?;
    bind_hover(app, page)?;
    bind_loading_buttons(app, page)?;
    bind_connectivity(app);
    bind_keyboard(app);
    bind_document_clicks(app);
    bind_anchor_scrolling()?;
    Ok(())
}

fn event_element(event: &Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

/// Drop per-element controller state when the page detaches an element
fn bind_release(app: &Rc<App>, page: &Rc<BrowserPage>) {
    let app = Rc::downgrade(app);
    page.on_release(move |key| {
        if let Some(app) = app.upgrade() {
            app.animations.forget(key);
        }
    });
}

fn bind_theme_toggle(app: &Rc<App>) {
    let Some(button) = document().get_element_by_id(THEME_TOGGLE_ID) else {
        debug!("No theme toggle on this page");
        return;
    };
    // Markup commands are handled by the delegated click listener
    if button.has_attribute(COMMAND_ATTR) {
        return;
    }
    let app = Rc::clone(app);
    EventListener::new(&button, "click", move |_| {
        app.dispatch(Command::ToggleTheme);
    })
    .forget();
}

fn bind_navigation(app: &Rc<App>) -> UiResult<()> {
    if let Some(hamburger) = query(HAMBURGER_SELECTOR) {
        let app = Rc::clone(app);
        EventListener::new(&hamburger, "click", move |_| {
            app.navigation.toggle();
        })
        .forget();
    }

    for link in query_all(NAV_LINK_SELECTOR)? {
        let app = Rc::clone(app);
        EventListener::new(&link, "click", move |_| app.navigation.on_link_click()).forget();
    }
    Ok(())
}

fn click_target(target: &Element) -> ClickTarget {
    let node: &Node = target;
    let inside = |selector: &str| query(selector).is_some_and(|el| el.contains(Some(node)));
    ClickTarget {
        in_hamburger: inside(HAMBURGER_SELECTOR),
        in_menu: inside(NAV_MENU_SELECTOR),
    }
}

fn bind_modals(app: &Rc<App>) -> UiResult<()> {
    for modal in query_all(MODAL_SELECTOR)? {
        let id = modal.id();
        if id.is_empty() {
            continue;
        }

        if let Some(close) = modal.query_selector(".close").ok().flatten() {
            let app = Rc::clone(app);
            let id = id.clone();
            EventListener::new(&close, "click", move |_| {
                app.tasks.close_modal(&id);
            })
            .forget();
        }

        let app = Rc::clone(app);
        let backdrop = modal.clone();
        EventListener::new(&modal, "click", move |event| {
            if event_element(event).is_some_and(|target| target == backdrop) {
                app.tasks.close_modal(&id);
            }
        })
        .forget();
    }
    Ok(())
}

fn read_task_form(form: &HtmlFormElement) -> TaskForm {
    match FormData::new_with_form(form) {
        Ok(data) => TaskForm {
            title: data.get("title").as_string(),
            due_date: data.get("due_date").as_string(),
        },
        Err(e) => {
            warn!("Cannot read task form: {}", js_error(e));
            TaskForm::default()
        }
    }
}

fn bind_task_forms(app: &Rc<App>) -> UiResult<()> {
    for form in query_all(TASK_FORM_SELECTOR)? {
        let app = Rc::clone(app);
        EventListener::new_with_options(
            &form,
            "submit",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                let Some(form) = event
                    .current_target()
                    .and_then(|t| t.dyn_into::<HtmlFormElement>().ok())
                else {
                    return;
                };
                if app.tasks.handle_task_submit(&read_task_form(&form)) == SubmitOutcome::Blocked {
                    event.prevent_default();
                }
            },
        )
        .forget();
    }
    Ok(())
}

fn bind_priority_options(app: &Rc<App>) -> UiResult<()> {
    for option in query_all(PRIORITY_OPTION_SELECTOR)? {
        let Some(input) = option
            .query_selector("input")
            .ok()
            .flatten()
            .and_then(|input| input.dyn_into::<HtmlInputElement>().ok())
        else {
            continue;
        };

        let app = Rc::clone(app);
        EventListener::new(&option, "click", move |_| {
            match input.value().parse::<Priority>() {
                Ok(priority) => app.tasks.select_priority(priority),
                Err(e) => debug!("Ignoring priority option: {}", e),
            }
        })
        .forget();
    }
    Ok(())
}

fn bind_form_fields(app: &Rc<App>, page: &Rc<BrowserPage>) -> UiResult<()> {
    let min_date = app.forms.min_date();

    for field in query_all(FIELD_SELECTOR)? {
        let key = page.registry().key_for(&field);
        let kind = FieldKind::from_input_type(field.get_attribute("type").as_deref());
        app.forms.register_field(key, kind, &field_value(&field));

        let focus_app = Rc::clone(app);
        EventListener::new(&field, "focus", move |_| focus_app.forms.on_focus(key)).forget();

        let blur_app = Rc::clone(app);
        let blurred = field.clone();
        EventListener::new(&field, "blur", move |_| {
            blur_app.forms.on_blur(key, &field_value(&blurred));
        })
        .forget();

        if kind == FieldKind::Date {
            if let Some(input) = field.dyn_ref::<HtmlInputElement>() {
                apply_min_date(input, &min_date);
            }
            let change_app = Rc::clone(app);
            let changed = field.clone();
            EventListener::new(&field, "change", move |_| {
                change_app.forms.on_date_change(key, &field_value(&changed));
            })
            .forget();
        }
    }
    Ok(())
}

fn bind_scroll_reveal(app: &Rc<App>, page: &Rc<BrowserPage>, config: &UiConfig) -> UiResult<()> {
    let reveal_app = Rc::clone(app);
    let reveal_page = Rc::clone(page);
    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, _observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if entry.is_intersecting() {
                    let key = reveal_page.registry().key_for(&entry.target());
                    reveal_app.animations.reveal(key);
                }
            }
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(config.reveal_threshold));
    options.set_root_margin(&config.reveal_root_margin);
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
            .map_err(js_error)?;
    callback.forget();

    for element in query_all(REVEAL_SELECTOR)? {
        page.registry().key_for(&element);
        observer.observe(&element);
    }
    page.set_observer(observer);
    Ok(())
}

fn bind_hover(app: &Rc<App>, page: &Rc<BrowserPage>) -> UiResult<()> {
    for card in query_all(REVEAL_SELECTOR)? {
        let key = page.registry().key_for(&card);
        let phases = [("mouseenter", HoverPhase::Enter), ("mouseleave", HoverPhase::Leave)];
        for (event, phase) in phases {
            let app = Rc::clone(app);
            EventListener::new(&card, event, move |_| app.animations.hover(key, phase)).forget();
        }
    }
    Ok(())
}

fn is_submit_button(element: &Element) -> bool {
    if let Some(button) = element.dyn_ref::<HtmlButtonElement>() {
        button.type_() == "submit"
    } else if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        input.type_() == "submit"
    } else {
        false
    }
}

fn bind_loading_buttons(app: &Rc<App>, page: &Rc<BrowserPage>) -> UiResult<()> {
    for button in query_all(BUTTON_SELECTOR)? {
        let key = page.registry().key_for(&button);
        let app = Rc::clone(app);
        let clicked = button.clone();
        EventListener::new(&button, "click", move |_| {
            if is_submit_button(&clicked) {
                app.animations.begin_loading(key);
            }
        })
        .forget();
    }
    Ok(())
}

fn bind_connectivity(app: &Rc<App>) {
    let window = window();
    app.connectivity
        .update(Connectivity::from_online(window.navigator().on_line()));

    for (event, online) in [("online", true), ("offline", false)] {
        let app = Rc::clone(app);
        EventListener::new(&window, event, move |_| {
            app.connectivity.update(Connectivity::from_online(online));
        })
        .forget();
    }
}

fn bind_keyboard(app: &Rc<App>) {
    let app = Rc::clone(app);
    EventListener::new_with_options(
        &document(),
        "keydown",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            let press = KeyPress {
                key: event.key(),
                ctrl: event.ctrl_key(),
                meta: event.meta_key(),
            };
            let Some(shortcut) = app.handle_key(&press) else {
                return;
            };
            if shortcut.prevents_default() {
                event.prevent_default();
            }
            if shortcut == Shortcut::FocusSearch {
                if let Some(search) =
                    query(SEARCH_INPUT_SELECTOR).and_then(|e| e.dyn_into::<HtmlElement>().ok())
                {
                    let _ = search.focus();
                }
            }
        },
    )
    .forget();
}

/// Outside-click menu closing and `data-command` dispatch
fn bind_document_clicks(app: &Rc<App>) {
    let app = Rc::clone(app);
    EventListener::new(&document(), "click", move |event| {
        let Some(target) = event_element(event) else {
            return;
        };
        app.navigation.on_document_click(click_target(&target));

        let Some(source) = target.closest(COMMAND_SELECTOR).ok().flatten() else {
            return;
        };
        let name = source.get_attribute(COMMAND_ATTR).unwrap_or_default();
        match Command::parse(&name, source.get_attribute(TASK_ID_ATTR).as_deref()) {
            Ok(command) => app.dispatch(command),
            Err(e) => warn!("Ignoring markup command: {}", UiError::from(e)),
        }
    })
    .forget();
}

fn bind_anchor_scrolling() -> UiResult<()> {
    for anchor in query_all(ANCHOR_SELECTOR)? {
        let href = anchor.get_attribute("href").unwrap_or_default();
        EventListener::new_with_options(
            &anchor,
            "click",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                event.prevent_default();
                let Some(target) = query(&href) else {
                    return;
                };
                let options = ScrollIntoViewOptions::new();
                options.set_behavior(ScrollBehavior::Smooth);
                options.set_block(ScrollLogicalPosition::Start);
                target.scroll_into_view_with_scroll_into_view_options(&options);
            },
        )
        .forget();
    }
    Ok(())
}
