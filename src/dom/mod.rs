//! Browser wiring.
//!
//! Everything that touches the DOM lives here: element lookup, event
//! listeners, the requestAnimationFrame loop, and the fetch transport.
//! The core never sees a DOM node; this layer feeds it events and a
//! clock, then mirrors its state onto the page after every tick.

mod apply;
mod render;
mod transport;

pub use transport::{post_form, TransportError};

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use thiserror::Error;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    CanvasRenderingContext2d, Document, Event, FormData, HtmlCanvasElement, HtmlElement,
    HtmlFormElement, MouseEvent, Window,
};

use crate::domain::config::PageConfig;
use crate::domain::fields::{FieldId, FormFields};
use crate::page::PageCore;
use crate::systems::form::SubmitOutcome;

/// Stable element ids of the markup contract.
mod ids {
    pub const MODAL: &str = "modalScrollArea";
    pub const MODAL_CONTENT: &str = "modalContent";
    pub const MODAL_INFO: &str = "modalInfo";
    pub const OPEN_BTN: &str = "openBtn";
    pub const CLOSE_BTN: &str = "closeBtn";
    pub const FORM: &str = "registrationForm";
    pub const SUBMIT_BTN: &str = "submitBtn";
    pub const FORM_STATUS: &str = "form-status";
    pub const SUCCESS_VIEW: &str = "successMsg";
    pub const MATRIX: &str = "matrix-success";
    pub const SUBTEXT: &str = "success-subtext";
    pub const HERO: &str = "hero";
    pub const CANVAS: &str = "bgCanvas";
}

#[derive(Debug, Error)]
pub enum DomError {
    #[error("required element #{0} is missing from the page markup")]
    MissingElement(String),
    #[error("element #{0} is not a {1}")]
    WrongElementKind(String, &'static str),
    #[error("no global window")]
    NoWindow,
}

impl From<DomError> for JsValue {
    fn from(err: DomError) -> JsValue {
        JsValue::from_str(&err.to_string())
    }
}

/// Resolved markup nodes plus the little bits of cross-frame state the
/// style mirror needs (see `apply`).
pub(crate) struct PageDom {
    window: Window,
    modal: HtmlElement,
    modal_content: HtmlElement,
    /// Present on the full layout only; the source markup sometimes
    /// omits it, so absence is tolerated.
    modal_info: Option<HtmlElement>,
    close_btn: HtmlElement,
    /// Inline triggers may be the only way in; the dedicated button is
    /// optional.
    open_btn: Option<HtmlElement>,
    form: HtmlFormElement,
    submit_btn: HtmlElement,
    status: HtmlElement,
    success_view: HtmlElement,
    matrix_container: HtmlElement,
    subtext: HtmlElement,
    hero: HtmlElement,
    /// Absent canvas (or context) disables particle rendering but
    /// never fails the rest of the page.
    surface: Option<CanvasSurface>,

    // apply-layer trackers
    matrix_spans: RefCell<Vec<HtmlElement>>,
    shaking_input: RefCell<Option<HtmlElement>>,
    success_scrolled: Cell<bool>,
}

pub(crate) struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl PageDom {
    fn bind(document: &Document, window: Window) -> Result<Self, DomError> {
        let surface = document
            .get_element_by_id(ids::CANVAS)
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
            .and_then(|canvas| {
                let ctx = canvas
                    .get_context("2d")
                    .ok()
                    .flatten()?
                    .dyn_into::<CanvasRenderingContext2d>()
                    .ok()?;
                Some(CanvasSurface { canvas, ctx })
            });

        Ok(Self {
            modal: require(document, ids::MODAL)?,
            modal_content: require(document, ids::MODAL_CONTENT)?,
            modal_info: optional(document, ids::MODAL_INFO),
            close_btn: require(document, ids::CLOSE_BTN)?,
            open_btn: optional(document, ids::OPEN_BTN),
            form: require_as(document, ids::FORM, "form")?,
            submit_btn: require(document, ids::SUBMIT_BTN)?,
            status: require(document, ids::FORM_STATUS)?,
            success_view: require(document, ids::SUCCESS_VIEW)?,
            matrix_container: require(document, ids::MATRIX)?,
            subtext: require(document, ids::SUBTEXT)?,
            hero: require(document, ids::HERO)?,
            surface,
            window,
            matrix_spans: RefCell::new(Vec::new()),
            shaking_input: RefCell::new(None),
            success_scrolled: Cell::new(false),
        })
    }

    fn now_ms(&self) -> f64 {
        self.window
            .performance()
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    fn viewport(&self) -> (f32, f32) {
        let w = self
            .window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        let h = self
            .window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        (w as f32, h as f32)
    }

    fn size_canvas_to_viewport(&self) {
        if let Some(surface) = &self.surface {
            let (w, h) = self.viewport();
            surface.canvas.set_width(w as u32);
            surface.canvas.set_height(h as u32);
        }
    }
}

fn require(document: &Document, id: &str) -> Result<HtmlElement, DomError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| DomError::MissingElement(id.to_string()))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| DomError::WrongElementKind(id.to_string(), "HtmlElement"))
}

fn require_as<T: JsCast>(
    document: &Document,
    id: &str,
    kind: &'static str,
) -> Result<T, DomError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| DomError::MissingElement(id.to_string()))?
        .dyn_into::<T>()
        .map_err(|_| DomError::WrongElementKind(id.to_string(), kind))
}

fn optional(document: &Document, id: &str) -> Option<HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

/// Keeps the render loop alive; `stop()` lets a host page tear the
/// engine down instead of animating forever.
#[wasm_bindgen]
pub struct BootHandle {
    running: Rc<Cell<bool>>,
}

#[wasm_bindgen]
impl BootHandle {
    pub fn stop(&self) {
        self.running.set(false);
    }
}

/// Wire the whole page: resolve the markup contract, build the core,
/// install listeners and the global `openRegistrationModal` entry
/// point, and start the frame loop.
#[wasm_bindgen]
pub fn boot(config_json: Option<String>) -> Result<BootHandle, JsValue> {
    let window = web_sys::window().ok_or(DomError::NoWindow)?;
    let document = window.document().ok_or(DomError::NoWindow)?;

    let config = match config_json {
        Some(json) => PageConfig::from_json(&json).map_err(|e| JsValue::from_str(&e))?,
        None => PageConfig::default(),
    };

    let dom = Rc::new(PageDom::bind(&document, window)?);
    dom.size_canvas_to_viewport();

    let (w, h) = dom.viewport();
    let now = dom.now_ms();
    let endpoint = config.form.endpoint_url.clone();
    let page = Rc::new(RefCell::new(PageCore::new_with_config(w, h, now, config)));

    web_sys::console::log_1(&"Neongrid page wired".into());

    install_modal_triggers(&dom, &page)?;
    install_pointer_listeners(&dom, &page)?;
    install_resize_listener(&dom, &page)?;
    install_submit_listener(&dom, &page, endpoint)?;

    let running = Rc::new(Cell::new(true));
    start_frame_loop(&dom, &page, &running)?;

    Ok(BootHandle { running })
}

fn install_modal_triggers(
    dom: &Rc<PageDom>,
    page: &Rc<RefCell<PageCore>>,
) -> Result<(), JsValue> {
    let open = {
        let dom = dom.clone();
        let page = page.clone();
        Closure::<dyn FnMut()>::new(move || {
            let now = dom.now_ms();
            dom.success_scrolled.set(false);
            page.borrow_mut().open_modal(now);
        })
    };

    if let Some(btn) = &dom.open_btn {
        let dom2 = dom.clone();
        let page2 = page.clone();
        let on_click = Closure::<dyn FnMut(Event)>::new(move |e: Event| {
            e.prevent_default();
            let now = dom2.now_ms();
            dom2.success_scrolled.set(false);
            page2.borrow_mut().open_modal(now);
        });
        btn.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();
    }

    // Global entry point for inline markup triggers.
    let global: &JsValue = dom.window.as_ref();
    js_sys::Reflect::set(
        global,
        &JsValue::from_str("openRegistrationModal"),
        open.as_ref(),
    )?;
    open.forget();

    let dom2 = dom.clone();
    let page2 = page.clone();
    let on_close = Closure::<dyn FnMut()>::new(move || {
        let now = dom2.now_ms();
        page2.borrow_mut().close_modal(now);
    });
    dom.close_btn
        .add_event_listener_with_callback("click", on_close.as_ref().unchecked_ref())?;
    on_close.forget();

    Ok(())
}

fn install_pointer_listeners(
    dom: &Rc<PageDom>,
    page: &Rc<RefCell<PageCore>>,
) -> Result<(), JsValue> {
    let page2 = page.clone();
    let on_move = Closure::<dyn FnMut(MouseEvent)>::new(move |e: MouseEvent| {
        page2
            .borrow_mut()
            .set_pointer(e.client_x() as f32, e.client_y() as f32);
    });
    dom.window
        .add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref())?;
    on_move.forget();

    let page2 = page.clone();
    let on_leave = Closure::<dyn FnMut()>::new(move || {
        page2.borrow_mut().clear_pointer();
    });
    dom.window
        .add_event_listener_with_callback("mouseout", on_leave.as_ref().unchecked_ref())?;
    on_leave.forget();

    Ok(())
}

fn install_resize_listener(
    dom: &Rc<PageDom>,
    page: &Rc<RefCell<PageCore>>,
) -> Result<(), JsValue> {
    let dom2 = dom.clone();
    let page2 = page.clone();
    let on_resize = Closure::<dyn FnMut()>::new(move || {
        dom2.size_canvas_to_viewport();
        let (w, h) = dom2.viewport();
        page2.borrow_mut().resize(w, h);
    });
    dom.window
        .add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
    on_resize.forget();

    Ok(())
}

fn install_submit_listener(
    dom: &Rc<PageDom>,
    page: &Rc<RefCell<PageCore>>,
    endpoint: String,
) -> Result<(), JsValue> {
    let dom2 = dom.clone();
    let page2 = page.clone();
    let on_submit = Closure::<dyn FnMut(Event)>::new(move |e: Event| {
        e.prevent_default();

        let fields = match read_fields(&dom2.form) {
            Ok(fields) => fields,
            Err(err) => {
                web_sys::console::error_1(&err);
                return;
            }
        };

        let timestamp = js_sys::Date::new_0()
            .to_iso_string()
            .as_string()
            .unwrap_or_default();
        let now = dom2.now_ms();

        let staged = page2.borrow_mut().begin_submit(&fields, &timestamp, now);
        let payload = match staged {
            Ok(payload) => payload,
            // Validation failed: status text and shake land on the next
            // frame; nothing goes on the wire.
            Err(_) => return,
        };

        let dom3 = dom2.clone();
        let page3 = page2.clone();
        let endpoint = endpoint.clone();
        spawn_local(async move {
            let outcome = if endpoint.is_empty() {
                SubmitOutcome::Failed("registration endpoint is not configured".to_string())
            } else {
                match post_form(&endpoint, payload.pairs()).await {
                    Ok(()) => SubmitOutcome::Sent,
                    Err(TransportError::Network(message)) => {
                        // The opaque transport hides the real result;
                        // treat a local throw as "probably arrived".
                        web_sys::console::warn_1(&JsValue::from_str(&message));
                        SubmitOutcome::NetworkAmbiguous
                    }
                    Err(TransportError::Setup(message)) => SubmitOutcome::Failed(message),
                }
            };

            let now = dom3.now_ms();
            page3.borrow_mut().finish_submit(outcome, now);
        });
    });
    dom.form
        .add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;
    on_submit.forget();

    Ok(())
}

fn read_fields(form: &HtmlFormElement) -> Result<FormFields, JsValue> {
    let data = FormData::new_with_form(form)?;
    let value = |field: FieldId| data.get(field.dom_name()).as_string().unwrap_or_default();
    Ok(FormFields {
        name: value(FieldId::Name),
        roll_number: value(FieldId::RollNumber),
        year: value(FieldId::Year),
        branch: value(FieldId::Branch),
        section: value(FieldId::Section),
        email: value(FieldId::Email),
        mobile: value(FieldId::Mobile),
        transaction_id: value(FieldId::TransactionId),
        expectations: value(FieldId::Expectations),
    })
}

fn start_frame_loop(
    dom: &Rc<PageDom>,
    page: &Rc<RefCell<PageCore>>,
    running: &Rc<Cell<bool>>,
) -> Result<(), JsValue> {
    let frame: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));

    let dom2 = dom.clone();
    let page2 = page.clone();
    let running2 = running.clone();
    let frame2 = frame.clone();
    *frame.borrow_mut() = Some(Closure::<dyn FnMut()>::new(move || {
        // Stopped: simply stop rescheduling. The closure stays
        // allocated for the page's lifetime, like the listeners.
        if !running2.get() {
            return;
        }

        let now = dom2.now_ms();
        {
            let mut core = page2.borrow_mut();
            core.tick(now);
            render::draw(&dom2, &core);
            apply::mirror(&dom2, &core, now);
        }

        if let Some(cb) = frame2.borrow().as_ref() {
            let _ = dom2
                .window
                .request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }));

    if let Some(cb) = frame.borrow().as_ref() {
        dom.window
            .request_animation_frame(cb.as_ref().unchecked_ref())?;
    }

    Ok(())
}
