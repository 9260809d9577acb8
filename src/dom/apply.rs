//! Mirrors core state onto element styles after every tick.
//!
//! The core is the single source of truth; this module just projects it;
//! each frame overwrites the handful of style properties involved, so
//! there is no DOM state to get out of sync.

use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, ScrollBehavior, ScrollToOptions};

use crate::page::PageCore;

use super::PageDom;

pub(super) fn mirror(dom: &PageDom, core: &PageCore, now_ms: f64) {
    mirror_hero(dom, core, now_ms);
    mirror_modal(dom, core, now_ms);
    mirror_views(dom, core);
    mirror_shake(dom, core, now_ms);
    mirror_matrix(dom, core);
    mirror_subtext(dom, core, now_ms);
    scroll_success_into_view(dom, core);
}

fn set(el: &HtmlElement, property: &str, value: &str) {
    let _ = el.style().set_property(property, value);
}

fn clear(el: &HtmlElement, property: &str) {
    let _ = el.style().remove_property(property);
}

fn mirror_hero(dom: &PageDom, core: &PageCore, now_ms: f64) {
    set(&dom.hero, "opacity", &core.hero_opacity(now_ms).to_string());
    set(
        &dom.hero,
        "transform",
        &format!("translateY({}px)", core.hero_offset_y(now_ms)),
    );
}

fn mirror_modal(dom: &PageDom, core: &PageCore, now_ms: f64) {
    let modal = core.modal();
    if modal.is_interactive() {
        set(&dom.modal, "display", "flex");
        set(&dom.modal, "pointer-events", "auto");
        set(&dom.modal, "opacity", "1");
    } else {
        set(&dom.modal, "display", "none");
        set(&dom.modal, "pointer-events", "none");
        set(&dom.modal, "opacity", "0");
    }

    set(
        &dom.modal_content,
        "transform",
        &format!("scale({})", modal.content_scale(now_ms)),
    );
    set(
        &dom.modal_content,
        "opacity",
        &modal.content_opacity(now_ms).to_string(),
    );
}

fn mirror_views(dom: &PageDom, core: &PageCore) {
    let form_visible = core.form_view_visible();
    set(&dom.form, "display", if form_visible { "block" } else { "none" });
    if let Some(info) = &dom.modal_info {
        set(info, "display", if form_visible { "flex" } else { "none" });
    }
    set(
        &dom.success_view,
        "display",
        if core.success_view_visible() { "flex" } else { "none" },
    );

    dom.status.set_text_content(Some(core.form().status()));
    dom.submit_btn
        .set_text_content(Some(core.form().submit_label()));
    if core.form().submit_enabled() {
        let _ = dom.submit_btn.remove_attribute("disabled");
    } else {
        let _ = dom.submit_btn.set_attribute("disabled", "true");
    }
}

fn mirror_shake(dom: &PageDom, core: &PageCore, now_ms: f64) {
    match core.shake_offset(now_ms) {
        Some((field, offset)) => {
            let selector = format!("[name=\"{}\"]", field.dom_name());
            let input = dom
                .form
                .query_selector(&selector)
                .ok()
                .flatten()
                .and_then(|el| el.dyn_into::<HtmlElement>().ok());
            if let Some(input) = input {
                set(&input, "transform", &format!("translateX({offset}px)"));
                *dom.shaking_input.borrow_mut() = Some(input);
            }
        }
        None => {
            if let Some(input) = dom.shaking_input.borrow_mut().take() {
                clear(&input, "transform");
            }
        }
    }
}

fn mirror_matrix(dom: &PageDom, core: &PageCore) {
    let cells = core.matrix().cells();
    let mut spans = dom.matrix_spans.borrow_mut();

    if spans.len() != cells.len() {
        dom.matrix_container.set_inner_html("");
        spans.clear();
        let Some(document) = dom.window.document() else {
            return;
        };
        for _ in cells {
            let Ok(span) = document.create_element("span") else {
                continue;
            };
            let Ok(span) = span.dyn_into::<HtmlElement>() else {
                continue;
            };
            span.set_class_name("font-press-start text-codepink");
            set(&span, "display", "inline-block");
            set(&span, "width", "1ch");
            set(&span, "text-align", "center");
            let _ = dom.matrix_container.append_child(&span);
            spans.push(span);
        }
    }

    let glitch_color = &core.config().matrix.glitch_color;
    for (cell, span) in cells.iter().zip(spans.iter()) {
        span.set_text_content(Some(&cell.display().to_string()));
        if cell.highlighted() {
            set(span, "color", glitch_color);
            set(span, "text-shadow", "0 0 8px rgba(0, 255, 0, 0.8)");
        } else {
            clear(span, "color");
            clear(span, "text-shadow");
        }
    }
}

fn mirror_subtext(dom: &PageDom, core: &PageCore, now_ms: f64) {
    if let Some((opacity, rise)) = core.subtext_style(now_ms) {
        set(&dom.subtext, "opacity", &opacity.to_string());
        set(&dom.subtext, "transform", &format!("translateY({rise}px)"));
    }
}

/// Scroll the success view into place once per modal session.
fn scroll_success_into_view(dom: &PageDom, core: &PageCore) {
    if !core.success_view_visible() || dom.success_scrolled.get() {
        return;
    }
    dom.success_scrolled.set(true);

    let opts = ScrollToOptions::new();
    opts.set_top((dom.success_view.offset_top() - 40) as f64);
    opts.set_behavior(ScrollBehavior::Smooth);
    dom.modal.scroll_to_with_scroll_to_options(&opts);
}
