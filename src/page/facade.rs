use wasm_bindgen::prelude::*;

use crate::domain::config::PageConfig;
use crate::domain::fields::FormFields;
use crate::systems::form::SubmitOutcome;
use crate::systems::matrix::MatrixCell;

use super::PageCore;

/// JS-facing wrapper around [`PageCore`].
///
/// Events and the clock go in; visual state comes back out as plain
/// getters. Render commands are exposed as ptr/len pairs so an embedder
/// can view them as `Float32Array`s over the wasm memory without copies.
#[wasm_bindgen]
pub struct Page {
    pub(crate) core: PageCore,
}

#[wasm_bindgen]
impl Page {
    /// Create the page state for a viewport; `now_ms` is the boot
    /// instant all entrance animations are scheduled against.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32, now_ms: f64) -> Self {
        Self {
            core: PageCore::new(width, height, now_ms),
        }
    }

    #[wasm_bindgen(js_name = newWithConfig)]
    pub fn new_with_config(
        width: f32,
        height: f32,
        now_ms: f64,
        config_json: String,
    ) -> Result<Page, JsValue> {
        let config = PageConfig::from_json(&config_json).map_err(|e| JsValue::from_str(&e))?;
        Ok(Self {
            core: PageCore::new_with_config(width, height, now_ms, config),
        })
    }

    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> u64 {
        self.core.frame()
    }

    #[wasm_bindgen(getter)]
    pub fn particle_count(&self) -> usize {
        self.core.particle_count()
    }

    /// Advance every subsystem to `now_ms`.
    pub fn tick(&mut self, now_ms: f64) {
        self.core.tick(now_ms);
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.core.resize(width, height);
    }

    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.core.set_pointer(x, y);
    }

    pub fn clear_pointer(&mut self) {
        self.core.clear_pointer();
    }

    // === RENDER BUFFERS (filled by tick) ===

    /// Circle commands, 3 floats each: x, y, radius
    pub fn circles_ptr(&self) -> *const f32 {
        self.core.render_buffers().circles.as_ptr()
    }

    pub fn circles_len(&self) -> usize {
        self.core.render_buffers().circles.len()
    }

    /// Line commands, 5 floats each: x1, y1, x2, y2, alpha
    pub fn lines_ptr(&self) -> *const f32 {
        self.core.render_buffers().lines.as_ptr()
    }

    pub fn lines_len(&self) -> usize {
        self.core.render_buffers().lines.len()
    }

    // === MODAL ===

    pub fn open_modal(&mut self, now_ms: f64) {
        self.core.open_modal(now_ms);
    }

    pub fn close_modal(&mut self, now_ms: f64) {
        self.core.close_modal(now_ms);
    }

    /// Whether the modal container should be displayed and interactive.
    pub fn modal_interactive(&self) -> bool {
        self.core.modal().is_interactive()
    }

    pub fn modal_content_scale(&self, now_ms: f64) -> f32 {
        self.core.modal().content_scale(now_ms)
    }

    pub fn modal_content_opacity(&self, now_ms: f64) -> f32 {
        self.core.modal().content_opacity(now_ms)
    }

    // === ENTRANCE / REACTION TWEENS ===

    pub fn hero_opacity(&self, now_ms: f64) -> f32 {
        self.core.hero_opacity(now_ms)
    }

    pub fn hero_offset_y(&self, now_ms: f64) -> f32 {
        self.core.hero_offset_y(now_ms)
    }

    pub fn subtext_opacity(&self, now_ms: f64) -> f32 {
        self.core.subtext_style(now_ms).map(|(o, _)| o).unwrap_or(0.0)
    }

    pub fn subtext_offset_y(&self, now_ms: f64) -> f32 {
        self.core.subtext_style(now_ms).map(|(_, y)| y).unwrap_or(0.0)
    }

    /// DOM name of the field currently shaking, if any.
    pub fn shake_field(&self, now_ms: f64) -> Option<String> {
        self.core
            .shake_offset(now_ms)
            .map(|(field, _)| field.dom_name().to_string())
    }

    pub fn shake_offset_px(&self, now_ms: f64) -> f32 {
        self.core.shake_offset(now_ms).map(|(_, px)| px).unwrap_or(0.0)
    }

    // === FORM ===

    /// Validate and stage a submission. Returns the wire payload as a
    /// JSON array of [column, value] pairs when staged, or `None` when
    /// validation rejected it (the status text and shake state say why).
    pub fn begin_submit(
        &mut self,
        fields_json: String,
        timestamp: String,
        now_ms: f64,
    ) -> Result<Option<String>, JsValue> {
        let fields = FormFields::from_json(&fields_json).map_err(|e| JsValue::from_str(&e))?;
        match self.core.begin_submit(&fields, &timestamp, now_ms) {
            Ok(payload) => {
                let json = serde_json::to_string(payload.pairs())
                    .map_err(|e| JsValue::from_str(&e.to_string()))?;
                Ok(Some(json))
            }
            Err(_) => Ok(None),
        }
    }

    pub fn finish_submit_sent(&mut self, now_ms: f64) {
        self.core.finish_submit(SubmitOutcome::Sent, now_ms);
    }

    pub fn finish_submit_network_ambiguous(&mut self, now_ms: f64) {
        self.core.finish_submit(SubmitOutcome::NetworkAmbiguous, now_ms);
    }

    pub fn finish_submit_failed(&mut self, message: String, now_ms: f64) {
        self.core.finish_submit(SubmitOutcome::Failed(message), now_ms);
    }

    pub fn form_status(&self) -> String {
        self.core.form().status().to_string()
    }

    pub fn submit_label(&self) -> String {
        self.core.form().submit_label().to_string()
    }

    pub fn submit_enabled(&self) -> bool {
        self.core.form().submit_enabled()
    }

    pub fn form_view_visible(&self) -> bool {
        self.core.form_view_visible()
    }

    pub fn success_view_visible(&self) -> bool {
        self.core.success_view_visible()
    }

    /// "sent", "ambiguous", "failed", or "" before any submission.
    pub fn last_submit_outcome(&self) -> String {
        match self.core.form().last_outcome() {
            Some(SubmitOutcome::Sent) => "sent",
            Some(SubmitOutcome::NetworkAmbiguous) => "ambiguous",
            Some(SubmitOutcome::Failed(_)) => "failed",
            None => "",
        }
        .to_string()
    }

    // === MATRIX REVEAL ===

    pub fn matrix_cell_count(&self) -> usize {
        self.core.matrix().cells().len()
    }

    pub fn matrix_cell_char(&self, index: usize) -> String {
        self.core
            .matrix()
            .cells()
            .get(index)
            .map(|c| c.display().to_string())
            .unwrap_or_default()
    }

    pub fn matrix_cell_highlighted(&self, index: usize) -> bool {
        self.core
            .matrix()
            .cells()
            .get(index)
            .map(MatrixCell::highlighted)
            .unwrap_or(false)
    }

    pub fn matrix_active(&self) -> bool {
        self.core.matrix().is_active()
    }
}
