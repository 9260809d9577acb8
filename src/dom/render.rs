//! Canvas renderer for the particle field.
//!
//! Consumes the flat command buffers the core extracted on this tick:
//! circles as filled arcs, connection edges as lines whose stroke alpha
//! came out of the distance falloff.

use crate::page::PageCore;
use crate::systems::particles::{CIRCLE_STRIDE, LINE_STRIDE};

use super::PageDom;

pub(super) fn draw(dom: &PageDom, core: &PageCore) {
    // No canvas in the markup means nothing to paint; the rest of the
    // page keeps running.
    let Some(surface) = &dom.surface else {
        return;
    };

    let ctx = &surface.ctx;
    let width = surface.canvas.width() as f64;
    let height = surface.canvas.height() as f64;
    ctx.clear_rect(0.0, 0.0, width, height);

    let cfg = &core.config().particles;
    let [r, g, b] = cfg.color;
    let buffers = core.render_buffers();

    ctx.set_fill_style_str(&format!("rgba({r}, {g}, {b}, {})", cfg.base_alpha));
    for circle in buffers.circles.chunks_exact(CIRCLE_STRIDE) {
        ctx.begin_path();
        let _ = ctx.arc(
            circle[0] as f64,
            circle[1] as f64,
            circle[2] as f64,
            0.0,
            std::f64::consts::TAU,
        );
        ctx.fill();
    }

    ctx.set_line_width(1.0);
    for line in buffers.lines.chunks_exact(LINE_STRIDE) {
        ctx.set_stroke_style_str(&format!("rgba({r}, {g}, {b}, {})", line[4]));
        ctx.begin_path();
        ctx.move_to(line[0] as f64, line[1] as f64);
        ctx.line_to(line[2] as f64, line[3] as f64);
        ctx.stroke();
    }
}
