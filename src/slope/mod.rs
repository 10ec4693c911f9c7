//! Downhill slope scene: browser shell.
//!
//! This module owns everything that touches the DOM or the canvas. The
//! simulation itself is pure and lives in the submodules ([`projection`],
//! [`input`], [`pose`], [`scene`], [`world`]); the shell reads keyboard
//! state into the world's control signals, steps the world once per
//! animation frame, and redraws the whole scene from the result. A draw
//! always observes the position produced by the step immediately before it
//! in the same frame.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, window};

pub mod input;
pub mod pose;
pub mod projection;
pub mod scene;
pub mod world;

use input::Control;
use projection::SlopeTrack;
use world::PatrolWorld;

// Default canvas size when the host page does not provide one.
const CANVAS_W: u32 = 800;
const CANVAS_H: u32 = 600;

/// Runtime scene state: the drawing surface plus the pure world.
struct PatrolScreen {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    world: PatrolWorld,
}

thread_local! {
    static PATROL_STATE: std::cell::RefCell<Option<PatrolScreen>> = std::cell::RefCell::new(None);
}

type FrameCallback = std::rc::Rc<std::cell::RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn performance_now() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

/// Build the scene, wire the DOM controls, and start the frame loop. The
/// world stays paused until the start control is clicked.
#[wasm_bindgen]
pub fn start_patrol_mode() -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    // Create / reuse the scene canvas.
    let canvas: HtmlCanvasElement = if let Some(el) = doc.get_element_by_id("sp-canvas") {
        el.dyn_into()?
    } else {
        let c: HtmlCanvasElement = doc.create_element("canvas")?.dyn_into()?;
        c.set_id("sp-canvas");
        c.set_width(CANVAS_W);
        c.set_height(CANVAS_H);
        c.set_attribute("style", "position:fixed; left:50%; top:46%; transform:translate(-50%,-50%); box-shadow:0 0 32px 0 rgba(0,0,0,0.35); border-radius:12px; border:2px solid #1e293b; background:#0b1224; z-index:20;").ok();
        doc.body().unwrap().append_child(&c)?;
        c
    };
    let ctx: CanvasRenderingContext2d = canvas.get_context("2d")?.unwrap().dyn_into()?;

    let world = PatrolWorld::new(
        canvas.width() as f64,
        canvas.height() as f64,
        performance_now() as u64,
    );
    PATROL_STATE.with(|cell| cell.replace(Some(PatrolScreen { canvas, ctx, world })));

    // Status line under the canvas.
    if doc.get_element_by_id("sp-status").is_none() {
        if let Some(body) = doc.body() {
            let div = doc.create_element("div")?;
            div.set_id("sp-status");
            div.set_text_content(Some("Ready for the rescue. Press 'Start patrol'."));
            div.set_attribute("style", "position:fixed; bottom:28px; left:50%; transform:translateX(-50%); font-family:'Helvetica Neue', Arial, sans-serif; font-size:15px; padding:4px 10px; background:rgba(0,0,0,0.42); border:1px solid #333; border-radius:6px; color:#e2e8f0; z-index:30;").ok();
            body.append_child(&div)?;
        }
    }

    // Start control. One transition only: paused -> running.
    let button: web_sys::Element = if let Some(el) = doc.get_element_by_id("sp-start") {
        el
    } else {
        let b = doc.create_element("button")?;
        b.set_id("sp-start");
        b.set_text_content(Some("Start patrol"));
        b.set_attribute("style", "position:fixed; top:24px; left:50%; transform:translateX(-50%); font-family:'Helvetica Neue', Arial, sans-serif; font-size:16px; padding:8px 18px; background:#dc2626; border:none; border-radius:8px; color:#f9fafb; cursor:pointer; z-index:30;").ok();
        doc.body().unwrap().append_child(&b)?;
        b
    };
    {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
            PATROL_STATE.with(|cell| {
                if let Some(state) = cell.borrow_mut().as_mut() {
                    state.world.start();
                }
            });
            if let Some(doc) = window().and_then(|w| w.document()) {
                if let Some(el) = doc.get_element_by_id("sp-status") {
                    el.set_text_content(Some("Rescue underway! Steer with the arrow keys."));
                }
            }
        }) as Box<dyn FnMut(_)>);
        button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Keyboard listeners toggle the held control signals.
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
            if let Some(control) = Control::from_key(&evt.key()) {
                PATROL_STATE.with(|cell| {
                    if let Some(state) = cell.borrow_mut().as_mut() {
                        state.world.controls.set(control, true);
                    }
                });
            }
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
            if let Some(control) = Control::from_key(&evt.key()) {
                PATROL_STATE.with(|cell| {
                    if let Some(state) = cell.borrow_mut().as_mut() {
                        state.world.controls.set(control, false);
                    }
                });
            }
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    start_patrol_loop();
    Ok(())
}

fn start_patrol_loop() {
    let f: FrameCallback = std::rc::Rc::new(std::cell::RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |_ts: f64| {
        PATROL_STATE.with(|cell| {
            if let Some(state) = cell.borrow_mut().as_mut() {
                patrol_tick(state);
            }
        });
        if let Some(w) = window() {
            let _ =
                w.request_animation_frame(f.borrow().as_ref().unwrap().as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));
    if let Some(w) = window() {
        let _ = w.request_animation_frame(g.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}

// --- Tick & rendering --------------------------------------------------------

fn patrol_tick(state: &mut PatrolScreen) {
    state.world.step();
    render_scene(state);
}

fn render_scene(state: &mut PatrolScreen) {
    let w = state.canvas.width() as f64;
    let h = state.canvas.height() as f64;
    state.ctx.clear_rect(0.0, 0.0, w, h);

    draw_background(&state.ctx, &state.world, w, h);
    draw_snow_lines(&state.ctx, &state.world);
    draw_patrol(&state.ctx, &state.world);
    draw_overlay(&state.ctx, &state.world, w, h);
}

fn draw_background(ctx: &CanvasRenderingContext2d, world: &PatrolWorld, w: f64, h: f64) {
    let sky = ctx.create_linear_gradient(0.0, 0.0, 0.0, h);
    sky.add_color_stop(0.0, "#0b1224").ok();
    sky.add_color_stop(0.5, "#101a33").ok();
    sky.add_color_stop(1.0, "#1d2a44").ok();
    ctx.set_fill_style_canvas_gradient(&sky);
    ctx.fill_rect(0.0, 0.0, w, h);

    ctx.set_fill_style_str("rgba(255, 255, 255, 0.8)");
    for star in &world.stars {
        ctx.fill_rect(star.x, star.y, star.size, star.size);
    }

    draw_mountain(ctx, w * 0.2, h * 0.75, w * 0.45, h * 0.28);
    draw_mountain(ctx, w * 0.6, h * 0.78, w * 0.6, h * 0.32);
    draw_mountain(ctx, w * 0.9, h * 0.72, w * 0.4, h * 0.25);

    draw_slope(ctx, &world.track);
}

fn draw_mountain(ctx: &CanvasRenderingContext2d, center_x: f64, base_y: f64, mw: f64, mh: f64) {
    ctx.set_fill_style_str("#0f172a");
    ctx.begin_path();
    ctx.move_to(center_x, base_y - mh);
    ctx.line_to(center_x - mw / 2.0, base_y);
    ctx.line_to(center_x + mw / 2.0, base_y);
    ctx.close_path();
    ctx.fill();

    // Snow cap.
    ctx.set_fill_style_str("#e5e7eb");
    ctx.begin_path();
    ctx.move_to(center_x, base_y - mh);
    ctx.line_to(center_x - mw * 0.2, base_y - mh * 0.65);
    ctx.line_to(center_x, base_y - mh * 0.55);
    ctx.line_to(center_x + mw * 0.18, base_y - mh * 0.68);
    ctx.close_path();
    ctx.fill();
}

fn draw_slope(ctx: &CanvasRenderingContext2d, track: &SlopeTrack) {
    ctx.set_fill_style_str("#f1f5f9");
    ctx.begin_path();
    ctx.move_to(track.center_x - track.top_width / 2.0, track.top_y);
    ctx.line_to(track.center_x + track.top_width / 2.0, track.top_y);
    ctx.line_to(track.center_x + track.bottom_width / 2.0, track.bottom_y);
    ctx.line_to(track.center_x - track.bottom_width / 2.0, track.bottom_y);
    ctx.close_path();
    ctx.fill();

    ctx.set_stroke_style_str("rgba(148, 163, 184, 0.4)");
    ctx.set_line_width(3.0);
    ctx.stroke();
}

fn draw_snow_lines(ctx: &CanvasRenderingContext2d, world: &PatrolWorld) {
    ctx.set_stroke_style_str("rgba(148, 163, 184, 0.65)");
    ctx.set_line_width(2.0);
    for snow in &world.snow_lines {
        let bounds = world.track.bounds_at_depth(snow.y);
        let x = bounds.left_x + bounds.width() * snow.offset;
        // Strokes foreshorten toward the top of the slope.
        let length = snow.length * (0.6 + 0.4 * world.track.depth_t(snow.y));
        ctx.begin_path();
        ctx.move_to(x - length * 0.3, snow.y);
        ctx.line_to(x + length * 0.7, snow.y - 6.0);
        ctx.stroke();
    }
}

fn draw_patrol(ctx: &CanvasRenderingContext2d, world: &PatrolWorld) {
    let x = world.patrol_x;
    let y = world.patrol_y;
    let pose = &world.pose;

    let body_width = 22.0;
    // Tuck shortens the torso and drops everything above the skis.
    let body_height = 28.0 - pose.crouch * 6.0;
    let drop = pose.crouch * 5.0;

    // Shadow under the skis.
    ctx.save();
    ctx.set_fill_style_str("rgba(15, 23, 42, 0.35)");
    ctx.begin_path();
    ctx.ellipse(x, y + 18.0, 26.0, 8.0, 0.0, 0.0, std::f64::consts::TAU)
        .ok();
    ctx.fill();
    ctx.restore();

    // Skis, rotated by the eased lean and separated by the spread factor.
    ctx.save();
    ctx.translate(x, y + 10.0).ok();
    ctx.rotate(pose.lean).ok();
    ctx.set_stroke_style_str("#0f172a");
    ctx.set_line_width(3.0);
    let ski_off = 8.0 * pose.ski_spread;
    for side in [-1.0, 1.0] {
        ctx.begin_path();
        ctx.move_to(side * ski_off, -2.0);
        ctx.line_to(side * ski_off, 18.0);
        ctx.stroke();
    }
    ctx.restore();

    // Poles trail behind.
    ctx.save();
    ctx.set_stroke_style_str("rgba(15, 23, 42, 0.7)");
    ctx.set_line_width(2.0);
    ctx.begin_path();
    ctx.move_to(x - 8.0, y + 2.0);
    ctx.line_to(x - 18.0, y - 20.0 + drop);
    ctx.stroke();
    ctx.begin_path();
    ctx.move_to(x + 8.0, y + 4.0);
    ctx.line_to(x + 18.0, y - 18.0 + drop);
    ctx.stroke();
    ctx.restore();

    // Backpack.
    ctx.set_fill_style_str("#1e293b");
    ctx.fill_rect(x - body_width / 2.0 - 4.0, y - body_height - 2.0 + drop, 10.0, 18.0);

    // Jacket.
    ctx.set_fill_style_str("#dc2626");
    ctx.fill_rect(x - body_width / 2.0, y - body_height + drop, body_width, body_height);

    // Patrol cross on the jacket.
    ctx.set_fill_style_str("#f9fafb");
    let cross_width = 12.0;
    let cross_thick = 4.0;
    let cy = y - body_height / 2.0 + drop;
    ctx.fill_rect(x - cross_thick / 2.0, cy - cross_width / 2.0, cross_thick, cross_width);
    ctx.fill_rect(x - cross_width / 2.0, cy - cross_thick / 2.0, cross_width, cross_thick);

    // Legs.
    ctx.set_fill_style_str("#111827");
    ctx.fill_rect(x - 10.0, y - 4.0, 8.0, 12.0);
    ctx.fill_rect(x + 2.0, y - 4.0, 8.0, 12.0);

    // Helmet, stripe, goggles.
    let head_radius = 10.0;
    let head_center_y = y - body_height - 8.0 + drop;
    ctx.begin_path();
    ctx.arc(x, head_center_y, head_radius, std::f64::consts::PI, 0.0)
        .ok();
    ctx.close_path();
    ctx.set_fill_style_str("#0f172a");
    ctx.fill();

    ctx.set_fill_style_str("#dc2626");
    ctx.fill_rect(x - head_radius, head_center_y - 1.0, head_radius * 2.0, 4.0);

    ctx.set_fill_style_str("#38bdf8");
    ctx.fill_rect(x - 9.0, head_center_y + 2.0, 18.0, 6.0);
    ctx.set_fill_style_str("rgba(248, 250, 252, 0.6)");
    ctx.fill_rect(x - 6.0, head_center_y + 3.0, 5.0, 2.0);
}

fn draw_overlay(ctx: &CanvasRenderingContext2d, world: &PatrolWorld, w: f64, h: f64) {
    if world.running {
        return;
    }
    ctx.set_fill_style_str("rgba(15, 23, 42, 0.6)");
    ctx.fill_rect(0.0, 0.0, w, h);

    ctx.set_fill_style_str("#e2e8f0");
    ctx.set_font("22px 'Helvetica Neue', Arial, sans-serif");
    ctx.set_text_align("center");
    ctx.fill_text(
        "Ready for the rescue. Press 'Start patrol'.",
        w / 2.0,
        h / 2.0,
    )
    .ok();
}
