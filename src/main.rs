// What you SEE:
// • A white 300x300 canvas. Hold Left Mouse and drag to draw in blue.
// • PREDICT DIGIT (or P): the drawing is shrunk to 28x28 and classified;
//   the result shows in the title bar and under the buttons. A rejected
//   predict adds a warning line and leaves the last result in place.
// • CLEAR CANVAS (or C) wipes the drawing. ESC quits.
//
// Usage: digit-sketch [MODEL.json]   (or set DIGIT_SKETCH_MODEL)

use digit_sketch::classifier::DenseNetwork;
use digit_sketch::config::AppConfig;
use digit_sketch::draw::{compose, Drawer, STRIP_BG};
use digit_sketch::error::Error;
use digit_sketch::shell::RecognizerShell;
use digit_sketch::stroke::StrokeSurface;
use digit_sketch::types::FrameBuffer;
use digit_sketch::ui::{Layout, PointerTracker, Routed, Router, UiAction};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Error> {
    let cfg = AppConfig::from_env();

    /* --- Model first ---
       Without it there is nothing to show; failing here exits non-zero. */
    let model = DenseNetwork::load(&cfg.model_path)?;
    println!("Model loaded successfully from '{}'.", cfg.model_path.display());

    let mut shell = RecognizerShell::new(StrokeSurface::new(cfg.canvas_side, cfg.canvas_side));
    shell.attach(Box::new(model));

    /* --- Window + reusable screen buffer --- */
    let layout = Layout::new(cfg.canvas_side);
    let mut drawer = Drawer::new(&cfg.title, layout.width, layout.height, cfg.target_fps)?;
    let mut screen = FrameBuffer::filled(layout.width, layout.height, STRIP_BG);

    let mut tracker = PointerTracker::default();
    let mut router = Router::new(layout);
    let hint = "Draw a digit, then press PREDICT!";
    let mut warning: Option<String> = None;
    let mut hovered = None;
    let mut strip_dirty = true;

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        /* 1) Inputs: mouse edges become pointer events, then get routed. */
        let mut action = None;
        if let Some(event) = tracker.poll(drawer.left_mouse_down(), drawer.mouse_pos()) {
            match router.route(event, tracker.position()) {
                Routed::Canvas(e) => shell.pointer(e),
                Routed::Action(a) => action = Some(a),
                Routed::Nothing => {}
            }
        }
        if drawer.p_pressed_once() { action = Some(UiAction::Predict); }
        if drawer.c_pressed_once() { action = Some(UiAction::Clear); }

        /* 2) Actions */
        match action {
            Some(UiAction::Predict) => {
                match shell.on_predict() {
                    Ok(p) => {
                        println!("{}", p.caption());
                        drawer.set_title(&p.caption());
                        warning = None;
                    }
                    Err(e) => {
                        // Rejected; the previous result stays on display.
                        eprintln!("Warning: {e}");
                        warning = Some(e.to_string());
                    }
                }
                strip_dirty = true;
            }
            Some(UiAction::Clear) => shell.on_clear(),
            None => {}
        }

        /* 3) Hover highlight on the buttons */
        let now_hovered = tracker.position().and_then(|p| layout.button_at(p));
        if now_hovered != hovered {
            hovered = now_hovered;
            strip_dirty = true;
        }

        /* 4) Redraw only when something changed; otherwise just pump events. */
        let canvas_dirty = shell.surface_mut().take_redraw();
        if canvas_dirty || strip_dirty {
            let status = shell.last_prediction().map(|p| p.caption());
            compose(
                &mut screen,
                shell.surface().snapshot(),
                &layout,
                hovered,
                status.as_deref().unwrap_or(hint),
                warning.as_deref(),
            );
            drawer.present(&screen)?;
            strip_dirty = false;
        } else {
            drawer.pump();
        }
    }

    Ok(())
}
