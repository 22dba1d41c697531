//! Chaser entry point
//!
//! Without a presentation layer attached, the binary plays one session on
//! autopilot and keeps the best-distance record. Native runs at the fixed
//! frame rate in a loop; the web build steps once per animation frame.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

use chaser::consts::TICK_RATE;
use chaser::sim::Appearance;
use chaser::{App, RecordStore, SetupForm};

/// Ten minutes of play at most
const MAX_TICKS: u64 = TICK_RATE as u64 * 600;

fn demo_form() -> SetupForm {
    SetupForm {
        name: "Autopilot".to_string(),
        age: "25".to_string(),
        appearance: Some(Appearance::Other),
    }
}

fn start_demo<S: RecordStore>(app: &mut App<S>) -> bool {
    if app.submit_setup(&demo_form()) {
        return true;
    }
    match app.last_error() {
        Some(e) => log::error!("Demo profile rejected: {}", e),
        None => log::error!("Demo could not start"),
    }
    false
}

fn report<S: RecordStore>(app: &mut App<S>, ticks: u64) {
    match app.summary() {
        Some(summary) => log::info!(
            "Result: distance {:.0}, pickups {}, {:.1}s{}",
            summary.distance,
            summary.pickups,
            summary.elapsed_seconds,
            if summary.new_record { " (new record!)" } else { "" }
        ),
        None => log::info!(
            "Stopped after {} ticks at distance {:.0}",
            ticks,
            app.session().stats().distance
        ),
    }
    log::info!("Best distance: {}", app.best().distance);
    app.exit();
}

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;

    use chaser::consts::SIM_DT;
    use chaser::highscores::LocalStorageRecordStore;
    use chaser::sim::autopilot;
    use chaser::{App, FrameInput, Screen};

    struct Demo {
        app: App<LocalStorageRecordStore>,
        last_time: f64,
        ticks: u64,
    }

    pub fn run() {
        let seed = js_sys::Date::now() as u64;
        log::info!("Chaser (web) starting with seed: {}", seed);
        let mut app = App::new(LocalStorageRecordStore, chaser::Tuning::load(), seed);
        if !super::start_demo(&mut app) {
            return;
        }

        let demo = Demo {
            app,
            last_time: 0.0,
            ticks: 0,
        };
        request_animation_frame(Rc::new(RefCell::new(demo)));
    }

    fn request_animation_frame(demo: Rc<RefCell<Demo>>) {
        let Some(window) = web_sys::window() else {
            log::error!("No window; demo stopped");
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(demo, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(demo: Rc<RefCell<Demo>>, time: f64) {
        let finished = {
            let mut d = demo.borrow_mut();

            // Real frame time, with a nominal first step
            let dt = if d.last_time > 0.0 {
                (time - d.last_time) / 1000.0
            } else {
                SIM_DT
            };
            d.last_time = time;

            let input = FrameInput {
                jump: autopilot::should_jump(d.app.session()),
            };
            d.app.frame(dt, input);
            d.ticks += 1;
            d.app.screen() != Screen::Playing || d.ticks >= super::MAX_TICKS
        };

        if finished {
            let mut d = demo.borrow_mut();
            let ticks = d.ticks;
            super::report(&mut d.app, ticks);
        } else {
            request_animation_frame(demo);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    web::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use chaser::consts::SIM_DT;
    use chaser::highscores::FileRecordStore;
    use chaser::sim::autopilot;
    use chaser::{FrameInput, Screen};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    log::info!("Chaser (native) starting with seed: {}", seed);

    let mut app = App::new(FileRecordStore::default(), chaser::Tuning::load(), seed);
    if !start_demo(&mut app) {
        return;
    }

    let mut ticks = 0;
    while app.screen() == Screen::Playing && ticks < MAX_TICKS {
        let input = FrameInput {
            jump: autopilot::should_jump(app.session()),
        };
        app.frame(SIM_DT, input);
        ticks += 1;
    }
    report(&mut app, ticks);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
