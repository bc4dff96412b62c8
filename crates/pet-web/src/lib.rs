pub mod dom;
pub mod runner;

pub use dom::DomHost;
pub use runner::{replace_runner, PetRunner};

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use pet_engine::{InputEvent, PetConfig};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, MouseEvent, TouchEvent};

thread_local! {
    static RUNNER: RefCell<Option<PetRunner<DomHost>>> = RefCell::new(None);
    static LOOP_RUNNING: Cell<bool> = Cell::new(false);
}

fn with_runner<R>(f: impl FnOnce(&mut PetRunner<DomHost>) -> R) -> R {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let runner = borrow.as_mut().expect("Pet not initialized. Call pet_init() first.");
        f(runner)
    })
}

/// Build the simulation on a DOM host. `config_json` overrides defaults.
/// A previous simulation is shut down first and its elements removed.
/// Does not start the frame loop; JS may drive `pet_tick` itself.
#[wasm_bindgen]
pub fn pet_init(config_json: Option<String>) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let config = match config_json {
        Some(json) => PetConfig::from_json(&json).map_err(|e| {
            log::warn!("pet: rejected config: {}", e);
            JsValue::from_str(&e.to_string())
        })?,
        None => PetConfig::default(),
    };
    let host = DomHost::new(&config)?;
    let seed = (js_sys::Math::random() * u32::MAX as f64) as u64;
    let runner = PetRunner::new(config, host, seed);

    let replaced = RUNNER.with(|cell| replace_runner(&mut cell.borrow_mut(), runner));
    if replaced.is_some() {
        log::info!("pet: replaced running simulation");
    }
    log::info!("pet: initialized");
    Ok(())
}

/// Initialize, wire pointer and feeder listeners, and run forever on
/// `requestAnimationFrame`. Calling it again restarts the simulation but keeps
/// the single window listener set and frame loop.
#[wasm_bindgen]
pub fn pet_start(config_json: Option<String>) -> Result<(), JsValue> {
    pet_init(config_json)?;
    install_feeder_listeners()?;
    if LOOP_RUNNING.with(Cell::get) {
        return Ok(());
    }
    install_pointer_listeners()?;
    start_frame_loop()?;
    LOOP_RUNNING.with(|running| running.set(true));
    log::info!("pet: frame loop started");
    Ok(())
}

#[wasm_bindgen]
pub fn pet_tick(now_ms: f64) {
    with_runner(|r| r.tick(now_ms));
}

#[wasm_bindgen]
pub fn pet_pointer_down(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerDown { x, y }));
}

#[wasm_bindgen]
pub fn pet_feed(feeder: usize) {
    with_runner(|r| r.push_input(InputEvent::Feed { feeder }));
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn pet_food_count() -> u32 {
    with_runner(|r| r.food_count())
}

#[wasm_bindgen]
pub fn pet_trail_count() -> u32 {
    with_runner(|r| r.trail_count())
}

#[wasm_bindgen]
pub fn pet_x() -> f32 {
    with_runner(|r| r.pet_x())
}

#[wasm_bindgen]
pub fn pet_y() -> f32 {
    with_runner(|r| r.pet_y())
}

// ---- Browser wiring ----

fn window() -> Result<web_sys::Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))
}

/// Clicks and touches anywhere retarget the pet. Listeners live for the page's lifetime.
fn install_pointer_listeners() -> Result<(), JsValue> {
    let window = window()?;

    let on_click = Closure::<dyn FnMut(MouseEvent)>::new(|event: MouseEvent| {
        pet_pointer_down(event.client_x() as f32, event.client_y() as f32);
    });
    window.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    on_click.forget();

    let on_touch = Closure::<dyn FnMut(TouchEvent)>::new(|event: TouchEvent| {
        if let Some(touch) = event.touches().get(0) {
            pet_pointer_down(touch.client_x() as f32, touch.client_y() as f32);
        }
    });
    window.add_event_listener_with_callback("touchstart", on_touch.as_ref().unchecked_ref())?;
    on_touch.forget();

    Ok(())
}

/// Feeder presses feed and stop there, so the window listener never retargets the pet.
fn install_feeder_listeners() -> Result<(), JsValue> {
    let feeders: Vec<(usize, HtmlElement)> = with_runner(|r| {
        r.sim()
            .feeders()
            .iter()
            .enumerate()
            .filter_map(|(i, feeder)| r.host().element(feeder.handle()).cloned().map(|el| (i, el)))
            .collect()
    });

    for (index, element) in feeders {
        for event_name in ["click", "touchstart"] {
            let on_press = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
                event.stop_propagation();
                pet_feed(index);
            });
            element.add_event_listener_with_callback(event_name, on_press.as_ref().unchecked_ref())?;
            on_press.forget();
        }
    }
    Ok(())
}

/// One simulation step per display refresh, re-armed from inside the callback.
fn start_frame_loop() -> Result<(), JsValue> {
    let callback: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let rearm = Rc::clone(&callback);

    *callback.borrow_mut() = Some(Closure::<dyn FnMut(f64)>::new(move |now_ms: f64| {
        pet_tick(now_ms);
        if let Some(cb) = rearm.borrow().as_ref() {
            if let Err(err) = request_frame(cb) {
                log::warn!("pet: failed to schedule next frame: {:?}", err);
            }
        }
    }));

    if let Some(cb) = callback.borrow().as_ref() {
        request_frame(cb)?;
    }
    Ok(())
}

fn request_frame(cb: &Closure<dyn FnMut(f64)>) -> Result<i32, JsValue> {
    window()?.request_animation_frame(cb.as_ref().unchecked_ref())
}
