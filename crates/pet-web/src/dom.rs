//! DOM-backed host: every visual is a fixed-position round `div`.

use std::collections::HashMap;

use glam::Vec2;
use pet_engine::{FoodColor, Host, PetConfig, VisualHandle, VisualKind, VisualUpdate};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement, Window};

const PET_COLOR: &str = "black";

/// Per-kind look of a visual element.
struct VisualStyle {
    size: f32,
    z_index: u32,
    opacity: Option<f32>,
}

pub struct DomHost {
    window: Window,
    document: Document,
    elements: HashMap<u32, HtmlElement>,
    next_id: u32,
    pet_size: f32,
    food_size: f32,
    trail_size: f32,
    feeder_size: f32,
}

impl DomHost {
    pub fn new(config: &PetConfig) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("window has no document"))?;
        Ok(Self {
            window,
            document,
            elements: HashMap::new(),
            next_id: 1,
            pet_size: config.pet_size,
            food_size: config.food_size,
            trail_size: config.trail_initial_size,
            feeder_size: config.feeder_size,
        })
    }

    /// The element behind a live handle.
    pub fn element(&self, handle: &VisualHandle) -> Option<&HtmlElement> {
        self.elements.get(&handle.id())
    }

    fn style_for(&self, kind: VisualKind) -> VisualStyle {
        match kind {
            VisualKind::Pet => VisualStyle { size: self.pet_size, z_index: 10000, opacity: None },
            VisualKind::Feeder => VisualStyle { size: self.feeder_size, z_index: 10001, opacity: None },
            VisualKind::Food => VisualStyle { size: self.food_size, z_index: 10002, opacity: Some(0.85) },
            VisualKind::Trail => VisualStyle { size: self.trail_size, z_index: 9999, opacity: Some(0.4) },
        }
    }

    fn build_element(&self, kind: VisualKind, color: Option<FoodColor>, pos: Vec2) -> Result<HtmlElement, JsValue> {
        let element: HtmlElement = self.document.create_element("div")?.dyn_into()?;
        let look = self.style_for(kind);
        let style = element.style();
        style.set_property("position", "fixed")?;
        style.set_property("left", &px(pos.x))?;
        style.set_property("top", &px(pos.y))?;
        style.set_property("width", &px(look.size))?;
        style.set_property("height", &px(look.size))?;
        style.set_property("background", color.map(FoodColor::hex).unwrap_or(PET_COLOR))?;
        style.set_property("border-radius", "50%")?;
        style.set_property("z-index", &look.z_index.to_string())?;
        if let Some(opacity) = look.opacity {
            style.set_property("opacity", &opacity.to_string())?;
        }
        if kind == VisualKind::Feeder {
            style.set_property("border", "2px solid #fff")?;
            style.set_property("box-shadow", "0 0 6px #0003")?;
            style.set_property("cursor", "pointer")?;
        }

        let body = self
            .document
            .body()
            .ok_or_else(|| JsValue::from_str("document has no body"))?;
        body.append_child(&element)?;
        Ok(element)
    }

    fn apply(element: &HtmlElement, update: VisualUpdate) -> Result<(), JsValue> {
        let style = element.style();
        if let Some(pos) = update.position {
            style.set_property("left", &px(pos.x))?;
            style.set_property("top", &px(pos.y))?;
        }
        if let Some(opacity) = update.opacity {
            style.set_property("opacity", &opacity.to_string())?;
        }
        if let Some(size) = update.size {
            style.set_property("width", &px(size))?;
            style.set_property("height", &px(size))?;
        }
        Ok(())
    }
}

impl Host for DomHost {
    fn create_visual(&mut self, kind: VisualKind, color: Option<FoodColor>, position: Vec2) -> VisualHandle {
        let id = self.next_id;
        self.next_id += 1;
        // A failed element still yields a handle; later updates on it are no-ops.
        match self.build_element(kind, color, position) {
            Ok(element) => {
                self.elements.insert(id, element);
            }
            Err(err) => log::warn!("dom: failed to create {:?} visual: {:?}", kind, err),
        }
        VisualHandle::new(id)
    }

    fn update_visual(&mut self, handle: &VisualHandle, update: VisualUpdate) {
        if let Some(element) = self.elements.get(&handle.id()) {
            if let Err(err) = Self::apply(element, update) {
                log::warn!("dom: failed to update visual {}: {:?}", handle.id(), err);
            }
        }
    }

    fn destroy_visual(&mut self, handle: VisualHandle) {
        if let Some(element) = self.elements.remove(&handle.id()) {
            element.remove();
        }
    }

    fn viewport(&self) -> Vec2 {
        let width = self.window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let height = self.window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        Vec2::new(width as f32, height as f32)
    }
}

fn px(v: f32) -> String {
    format!("{}px", v)
}
