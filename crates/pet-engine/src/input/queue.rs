/// Input events the simulation understands.
/// The host reduces raw mouse/touch input to these before queueing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A click/touch landed at viewport coordinates (x, y).
    PointerDown { x: f32, y: f32 },
    /// Feeder `feeder` was activated directly by the host UI.
    Feed { feeder: usize },
}

/// A queue of input events.
/// Host event handlers push; the frame step drains once per tick.
#[derive(Debug, Default)]
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(16),
        }
    }

    /// Push a new input event (called from host event handlers).
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}
