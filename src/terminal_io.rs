use std::collections::HashMap;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

// --- SimulatedInput for debugging ---
pub struct SimulatedInput {
    events: HashMap<u64, Vec<Event>>,
}

impl SimulatedInput {
    pub fn new(events: HashMap<u64, Vec<Event>>) -> Self {
        SimulatedInput { events }
    }

    /// Start, fire while sweeping left then right, release, quit.
    pub fn demo_script(last_frame: u64) -> Self {
        let mut script = SimulatedInput::new(HashMap::new());
        script.push(1, press(KeyCode::Enter));
        script.push(2, press(KeyCode::Char(' ')));
        script.push(3, press(KeyCode::Left));
        script.push(30, release(KeyCode::Left));
        script.push(31, press(KeyCode::Right));
        script.push(90, release(KeyCode::Right));
        script.push(120, release(KeyCode::Char(' ')));
        script.push(last_frame, press(KeyCode::Char('q')));
        script
    }

    pub fn push(&mut self, frame: u64, event: Event) {
        self.events.entry(frame).or_default().push(event);
    }

    /// Everything scripted for `frame`, in insertion order.
    pub fn take(&mut self, frame: u64) -> Vec<Event> {
        self.events.remove(&frame).unwrap_or_default()
    }
}

pub fn press(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Press))
}

pub fn release(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Release))
}
