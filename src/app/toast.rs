use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use gtk4::prelude::*;
use gtk4::Label;

/// In-window status badge that hides itself after a fixed delay.
#[derive(Clone)]
pub(super) struct ToastLabel {
    label: Label,
    duration: Duration,
    generation: Rc<Cell<u64>>,
}

impl ToastLabel {
    pub(super) fn new(label: &Label, duration_ms: u32) -> Self {
        Self {
            label: label.clone(),
            duration: Duration::from_millis(u64::from(duration_ms)),
            generation: Rc::new(Cell::new(0)),
        }
    }

    pub(super) fn flash(&self, message: &str) {
        self.label.set_text(message);
        self.label.set_visible(true);

        // A newer message keeps the badge up for its own full duration.
        let generation = self.generation.get().wrapping_add(1);
        self.generation.set(generation);

        let label = self.label.clone();
        let latest = self.generation.clone();
        gtk4::glib::timeout_add_local_once(self.duration, move || {
            if latest.get() == generation {
                label.set_visible(false);
            }
        });
    }
}
