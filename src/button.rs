// This library is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This library is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this library.  If not, see <http://www.gnu.org/licenses/>.
//! Pushbutton classification.
//!
//! The button is active low with the internal pull-up enabled.  A push is
//! only classified once it is released, as short or long by how long it was
//! held.  Both edges start a debounce window during which the pin is not
//! even sampled.

use embedded_hal::digital::InputPin;

use crate::config::ButtonConfig;

/// What one poll of the button produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonEvent {
    None,
    ShortPush,
    LongPush,
}

/// Where the classifier is between polls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonPhase {
    Idle,
    /// Held down past the debounce window, waiting for release.
    PressStart,
    /// Inside a debounce window.
    Debounced,
}

/// Turns raw button samples into [`ButtonEvent`]s.
pub struct ButtonClassifier {
    config: ButtonConfig,
    press_start: Option<u32>,
    debounce_start: Option<u32>,
    // Set on wake so the push that woke us isn't also classified.
    suppressed: bool,
}

impl ButtonClassifier {
    pub fn new(config: ButtonConfig) -> Self {
        Self {
            config,
            press_start: None,
            debounce_start: None,
            suppressed: false,
        }
    }

    pub fn phase(&self) -> ButtonPhase {
        match (self.debounce_start, self.press_start) {
            (Some(_), _) => ButtonPhase::Debounced,
            (None, Some(_)) => ButtonPhase::PressStart,
            (None, None) => ButtonPhase::Idle,
        }
    }

    pub fn is_suppressed(&self) -> bool {
        self.suppressed
    }

    /// Ignore the current push, if any, and open a debounce window at `now`.
    pub fn suppress(&mut self, now: u32) {
        self.suppressed = true;
        self.debounce_start = Some(now);
    }

    /// Sample `pin` and classify.  A pin that fails to read counts as
    /// released.
    pub fn poll<P: InputPin>(&mut self, now: u32, pin: &mut P) -> ButtonEvent {
        self.poll_with(now, || matches!(pin.is_low(), Ok(true)))
    }

    /// Classify using `pressed` to sample the button.  `pressed` is not
    /// called while a debounce window is open.
    pub fn poll_with(&mut self, now: u32, pressed: impl FnOnce() -> bool) -> ButtonEvent {
        if let Some(start) = self.debounce_start {
            if now.wrapping_sub(start) < self.config.debounce_ms {
                return ButtonEvent::None;
            }
            self.debounce_start = None;
        }

        if pressed() {
            if self.suppressed {
                return ButtonEvent::None;
            }
            if self.press_start.is_none() {
                self.press_start = Some(now);
                self.debounce_start = Some(now);
            }
            return ButtonEvent::None;
        }

        self.suppressed = false;
        let Some(start) = self.press_start.take() else {
            return ButtonEvent::None;
        };
        self.debounce_start = Some(now);
        if now.wrapping_sub(start) > self.config.long_push_ms {
            ButtonEvent::LongPush
        } else {
            ButtonEvent::ShortPush
        }
    }
}
