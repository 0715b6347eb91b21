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
//! Build-time configuration.
//!
//! The earrings and the twirlie are the same board with a different core
//! clock, different patterns and the same button timing.  Enable the
//! `twirlie` feature to build for the latter.

use crate::clock::ClockRatio;
use crate::patterns::{self, Pattern};

// "Factory" timing, in milliseconds:
/// Any state change on the button is followed by this long of ignoring it.
pub const DEBOUNCE_INTERVAL: u32 = 50;
/// A push held for longer than this is a long push.
pub const LONG_PUSH_THRESHOLD: u32 = 250;

/// EEPROM address of the saved pattern number.
pub const EEPROM_PATTERN_ADDR: u16 = 0;

/// Button timing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ButtonConfig {
    pub debounce_ms: u32,
    /// Exclusive: a push must last strictly longer to count as long.
    pub long_push_ms: u32,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEBOUNCE_INTERVAL,
            long_push_ms: LONG_PUSH_THRESHOLD,
        }
    }
}

/// How the channels of a step's mask are driven while the step is current.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderPolicy {
    /// All channels of the mask are lit at once for the whole step.
    Direct,
    /// One channel at a time, moving to the next lit channel on every poll.
    /// Keeps the peak current down to a single LED.
    Multiplex,
}

/// Everything the control core needs to know about the build.
#[derive(Clone, Copy)]
pub struct Config {
    pub button: ButtonConfig,
    pub render: RenderPolicy,
    pub catalog: &'static [Pattern],
}

/// Timer ratio for the core clock this build runs at.
#[cfg(not(feature = "twirlie"))]
pub const CLOCK_RATIO: ClockRatio = ClockRatio::EARRINGS;
#[cfg(feature = "twirlie")]
pub const CLOCK_RATIO: ClockRatio = ClockRatio::TWIRLIE;

#[cfg(not(feature = "twirlie"))]
const CATALOG: &[Pattern] = patterns::EARRINGS;
#[cfg(feature = "twirlie")]
const CATALOG: &[Pattern] = patterns::TWIRLIE;

impl Default for Config {
    fn default() -> Self {
        Self {
            button: ButtonConfig::default(),
            render: RenderPolicy::Multiplex,
            catalog: CATALOG,
        }
    }
}
