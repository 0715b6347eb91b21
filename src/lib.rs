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
//! Control core for the Blinky Earrings.
//!
//! Eight LEDs play pre-authored patterns.  A single pushbutton cycles to the
//! next pattern on a short push and puts the device into power-down sleep on
//! a long push; the next push wakes it again.  The chosen pattern survives
//! power loss in one EEPROM byte.
//!
//! Everything in this crate is hardware independent.  The firmware binary
//! supplies the millisecond tick interrupt, the pins, the EEPROM and the
//! sleep registers through the seams defined here:
//!
//! * [`clock::Clock`] is the interrupt-shared millisecond counter.
//! * [`scheduler::ChannelBank`] drives the LED lines.
//! * [`settings::PatternStore`] persists the pattern index.
//! * [`power::PowerControl`] stops the clock and sleeps until woken.
//!
//! [`device::Device`] owns the rest of the state and runs the main loop.

#![cfg_attr(not(test), no_std)]

pub mod button;
pub mod clock;
pub mod config;
pub mod device;
pub mod patterns;
pub mod power;
pub mod scheduler;
pub mod settings;

pub use button::{ButtonClassifier, ButtonEvent, ButtonPhase};
pub use clock::{Clock, ClockRatio};
pub use config::{ButtonConfig, Config, RenderPolicy};
pub use device::{Activity, Device};
pub use patterns::{Pattern, Step};
pub use power::{PowerControl, PowerManager, PowerState};
pub use scheduler::{deadline_reached, ChannelBank, Scheduler};
pub use settings::{PatternStore, Settings};
