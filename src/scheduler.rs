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
//! Pattern playback.
//!
//! The scheduler is polled from the main loop.  When the current step's time
//! is up it moves to the next one, and in [`RenderPolicy::Multiplex`] it
//! also moves the single lit LED along to the next channel in the mask on
//! every poll.  The main loop spins fast enough that the eye sees all of
//! them lit at once, only dimmer.

use embedded_hal::digital::OutputPin;

use crate::config::RenderPolicy;
use crate::patterns::{Pattern, Step};

/// The LED output lines.
pub trait ChannelBank {
    /// Number of channels.  Mask bits at or above this are ignored.
    fn channel_count(&self) -> u8;

    fn set(&mut self, channel: u8, on: bool);

    fn all_off(&mut self) {
        for channel in 0..self.channel_count() {
            self.set(channel, false);
        }
    }
}

/// Pins in channel order.  Pin errors are ignored; an LED that fails to
/// switch just shows the wrong thing.
impl<P: OutputPin, const N: usize> ChannelBank for [P; N] {
    fn channel_count(&self) -> u8 {
        u8::try_from(N).unwrap_or(u8::MAX)
    }

    fn set(&mut self, channel: u8, on: bool) {
        if let Some(pin) = self.get_mut(usize::from(channel)) {
            let _ = if on { pin.set_high() } else { pin.set_low() };
        }
    }
}

/// True once `now` has reached `deadline`.
///
/// `now >= deadline` stops working when the counter wraps between the two.
/// The difference taken as a signed number doesn't, as long as they are
/// less than 2^31 ms (about 24 days) apart.
pub fn deadline_reached(now: u32, deadline: u32) -> bool {
    now.wrapping_sub(deadline) as i32 >= 0
}

pub struct Scheduler {
    catalog: &'static [Pattern],
    render: RenderPolicy,
    pattern: u8,
    // None until the first step of the pattern has been fetched.
    step: Option<usize>,
    // None means due immediately.
    deadline: Option<u32>,
    mask: u8,
    active: Option<u8>,
}

impl Scheduler {
    /// A scheduler that starts `pattern` on its first poll.  Out of range
    /// pattern numbers start pattern 0 instead.
    pub fn new(catalog: &'static [Pattern], render: RenderPolicy, pattern: u8) -> Self {
        let mut scheduler = Self {
            catalog,
            render,
            pattern: 0,
            step: None,
            deadline: None,
            mask: 0,
            active: None,
        };
        scheduler.select(pattern);
        scheduler
    }

    pub fn pattern_count(&self) -> u8 {
        u8::try_from(self.catalog.len()).unwrap_or(u8::MAX)
    }

    pub fn pattern_index(&self) -> u8 {
        self.pattern
    }

    /// Index of the current step, or `None` before the first poll of a
    /// pattern.
    pub fn step_index(&self) -> Option<usize> {
        self.step
    }

    pub fn deadline(&self) -> Option<u32> {
        self.deadline
    }

    /// Channels lit by the current step.
    pub fn mask(&self) -> u8 {
        self.mask
    }

    /// The one channel lit right now when multiplexing.
    pub fn active_channel(&self) -> Option<u8> {
        self.active
    }

    /// Switch to `pattern` (0 if out of range) and start it from the top.
    pub fn select(&mut self, pattern: u8) {
        self.pattern = if pattern < self.pattern_count() { pattern } else { 0 };
        self.restart();
    }

    /// Switch to the pattern after the current one, wrapping around.
    pub fn next_pattern(&mut self) -> u8 {
        self.select(self.pattern.wrapping_add(1));
        self.pattern
    }

    /// Start the current pattern over on the next poll.
    pub fn restart(&mut self) {
        self.step = None;
        self.deadline = None;
        self.mask = 0;
        self.active = None;
    }

    /// Advance if the current step is over, then render.  Returns the index
    /// of the new step if there is one.
    pub fn poll<C: ChannelBank>(&mut self, now: u32, channels: &mut C) -> Option<usize> {
        let due = self
            .deadline
            .map_or(true, |deadline| deadline_reached(now, deadline));
        let stepped = if due {
            self.advance(now, channels);
            self.step
        } else {
            None
        };
        if self.render == RenderPolicy::Multiplex {
            self.multiplex(channels);
        }
        stepped
    }

    fn current_pattern(&self) -> Pattern {
        self.catalog
            .get(usize::from(self.pattern))
            .copied()
            .unwrap_or(&[])
    }

    fn advance<C: ChannelBank>(&mut self, now: u32, channels: &mut C) {
        let pattern = self.current_pattern();
        let mut index = self.step.map_or(0, |step| step + 1);
        // Loops at most once, unless the pattern is nothing but its end.
        let step: Step = loop {
            match pattern.get(index) {
                Some(step) if !step.is_end() => break *step,
                _ => index = 0,
            }
        };

        // Clean slate, so nothing from the last step ghosts into this one.
        channels.all_off();
        self.step = Some(index);
        self.deadline = Some(now.wrapping_add(u32::from(step.duration)));
        self.mask = step.mask;
        self.active = None;

        if self.render == RenderPolicy::Direct {
            for channel in 0..channels.channel_count().min(8) {
                if self.mask & (1 << channel) != 0 {
                    channels.set(channel, true);
                }
            }
        }
    }

    // Light the next channel in the mask after the active one.
    fn multiplex<C: ChannelBank>(&mut self, channels: &mut C) {
        if self.mask == 0 {
            return;
        }
        let count = channels.channel_count().min(8);
        let start = match self.active {
            Some(channel) if channel < count => channel + 1,
            _ => 0,
        };
        let next = (0..count)
            .map(|i| (start + i) % count)
            .find(|channel| self.mask & (1 << channel) != 0);
        let Some(next) = next else {
            return;
        };
        if self.active != Some(next) {
            if let Some(old) = self.active.filter(|old| *old < count) {
                channels.set(old, false);
            }
            channels.set(next, true);
            self.active = Some(next);
        }
    }
}
