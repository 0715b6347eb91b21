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
//! A `millis()` counter for timers that can't divide down to exactly 1 ms.
//!
//! The timer runs in CTC mode and interrupts once per emulated millisecond.
//! With a 500 kHz core clock and a prescaler of 64 the timer counts at
//! 7812.5 Hz, so one millisecond is 7 13/16 counts.  No single compare value
//! gets that right, so the interrupt handler alternates between two of them:
//! 13 interrupts out of every 16 use a period of 8 counts and the remaining
//! 3 use a period of 7.  That is 125 counts every 16 ms, which is exact on
//! average, and no single millisecond is off by more than one count.
//!
//! ╔═════════╦═══════════╦═══════════╦═══════════════╦══════════════╗
//! ║ Variant ║ Timer     ║ Counts/ms ║ Long periods  ║ Short periods║
//! ╠═════════╬═══════════╬═══════════╬═══════════════╬══════════════╣
//! ║ Earring ║ 7812.5 Hz ║ 7 13/16   ║ 13 × 8 counts ║ 3 × 7 counts ║
//! ║ Twirlie ║ 31250 Hz  ║ 31 1/4    ║ 1 × 32 counts ║ 3 × 31 counts║
//! ╚═════════╩═══════════╩═══════════╩═══════════════╩══════════════╝

use core::cell::Cell;

use critical_section::Mutex;

/// How to spread a fractional number of timer counts per millisecond over a
/// repeating cycle of interrupts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClockRatio {
    /// Whole number of timer counts per millisecond (the floor of the ratio).
    pub short_period: u8,
    /// Interrupts per cycle that use `short_period + 1` counts.
    pub long_ticks: u8,
    /// Interrupts in one full cycle.
    pub cycle_ticks: u8,
}

impl ClockRatio {
    /// 500 kHz core, prescaler 64: 7 13/16 counts per millisecond.
    pub const EARRINGS: Self = Self {
        short_period: 7,
        long_ticks: 13,
        cycle_ticks: 16,
    };

    /// 2 MHz core, prescaler 64: 31 1/4 counts per millisecond.
    pub const TWIRLIE: Self = Self {
        short_period: 31,
        long_ticks: 1,
        cycle_ticks: 4,
    };

    /// OCR0A value for a long period.  CTC counting is zero based and
    /// inclusive, so a compare value of `n` gives a period of `n + 1`.
    pub const fn long_compare(&self) -> u8 {
        self.short_period
    }

    /// OCR0A value for a short period.
    pub const fn short_compare(&self) -> u8 {
        self.short_period - 1
    }

    /// Timer counts in one full cycle of `cycle_ticks` milliseconds.
    pub const fn counts_per_cycle(&self) -> u32 {
        let long = self.long_ticks as u32;
        let short = (self.cycle_ticks - self.long_ticks) as u32;
        long * (self.short_period as u32 + 1) + short * self.short_period as u32
    }
}

#[derive(Clone, Copy)]
struct ClockState {
    millis: u32,
    cycle_pos: u8,
}

/// The millisecond counter shared between the timer interrupt and the main
/// loop.
///
/// The interrupt handler is the only writer and calls [`Clock::tick`].
/// Everything else calls [`Clock::read`].  The counter is 32 bits wide and
/// the AVR moves 8 bits at a time, so both run inside a critical section.
pub struct Clock {
    ratio: ClockRatio,
    state: Mutex<Cell<ClockState>>,
}

impl Clock {
    pub const fn new(ratio: ClockRatio) -> Self {
        Self::starting_at(ratio, 0)
    }

    /// A clock whose counter starts at `millis` instead of zero.
    pub const fn starting_at(ratio: ClockRatio, millis: u32) -> Self {
        Self {
            ratio,
            state: Mutex::new(Cell::new(ClockState {
                millis,
                cycle_pos: 0,
            })),
        }
    }

    /// Compare value to load before the timer starts.
    pub fn initial_compare(&self) -> u8 {
        self.ratio.long_compare()
    }

    /// Count one millisecond.  Call from the timer compare interrupt.
    ///
    /// Returns the new compare value when the period has to change for the
    /// next interrupt, or `None` to keep the current one.
    pub fn tick(&self) -> Option<u8> {
        critical_section::with(|cs| {
            let cell = self.state.borrow(cs);
            let mut state = cell.get();
            state.millis = state.millis.wrapping_add(1);
            state.cycle_pos += 1;
            let compare = if state.cycle_pos >= self.ratio.cycle_ticks {
                state.cycle_pos = 0;
                Some(self.ratio.long_compare())
            } else if state.cycle_pos == self.ratio.long_ticks {
                Some(self.ratio.short_compare())
            } else {
                None
            };
            cell.set(state);
            compare
        })
    }

    /// Return the number of milliseconds counted so far.
    pub fn read(&self) -> u32 {
        critical_section::with(|cs| self.state.borrow(cs).get().millis)
    }

    /// Reset the counter and the divider cycle.
    pub fn reset(&self) {
        critical_section::with(|cs| {
            self.state.borrow(cs).set(ClockState {
                millis: 0,
                cycle_pos: 0,
            });
        });
    }
}
