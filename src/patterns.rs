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
//! Pattern catalogs.
//!
//! A pattern is a list of steps ending in [`Step::END`].  Bit `n` of a
//! step's mask lights LED `n`.  The mask is a `u8`, so there can be at most
//! eight LEDs.
//!
//! A pattern made of nothing but `Step::END` never lights anything and
//! spins the scheduler forever.  Don't write one.

/// One frame of a pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step {
    pub mask: u8,
    /// Milliseconds.  Zero marks the end of the pattern.
    pub duration: u16,
}

impl Step {
    /// Loop back to the first step.
    pub const END: Self = Self::new(0, 0);

    pub const fn new(mask: u8, duration: u16) -> Self {
        Self { mask, duration }
    }

    pub const fn is_end(&self) -> bool {
        self.duration == 0
    }
}

pub type Pattern = &'static [Step];

const fn s(mask: u8, duration: u16) -> Step {
    Step::new(mask, duration)
}

// Circle in 800 ms.
const CIRCLE_CW: &[Step] = &[
    s(0b0000_0001, 100),
    s(0b0000_0010, 100),
    s(0b0000_0100, 100),
    s(0b0000_1000, 100),
    s(0b0001_0000, 100),
    s(0b0010_0000, 100),
    s(0b0100_0000, 100),
    s(0b1000_0000, 100),
    Step::END,
];

const CIRCLE_CCW: &[Step] = &[
    s(0b1000_0000, 100),
    s(0b0100_0000, 100),
    s(0b0010_0000, 100),
    s(0b0001_0000, 100),
    s(0b0000_1000, 100),
    s(0b0000_0100, 100),
    s(0b0000_0010, 100),
    s(0b0000_0001, 100),
    Step::END,
];

const AXIAL_CW: &[Step] = &[
    s(0b0001_0001, 100),
    s(0b0010_0010, 100),
    s(0b0100_0100, 100),
    s(0b1000_1000, 100),
    Step::END,
];

const AXIAL_CCW: &[Step] = &[
    s(0b1000_1000, 100),
    s(0b0100_0100, 100),
    s(0b0010_0010, 100),
    s(0b0001_0001, 100),
    Step::END,
];

const SKIP_AROUND: &[Step] = &[
    s(0b1000_0000, 100),
    s(0b0001_0000, 100),
    s(0b0000_0010, 100),
    s(0b0100_0000, 100),
    s(0b0000_1000, 100),
    s(0b0000_0001, 100),
    s(0b0010_0000, 100),
    s(0b0000_0100, 100),
    Step::END,
];

const BLINK_ALL: &[Step] = &[s(0b1111_1111, 200), s(0, 800), Step::END];

const ALL: u8 = 0b1111_1111;

// Slow flicker, fast flicker, hold, fast flicker, slow flicker, rest.
const PULSE_ALL: &[Step] = &[
    s(ALL, 10),
    s(0, 20),
    s(ALL, 10),
    s(0, 20),
    s(ALL, 10),
    s(0, 20),
    s(ALL, 10),
    s(0, 20),
    s(ALL, 10),
    s(0, 10),
    s(ALL, 10),
    s(0, 10),
    s(ALL, 10),
    s(0, 10),
    s(ALL, 10),
    s(0, 10),
    s(ALL, 100),
    s(0, 10),
    s(ALL, 10),
    s(0, 10),
    s(ALL, 10),
    s(0, 10),
    s(ALL, 10),
    s(0, 10),
    s(ALL, 10),
    s(0, 20),
    s(ALL, 10),
    s(0, 20),
    s(ALL, 10),
    s(0, 20),
    s(ALL, 10),
    s(0, 20),
    s(ALL, 10),
    s(0, 1000),
    Step::END,
];

/// The earring patterns, in button order.
pub const EARRINGS: &[Pattern] = &[
    CIRCLE_CW,
    CIRCLE_CCW,
    AXIAL_CW,
    AXIAL_CCW,
    SKIP_AROUND,
    BLINK_ALL,
    PULSE_ALL,
];

// The twirlie spins, so its patterns are persistence-of-vision frames only
// a few milliseconds long.

const ZIGZAG: &[Step] = &[
    s(0b0000_0001, 1),
    s(0b0000_0010, 1),
    s(0b0000_0100, 1),
    s(0b0000_1000, 1),
    s(0b0001_0000, 1),
    s(0b0010_0000, 1),
    s(0b0100_0000, 1),
    s(0b1000_0000, 1),
    s(0b0100_0000, 1),
    s(0b0010_0000, 1),
    s(0b0001_0000, 1),
    s(0b0000_1000, 1),
    s(0b0000_0100, 1),
    s(0b0000_0010, 1),
    Step::END,
];

const DIAMOND: &[Step] = &[
    s(0b1000_0001, 2),
    s(0b0100_0010, 2),
    s(0b0010_0100, 2),
    s(0b0001_1000, 2),
    s(0b0010_0100, 2),
    s(0b0100_0010, 2),
    Step::END,
];

const ARROW: &[Step] = &[
    s(0b0001_1000, 10),
    s(0b1001_1001, 2),
    s(0b0101_1010, 2),
    s(0b0011_1100, 2),
    s(0b0001_1000, 2),
    s(0b0000_0000, 4),
    Step::END,
];

/// The twirlie patterns, in button order.
pub const TWIRLIE: &[Pattern] = &[ZIGZAG, DIAMOND, ARROW];
