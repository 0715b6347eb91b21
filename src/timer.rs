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
//! The `millis()` interrupt.
//!
//! Uses timer TC0 and its compare match A interrupt to update the global
//! millisecond [`Clock`].  The clock tells the handler when to change the
//! compare value, since the timer can't count out exactly one millisecond.
//!
//! Based on https://blog.rahix.de/005-avr-hal-millis/

use avr_device::interrupt::Mutex;
use core::cell;

use attiny_hal::pac::TC0;
use blinky_earrings::config::CLOCK_RATIO;
use blinky_earrings::Clock;

pub static CLOCK: Clock = Clock::new(CLOCK_RATIO);

// The handler owns the timer once it is running.
static TIMER: Mutex<cell::RefCell<Option<TC0>>> = Mutex::new(cell::RefCell::new(None));

/// Timer/Counter 0 Compare Match A interrupt service routine.
#[avr_device::interrupt(attiny84)]
fn TIM0_COMPA() {
    if let Some(compare) = CLOCK.tick() {
        avr_device::interrupt::free(|cs| {
            if let Some(tc0) = TIMER.borrow(cs).borrow().as_ref() {
                tc0.ocr0a.write(|w| w.bits(compare));
            }
        })
    }
}

/// Initialise Timer/Counter 0 for counting milliseconds.
///
/// Interrupts have to be enabled afterwards for the clock to run.
pub fn init_tc0(tc0: TC0) {
    // Clear Timer on Compare, so OCR0A sets the length of each tick.
    tc0.tccr0a.write(|w| w.wgm0().ctc());
    tc0.ocr0a.write(|w| w.bits(CLOCK.initial_compare()));
    tc0.tccr0b.write(|w| w.cs0().prescale_64());
    tc0.timsk0.write(|w| w.ocie0a().set_bit());

    CLOCK.reset();
    avr_device::interrupt::free(|cs| {
        TIMER.borrow(cs).replace(Some(tc0));
    });
}
