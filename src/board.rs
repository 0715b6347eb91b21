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
//! ATtiny84 wiring: core clock, EEPROM and power-down sleep.
//!
//! LEDs are on PA0, PA1, PA2, PA3, PA7, PB0, PB1 and PB2 in channel order.
//! The button pulls PA5 to ground.

use attiny_hal::pac::{AC, ADC, CPU, EXINT};
use attiny_hal::Eeprom;
use blinky_earrings::config::EEPROM_PATTERN_ADDR;
use blinky_earrings::{PatternStore, PowerControl};

// CLKPR prescaler select.
#[cfg(not(feature = "twirlie"))]
const CLKPS: u8 = 0b0100; // 8 MHz / 16 = 500 kHz
#[cfg(feature = "twirlie")]
const CLKPS: u8 = 0b0010; // 8 MHz / 4 = 2 MHz

// GIMSK / PCMSK0: pin change interrupt on PA5.
const PCIE0: u8 = 1 << 4;
const PCINT5: u8 = 1 << 5;

/// Slow the core clock down and switch off every peripheral we don't use.
pub fn trim_power(cpu: &CPU, adc: &ADC, ac: &AC) {
    avr_device::interrupt::free(|_| {
        // The prescaler change has to land within four cycles of setting
        // CLKPCE, which two back to back writes do.
        cpu.clkpr.write(|w| w.clkpce().set_bit());
        // SAFETY: CLKPS is one of the datasheet's defined division factors.
        cpu.clkpr.write(|w| unsafe { w.clkps().bits(CLKPS) });
    });

    adc.adcsra.reset();
    cpu.prr
        .write(|w| w.pradc().set_bit().prusi().set_bit().prtim1().set_bit());
    ac.acsr.write(|w| w.acd().set_bit());
    cpu.mcucr.modify(|_, w| w.sm().pdown());
}

/// The pattern number's home in EEPROM.
pub struct EepromStore(Eeprom);

impl EepromStore {
    pub fn new(eeprom: Eeprom) -> Self {
        Self(eeprom)
    }
}

impl PatternStore for EepromStore {
    fn load(&mut self) -> Option<u8> {
        let mut val = [0xff; 1];
        self.0.read(EEPROM_PATTERN_ADDR, &mut val).ok()?;
        Some(val[0])
    }

    fn store(&mut self, pattern: u8) {
        self.0.write_byte(EEPROM_PATTERN_ADDR, pattern);
    }
}

/// Only here to wake the CPU.
#[avr_device::interrupt(attiny84)]
fn PCINT0() {}

/// Power-down sleep, woken by the button.
pub struct Sleep {
    cpu: CPU,
    exint: EXINT,
}

impl Sleep {
    pub fn new(cpu: CPU, exint: EXINT) -> Self {
        Self { cpu, exint }
    }
}

impl PowerControl for Sleep {
    fn halt_clock(&mut self) {
        self.cpu.prr.modify(|_, w| w.prtim0().set_bit());
    }

    fn arm_wake_and_sleep(&mut self) {
        avr_device::interrupt::disable();
        self.exint
            .pcmsk0
            .modify(|r, w| unsafe { w.bits(r.bits() | PCINT5) });
        self.exint
            .gimsk
            .modify(|r, w| unsafe { w.bits(r.bits() | PCIE0) });
        self.cpu.mcucr.modify(|_, w| w.se().set_bit());

        // SAFETY: the instruction after `sei` always runs before any pending
        // interrupt, so a button edge since we disabled interrupts wakes us
        // from this sleep instead of being serviced before it.
        unsafe { core::arch::asm!("sei", "sleep") };

        self.cpu.mcucr.modify(|_, w| w.se().clear_bit());
    }

    fn disarm_wake(&mut self) {
        self.exint
            .pcmsk0
            .modify(|r, w| unsafe { w.bits(r.bits() & !PCINT5) });
        self.exint
            .gimsk
            .modify(|r, w| unsafe { w.bits(r.bits() & !PCIE0) });
    }

    fn resume_clock(&mut self) {
        self.cpu.prr.modify(|_, w| w.prtim0().clear_bit());
    }
}
