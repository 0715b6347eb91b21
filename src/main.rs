/*
 Blinky Earrings

 Firmware for a pair of eight-LED earrings built around an ATtiny84.  A
 short push of the button moves on to the next pattern, a long push puts the
 earrings to sleep, and the next push wakes them up again.  The pattern is
 remembered across battery changes.

 Build with the `twirlie` feature for the spinning POV variant, which runs
 a faster core clock and its own patterns.

 This library is free software: you can redistribute it and/or modify
 it under the terms of the GNU General Public License as published by
 the Free Software Foundation, either version 3 of the License, or
 (at your option) any later version.

 This library is distributed in the hope that it will be useful,
 but WITHOUT ANY WARRANTY; without even the implied warranty of
 MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 GNU General Public License for more details.

 You should have received a copy of the GNU General Public License
 along with this library.  If not, see <http://www.gnu.org/licenses/>.

 */

#![cfg_attr(target_arch = "avr", no_std)]
#![cfg_attr(target_arch = "avr", no_main)]
#![cfg_attr(
    target_arch = "avr",
    feature(abi_avr_interrupt, asm_experimental_arch)
)]

#[cfg(target_arch = "avr")]
mod board;
#[cfg(target_arch = "avr")]
mod panic;
#[cfg(target_arch = "avr")]
mod timer;

#[cfg(target_arch = "avr")]
#[avr_device::entry]
fn main() -> ! {
    use blinky_earrings::{Config, Device};

    let dp = attiny_hal::Peripherals::take().unwrap();
    board::trim_power(&dp.CPU, &dp.ADC, &dp.AC);

    let pins = attiny_hal::pins!(dp);
    let leds = [
        pins.pa0.into_output().downgrade(),
        pins.pa1.into_output().downgrade(),
        pins.pa2.into_output().downgrade(),
        pins.pa3.into_output().downgrade(),
        pins.pa7.into_output().downgrade(),
        pins.pb0.into_output().downgrade(),
        pins.pb1.into_output().downgrade(),
        pins.pb2.into_output().downgrade(),
    ];
    let button = pins.pa5.into_pull_up_input();

    let eeprom = board::EepromStore::new(attiny_hal::Eeprom::new(dp.EEPROM));
    let sleep = board::Sleep::new(dp.CPU, dp.EXINT);

    timer::init_tc0(dp.TC0);
    // SAFETY: the clock is set up before its interrupt can fire.
    unsafe { avr_device::interrupt::enable() };

    let mut device = Device::new(
        Config::default(),
        &timer::CLOCK,
        button,
        leds,
        sleep,
        eeprom,
    );
    device.run()
}

// The control core lives in the library and is tested on the host; there is
// nothing to run there.
#[cfg(not(target_arch = "avr"))]
fn main() {}
