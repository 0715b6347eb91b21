//! Mock hardware for the device tests.

#![allow(dead_code)] // Not every test uses every mock

use core::cell::Cell;
use core::convert::Infallible;
use std::rc::Rc;

use blinky_earrings::{Activity, Clock, Device, PatternStore, PowerControl};
use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

// ============================================================================
// Pins
// ============================================================================

/// The pushbutton.  Clones share the same contact.
#[derive(Clone, Default)]
pub struct Button(Rc<Cell<bool>>);

impl Button {
    pub fn press(&self) {
        self.0.set(true);
    }

    pub fn release(&self) {
        self.0.set(false);
    }
}

impl ErrorType for Button {
    type Error = Infallible;
}

impl InputPin for Button {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.0.get())
    }

    // Active low.
    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(self.0.get())
    }
}

/// One LED line.  Clones share the same LED.
#[derive(Clone, Default)]
pub struct Led(Rc<Cell<bool>>);

impl ErrorType for Led {
    type Error = Infallible;
}

impl OutputPin for Led {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.0.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.0.set(true);
        Ok(())
    }
}

pub fn leds() -> [Led; 8] {
    Default::default()
}

/// Channels that are on right now.
pub fn lit(leds: &[Led]) -> Vec<u8> {
    (0..leds.len())
        .filter(|&i| leds[i].0.get())
        .map(|i| i as u8)
        .collect()
}

// ============================================================================
// EEPROM
// ============================================================================

pub struct Eeprom {
    pub value: Option<u8>,
    pub writes: usize,
}

impl Eeprom {
    pub fn holding(value: u8) -> Self {
        Self {
            value: Some(value),
            writes: 0,
        }
    }
}

impl PatternStore for Eeprom {
    fn load(&mut self) -> Option<u8> {
        self.value
    }

    fn store(&mut self, pattern: u8) {
        self.value = Some(pattern);
        self.writes += 1;
    }
}

// ============================================================================
// Sleep
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    HaltClock,
    ArmAndSleep,
    DisarmWake,
    ResumeClock,
}

/// Records what the power manager asked for.  Sleeping "lasts" until the
/// next button push, which it presses on the way out.
pub struct Sleeper {
    button: Button,
    leds: [Led; 8],
    pub calls: Vec<Call>,
    pub lit_while_asleep: Vec<Vec<u8>>,
}

impl Sleeper {
    pub fn new(button: &Button, leds: &[Led; 8]) -> Self {
        Self {
            button: button.clone(),
            leds: leds.clone(),
            calls: Vec::new(),
            lit_while_asleep: Vec::new(),
        }
    }
}

impl PowerControl for Sleeper {
    fn halt_clock(&mut self) {
        self.calls.push(Call::HaltClock);
    }

    fn arm_wake_and_sleep(&mut self) {
        self.calls.push(Call::ArmAndSleep);
        self.lit_while_asleep.push(lit(&self.leds));
        self.button.press();
    }

    fn disarm_wake(&mut self) {
        self.calls.push(Call::DisarmWake);
    }

    fn resume_clock(&mut self) {
        self.calls.push(Call::ResumeClock);
    }
}

// ============================================================================
// Driving the main loop
// ============================================================================

pub type TestDevice<'c> = Device<'c, Button, [Led; 8], Sleeper, Eeprom>;

/// Let `ms` milliseconds pass, polling once per millisecond.  Returns
/// everything that wasn't `Idle`.
pub fn run_for(device: &mut TestDevice<'_>, clock: &Clock, ms: u32) -> Vec<Activity> {
    let mut seen = Vec::new();
    for _ in 0..ms {
        clock.tick();
        let activity = device.poll();
        if activity != Activity::Idle {
            seen.push(activity);
        }
    }
    seen
}

/// Like [`run_for`] but drops the pattern steps too.
pub fn events_for(device: &mut TestDevice<'_>, clock: &Clock, ms: u32) -> Vec<Activity> {
    run_for(device, clock, ms)
        .into_iter()
        .filter(|activity| !matches!(activity, Activity::Stepped(_)))
        .collect()
}
