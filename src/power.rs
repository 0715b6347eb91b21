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
//! Power-down sleep and wake.

use crate::button::ButtonClassifier;
use crate::clock::Clock;
use crate::scheduler::{ChannelBank, Scheduler};

/// The sleep hardware.
pub trait PowerControl {
    /// Stop the millisecond timer.  Nothing needs the time while asleep.
    fn halt_clock(&mut self);

    /// Enable the button's wake interrupt and enter the deepest sleep mode,
    /// returning once the interrupt has fired.
    ///
    /// Arming and sleeping must be one uninterruptible sequence.  A button
    /// edge that lands between the two has to cancel the sleep, not be
    /// eaten by it, or nothing short of a reset will wake the device.
    fn arm_wake_and_sleep(&mut self);

    fn disarm_wake(&mut self);

    fn resume_clock(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PowerState {
    Running,
    Sleeping,
}

pub struct PowerManager<P> {
    control: P,
    state: PowerState,
}

impl<P: PowerControl> PowerManager<P> {
    pub fn new(control: P) -> Self {
        Self {
            control,
            state: PowerState::Running,
        }
    }

    pub fn state(&self) -> PowerState {
        self.state
    }

    pub fn control(&self) -> &P {
        &self.control
    }

    /// Go to sleep with every LED off, and come back when the button is
    /// pushed.
    ///
    /// On the way back the button is told to ignore the push that woke us,
    /// so its release doesn't change the pattern or send us straight back
    /// to sleep, and the current pattern starts over from its first step.
    pub fn sleep<C: ChannelBank>(
        &mut self,
        clock: &Clock,
        channels: &mut C,
        button: &mut ButtonClassifier,
        scheduler: &mut Scheduler,
    ) {
        channels.all_off();
        self.state = PowerState::Sleeping;
        self.control.halt_clock();
        self.control.arm_wake_and_sleep();

        self.control.disarm_wake();
        self.control.resume_clock();
        self.state = PowerState::Running;
        button.suppress(clock.read());
        scheduler.restart();
    }
}
