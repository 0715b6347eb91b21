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
//! The main loop.

use embedded_hal::digital::InputPin;
use ufmt::derive::uDebug;

use crate::button::{ButtonClassifier, ButtonEvent};
use crate::clock::Clock;
use crate::config::Config;
use crate::power::{PowerControl, PowerManager};
use crate::scheduler::{ChannelBank, Scheduler};
use crate::settings::{PatternStore, Settings};

/// What one pass through the main loop did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, uDebug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Activity {
    /// Nothing changed, apart from maybe which LED is multiplexed on.
    Idle,
    /// Moved to this step of the current pattern.
    Stepped(usize),
    /// A short push selected this pattern.
    PatternChanged(u8),
    /// A long push put us to sleep and we have just woken up again.
    Woke,
}

/// Everything the earrings know, apart from the time.
pub struct Device<'c, B, C, P, S> {
    clock: &'c Clock,
    button_pin: B,
    channels: C,
    store: S,
    settings: Settings,
    button: ButtonClassifier,
    scheduler: Scheduler,
    power: PowerManager<P>,
}

impl<'c, B, C, P, S> Device<'c, B, C, P, S>
where
    B: InputPin,
    C: ChannelBank,
    P: PowerControl,
    S: PatternStore,
{
    /// Switch every LED off and restore the saved pattern.  It starts on
    /// the first poll.
    pub fn new(
        config: Config,
        clock: &'c Clock,
        button_pin: B,
        mut channels: C,
        power: P,
        mut store: S,
    ) -> Self {
        channels.all_off();
        let scheduler = Scheduler::new(config.catalog, config.render, 0);
        let settings = Settings::load(&mut store, scheduler.pattern_count());
        let mut device = Self {
            clock,
            button_pin,
            channels,
            store,
            settings,
            button: ButtonClassifier::new(config.button),
            scheduler,
            power: PowerManager::new(power),
        };
        device.scheduler.select(device.settings.pattern);
        device
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn button(&self) -> &ButtonClassifier {
        &self.button
    }

    pub fn power(&self) -> &PowerManager<P> {
        &self.power
    }

    pub fn channels(&self) -> &C {
        &self.channels
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// One pass through the main loop.
    pub fn poll(&mut self) -> Activity {
        let now = self.clock.read();
        match self.button.poll(now, &mut self.button_pin) {
            ButtonEvent::LongPush => {
                self.power.sleep(
                    self.clock,
                    &mut self.channels,
                    &mut self.button,
                    &mut self.scheduler,
                );
                Activity::Woke
            }
            ButtonEvent::ShortPush => {
                self.settings.pattern = self.scheduler.next_pattern();
                self.settings.save(&mut self.store);
                Activity::PatternChanged(self.settings.pattern)
            }
            ButtonEvent::None => match self.scheduler.poll(now, &mut self.channels) {
                Some(step) => Activity::Stepped(step),
                None => Activity::Idle,
            },
        }
    }

    pub fn run(&mut self) -> ! {
        loop {
            self.poll();
        }
    }
}
