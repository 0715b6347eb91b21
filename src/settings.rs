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
//! EEPROM settings.
//!
//! The selected pattern is stored to the onboard EEPROM whenever it changes,
//! and read back at startup.

/// Durable storage for the pattern number.
pub trait PatternStore {
    /// The stored byte, or `None` if it couldn't be read.
    fn load(&mut self) -> Option<u8>;

    fn store(&mut self, pattern: u8);
}

/// Saved state, restored at boot.
pub struct Settings {
    /// Pattern number (range: 0 to pattern count - 1)  Default: 0
    pub pattern: u8,

    // Last pattern saved to EEPROM used to determine if changed.
    last_saved_pattern: Option<u8>,
}

const PATTERN_DEFAULT: u8 = 0;

impl Default for Settings {
    fn default() -> Self {
        Self {
            pattern: PATTERN_DEFAULT,
            last_saved_pattern: None,
        }
    }
}

impl Settings {
    /// Constructs a new Settings from the value stored in `store`.  A value
    /// that can't be read, or isn't below `pattern_count`, gives the default.
    #[must_use]
    pub fn load<S: PatternStore>(store: &mut S, pattern_count: u8) -> Self {
        let Some(value) = store.load() else {
            return Settings::default();
        };
        let pattern = match value {
            v if v < pattern_count => v,
            _ => PATTERN_DEFAULT,
        };
        Settings {
            pattern,
            last_saved_pattern: Some(value),
        }
    }

    /// Save the settings to `store`.
    ///
    /// EEPROM has a limited number of write cycles in its life, so nothing
    /// is written if the stored value is already current.
    pub fn save<S: PatternStore>(&mut self, store: &mut S) {
        if self.last_saved_pattern == Some(self.pattern) {
            return;
        }
        store.store(self.pattern);
        self.last_saved_pattern = Some(self.pattern);
    }
}
