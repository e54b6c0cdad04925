use serde::{Deserialize, Serialize};

/// Identifies one armed host-side timer callback.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerToken(u32);

/// Owned handle for a delayed or repeating host callback.
///
/// The engine arms the slot and hands the token to the host; the host calls
/// back with that token when its timer fires. Any transition that supersedes
/// the pending callback re-arms or cancels the slot, so a late callback is
/// rejected instead of mutating state it no longer owns.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TimerSlot {
    serial: u32,
    armed: Option<TimerToken>,
}

impl TimerSlot {
    pub fn arm(&mut self) -> TimerToken {
        self.serial = self.serial.wrapping_add(1);
        let token = TimerToken(self.serial);
        self.armed = Some(token);
        token
    }

    pub fn cancel(&mut self) {
        self.armed = None;
    }

    pub const fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    pub const fn token(&self) -> Option<TimerToken> {
        self.armed
    }

    /// True while `token` is the one currently armed. Does not consume it;
    /// repeating timers check this on every fire.
    pub fn matches(&self, token: TimerToken) -> bool {
        self.armed == Some(token)
    }

    /// Consumes the pending callback if `token` is current.
    pub fn accept(&mut self, token: TimerToken) -> bool {
        if self.matches(token) {
            self.armed = None;
            true
        } else {
            false
        }
    }
}
