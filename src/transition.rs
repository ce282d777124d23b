//! Two-phase show/hide sequences.
//!
//! A transition first changes visibility, then settles once a scheduled
//! follow-up arrives. Every phase change bumps the epoch; follow-ups carry
//! the epoch they were scheduled under and are ignored once it is stale.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum Visibility {
    #[default]
    Hidden,
    /// Laid out but not yet faded in
    Entering,
    Visible,
    /// Fading out, still laid out
    Leaving,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Transition {
    pub visibility: Visibility,
    pub epoch: u64,
}

impl Transition {
    pub fn is_hidden(&self) -> bool {
        self.visibility == Visibility::Hidden
    }

    pub fn is_visible(&self) -> bool {
        self.visibility == Visibility::Visible
    }

    /// Shown but not fully opaque
    pub fn is_fading(&self) -> bool {
        matches!(self.visibility, Visibility::Entering | Visibility::Leaving)
    }

    /// Phase one of a fade-in; returns the epoch to settle with
    pub fn begin_show(&mut self) -> u64 {
        self.visibility = Visibility::Entering;
        self.bump()
    }

    pub fn settle_show(&mut self, epoch: u64) -> bool {
        if epoch != self.epoch || self.visibility != Visibility::Entering {
            return false;
        }
        self.visibility = Visibility::Visible;
        true
    }

    /// Phase one of a fade-out; returns the epoch to settle with
    pub fn begin_hide(&mut self) -> u64 {
        self.visibility = Visibility::Leaving;
        self.bump()
    }

    pub fn settle_hide(&mut self, epoch: u64) -> bool {
        if epoch != self.epoch || self.visibility != Visibility::Leaving {
            return false;
        }
        self.visibility = Visibility::Hidden;
        true
    }

    /// Single-phase show, invalidating any pending follow-up
    pub fn show_now(&mut self) {
        self.visibility = Visibility::Visible;
        self.bump();
    }

    fn bump(&mut self) -> u64 {
        self.epoch = self.epoch.wrapping_add(1);
        self.epoch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_settles_with_current_epoch() {
        let mut t = Transition::default();
        let epoch = t.begin_show();
        assert!(t.is_fading());
        assert!(t.settle_show(epoch));
        assert!(t.is_visible());
    }

    #[test]
    fn test_stale_hide_is_ignored_after_reshow() {
        let mut t = Transition::default();
        t.show_now();
        let stale = t.begin_hide();
        let fresh = t.begin_show();

        assert!(!t.settle_hide(stale));
        assert_eq!(t.visibility, Visibility::Entering);
        assert!(t.settle_show(fresh));
        assert!(t.is_visible());
    }

    #[test]
    fn test_show_now_invalidates_pending_hide() {
        let mut t = Transition::default();
        t.show_now();
        let epoch = t.begin_hide();
        t.show_now();
        assert!(!t.settle_hide(epoch));
        assert!(t.is_visible());
    }

    #[test]
    fn test_settle_requires_matching_phase() {
        let mut t = Transition::default();
        let epoch = t.begin_hide();
        assert!(!t.settle_show(epoch));
        assert!(t.settle_hide(epoch));
        assert!(t.is_hidden());
        assert!(!t.settle_hide(epoch));
    }
}
