//! Effects - side effects declared by the reducer

use std::time::Duration;

use crate::action::Action;

/// Task slots for scheduled follow-ups; a new timer replaces the old one
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Timer {
    Fetch,
    Card,
    Loading,
}

impl Timer {
    pub fn key(&self) -> &'static str {
        match self {
            Timer::Fetch => "fetch",
            Timer::Card => "card",
            Timer::Loading => "loading",
        }
    }
}

#[derive(Debug, Clone)]
pub enum Effect {
    /// Dispatch `action` once `after` has elapsed
    Schedule {
        timer: Timer,
        after: Duration,
        action: Action,
    },
    /// Fetch the icon-font stylesheet
    LoadIconFont { href: String },
}

impl Effect {
    pub fn schedule(timer: Timer, after_ms: u64, action: Action) -> Self {
        Effect::Schedule {
            timer,
            after: Duration::from_millis(after_ms),
            action,
        }
    }
}
