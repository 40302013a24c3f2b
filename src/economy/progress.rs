//! Experience, levels, and the daily attendance bonus.
use bevy::prelude::*;

pub const EXP_PER_LEVEL: i64 = 100;
pub const DAILY_BONUS_EXP: i64 = 50;

#[derive(Resource, Debug, Clone, Default)]
pub struct Progress {
    exp: i64,
    last_visit_day: Option<i64>,
}

impl Progress {
    pub fn new(exp: i64, last_visit_day: Option<i64>) -> Self {
        Self {
            exp: exp.max(0),
            last_visit_day,
        }
    }

    pub fn exp(&self) -> i64 {
        self.exp
    }

    pub fn last_visit_day(&self) -> Option<i64> {
        self.last_visit_day
    }

    pub fn level(&self) -> i64 {
        self.exp / EXP_PER_LEVEL + 1
    }

    /// Fill fraction of the HUD level bar.
    pub fn level_ratio(&self) -> f32 {
        (self.exp % EXP_PER_LEVEL) as f32 / EXP_PER_LEVEL as f32
    }

    pub fn grant_exp(&mut self, amount: i64) {
        self.exp += amount.max(0);
    }

    /// Grants the attendance bonus on the first visit of a UTC day.
    /// Returns whether the bonus was granted.
    pub fn register_visit(&mut self, day: i64) -> bool {
        if self.last_visit_day == Some(day) {
            return false;
        }
        self.last_visit_day = Some(day);
        self.grant_exp(DAILY_BONUS_EXP);
        true
    }
}
