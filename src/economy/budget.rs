//! Spending penalty model: converts 원 spent into 냥 lost.
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Numerator of the penalty formula; spending the whole monthly usable
/// budget costs 6000냥 regardless of how large that budget is.
pub const PENALTY_SCALE: f64 = 6000.0;

/// Share of income set aside before the usable budget is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SavingLevel {
    #[default]
    Low,
    Medium,
    High,
}

impl SavingLevel {
    pub fn ratio(self) -> f64 {
        match self {
            SavingLevel::Low => 0.2,
            SavingLevel::Medium => 0.3,
            SavingLevel::High => 0.4,
        }
    }
}

/// Budget profile captured at onboarding. Amounts are in 원.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSetup {
    pub income: i64,
    pub fixed_expenditure: i64,
    pub saving_level: SavingLevel,
}

impl Default for UserSetup {
    fn default() -> Self {
        Self {
            income: 2_500_000,
            fixed_expenditure: 1_000_000,
            saving_level: SavingLevel::Low,
        }
    }
}

impl UserSetup {
    pub fn penalty_for(&self, spend_amount: i64) -> Option<i64> {
        calc_penalty(
            spend_amount,
            self.income,
            self.fixed_expenditure,
            self.saving_level.ratio(),
        )
    }
}

/// `None` means the penalty cannot be computed (usable budget is zero or
/// negative); callers show "no penalty", never zero.
pub fn calc_penalty(
    spend_amount: i64,
    income: i64,
    fixed_expense: i64,
    saving_ratio: f64,
) -> Option<i64> {
    let usable_budget = income as f64 * (1.0 - saving_ratio) - fixed_expense as f64;
    if usable_budget <= 0.0 {
        return None;
    }
    Some((PENALTY_SCALE / usable_budget * spend_amount as f64).round() as i64)
}

/// HUD preview band for a computed penalty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PenaltySeverity {
    Gentle,
    Warning,
    Severe,
}

impl PenaltySeverity {
    pub fn classify(penalty: i64) -> Self {
        if penalty <= 30 {
            PenaltySeverity::Gentle
        } else if penalty <= 100 {
            PenaltySeverity::Warning
        } else {
            PenaltySeverity::Severe
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            PenaltySeverity::Gentle => "좋은 소비 습관이에요!",
            PenaltySeverity::Warning => "조금만 아껴보면 어때요?",
            PenaltySeverity::Severe => "이러다 통장이 털려요…!",
        }
    }
}

/// One committed spend, penalty included so history renders without
/// recomputing against a setup that may have changed since.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpendingRecord {
    pub amount: i64,
    pub penalty: Option<i64>,
    pub recorded_at_ms: i64,
}

#[derive(Resource, Debug, Default, Clone)]
pub struct SpendingLedger {
    records: Vec<SpendingRecord>,
}

impl SpendingLedger {
    pub fn from_records(records: Vec<SpendingRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[SpendingRecord] {
        &self.records
    }

    pub fn push(&mut self, record: SpendingRecord) {
        self.records.push(record);
    }
}

/// Amount the player is lining up in the HUD before committing it.
#[derive(Resource, Debug, Default)]
pub struct PendingSpend {
    amount: i64,
}

impl PendingSpend {
    pub fn amount(&self) -> i64 {
        self.amount
    }

    pub fn adjust(&mut self, delta: i64) {
        self.amount = (self.amount + delta).max(0);
    }

    pub fn take(&mut self) -> i64 {
        std::mem::take(&mut self.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_budget_charges_sixty_nyang_for_ten_thousand_won() {
        // income 2.5M, fixed 1M, low saving: usable = 1M, so 6000/1M × 10000.
        let penalty = calc_penalty(10_000, 2_500_000, 1_000_000, 0.2);
        assert_eq!(penalty, Some(60));
    }

    #[test]
    fn default_setup_matches_the_reference_budget() {
        assert_eq!(UserSetup::default().penalty_for(10_000), Some(60));
    }

    #[test]
    fn unusable_budget_yields_no_penalty_rather_than_zero() {
        assert_eq!(calc_penalty(10_000, 1_000_000, 1_000_000, 0.2), None);
        assert_eq!(calc_penalty(10_000, 500_000, 1_000_000, 0.4), None);
    }

    #[test]
    fn penalties_round_to_the_nearest_nyang() {
        // 6000/1M × 125 = 0.75 rounds up.
        assert_eq!(calc_penalty(125, 2_500_000, 1_000_000, 0.2), Some(1));
        // 6000/1M × 74 = 0.444 rounds down.
        assert_eq!(calc_penalty(74, 2_500_000, 1_000_000, 0.2), Some(0));
    }

    #[test]
    fn severity_bands_split_at_thirty_and_one_hundred() {
        assert_eq!(PenaltySeverity::classify(30), PenaltySeverity::Gentle);
        assert_eq!(PenaltySeverity::classify(31), PenaltySeverity::Warning);
        assert_eq!(PenaltySeverity::classify(100), PenaltySeverity::Warning);
        assert_eq!(PenaltySeverity::classify(101), PenaltySeverity::Severe);
    }

    #[test]
    fn pending_spend_never_goes_negative() {
        let mut pending = PendingSpend::default();
        pending.adjust(-1_000);
        assert_eq!(pending.amount(), 0);
        pending.adjust(3_000);
        pending.adjust(-1_000);
        assert_eq!(pending.amount(), 2_000);
        assert_eq!(pending.take(), 2_000);
        assert_eq!(pending.amount(), 0);
    }
}
