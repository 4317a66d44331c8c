use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::calculator::FinancialCalculations;
use crate::types::Money;

/// Headline classification of a month's net profit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProfitStatus {
    Profit,
    Loss,
    BreakEven,
}

impl ProfitStatus {
    /// Exact zero is break-even; any other value, however small, is a
    /// profit or a loss.
    pub fn from_net_profit(net_profit: Money) -> Self {
        match net_profit.cmp(&Decimal::ZERO) {
            std::cmp::Ordering::Greater => ProfitStatus::Profit,
            std::cmp::Ordering::Less => ProfitStatus::Loss,
            std::cmp::Ordering::Equal => ProfitStatus::BreakEven,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProfitStatus::Profit => "Profit",
            ProfitStatus::Loss => "Loss",
            ProfitStatus::BreakEven => "Break Even",
        }
    }
}

impl fmt::Display for ProfitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FinancialCalculations {
    pub fn profit_status(&self) -> ProfitStatus {
        ProfitStatus::from_net_profit(self.net_profit)
    }
}
