//! Module defining the domain types for directed money movements

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{ClientCode, Money, transaction::default_currency};

/// The closed set of transfer types produced by the upstream system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferType {
    SalaryIn,
    StipendIn,
    FamilyIn,
    CardIn,
    P2pOut,
    AtmWithdrawal,
    LoanPaymentOut,
    CcRepaymentOut,
    InstallmentPaymentOut,
    DepositTopupOut,
    DepositWithdrawIn,
    DepositFxTopupOut,
    DepositFxWithdrawIn,
    FxBuy,
    FxSell,
    InvestIn,
    InvestOut,
    GoldBuyOut,
    GoldSellIn,
}

impl TransferType {
    /// The direction implied by the type name, where one exists. FX trades and
    /// ATM withdrawals carry no implied direction.
    pub(crate) fn expected_direction(self) -> Option<Direction> {
        use TransferType::*;
        match self {
            SalaryIn | StipendIn | FamilyIn | CardIn | DepositWithdrawIn
            | DepositFxWithdrawIn | GoldSellIn | InvestIn => Some(Direction::In),
            P2pOut | LoanPaymentOut | CcRepaymentOut | InstallmentPaymentOut
            | DepositTopupOut | DepositFxTopupOut | GoldBuyOut | InvestOut => Some(Direction::Out),
            AtmWithdrawal | FxBuy | FxSell => None,
        }
    }

    /// FX-class operations regardless of direction.
    pub(crate) fn is_fx(self) -> bool {
        use TransferType::*;
        matches!(self, FxBuy | FxSell | DepositFxTopupOut | DepositFxWithdrawIn)
    }

    /// Accumulation intent: the customer moves money into saving vehicles.
    pub(crate) fn is_accumulation(self) -> bool {
        use TransferType::*;
        matches!(self, DepositTopupOut | DepositFxTopupOut | InvestIn)
    }

    /// Repayments indicating existing credit activity.
    pub(crate) fn is_credit_activity(self) -> bool {
        use TransferType::*;
        matches!(self, LoanPaymentOut | CcRepaymentOut | InstallmentPaymentOut)
    }

    /// Inbound income streams.
    pub(crate) fn is_income(self) -> bool {
        use TransferType::*;
        matches!(self, SalaryIn | StipendIn | FamilyIn | CardIn)
    }

    /// Deposit top-ups only, excluding brokerage inflows.
    pub(crate) fn is_deposit_topup(self) -> bool {
        use TransferType::*;
        matches!(self, DepositTopupOut | DepositFxTopupOut)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    In,
    Out,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::In => write!(f, "in"),
            Direction::Out => write!(f, "out"),
        }
    }
}

/// A directed money movement. `direction` must be consistent with the implied
/// direction of `kind`; see [`CustomerView::validate`](crate::CustomerView::validate).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transfer {
    pub client_code: ClientCode,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: TransferType,
    pub direction: Direction,
    pub amount: Money,
    #[serde(default = "default_currency")]
    pub currency: String,
}
