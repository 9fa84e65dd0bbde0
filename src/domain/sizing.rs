//! The order-sizing rule evaluated once per consolidated bar.
//!
//! A fixed decision table keyed on the held quantity's offset from the
//! cash-derived target. The offsets are scenario checkpoints, not a tunable
//! trading rule, so they stay as local constants. All arithmetic is exact
//! decimal: the table compares equality against fractional offsets and binary
//! floats would miss them.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Incremental buy placed when the holding sits exactly at target.
const STEP_TENTH: Decimal = dec!(0.1);
/// Smaller follow-up buy at target + 0.1.
const STEP_HUNDREDTH: Decimal = dec!(0.01);
/// Partial reduction at target + 0.11.
const STEP_REDUCE: Decimal = dec!(-0.02);
/// Holding offset that triggers the terminal expected-failure branch.
const OFFSET_FAILURE: Decimal = dec!(0.09);
/// Offset reached after the first incremental buy.
const OFFSET_TENTH: Decimal = dec!(0.1);
/// Offset reached after the second incremental buy.
const OFFSET_ELEVEN: Decimal = dec!(0.11);
/// Final tiny buy submitted on the failure branch.
const STEP_FINAL: Decimal = dec!(0.001);
/// Over-leveraged holdings weight submitted on the failure branch; execution
/// is expected to reject both signs of it.
const FAILURE_WEIGHT: Decimal = dec!(2.0);

/// One order request produced by the rule.
#[derive(Debug, Clone, PartialEq)]
pub enum SizingAction {
    /// Signed-quantity market order.
    Market { quantity: Decimal },
    /// Set total holdings to `weight` times portfolio value.
    SetHoldings { weight: Decimal },
}

/// The rule's verdict for one bar: zero, one, or three order requests, plus
/// an optional run-termination signal.
#[derive(Debug, Clone, PartialEq)]
pub struct SizingDecision {
    pub actions: Vec<SizingAction>,
    pub halt: bool,
}

impl SizingDecision {
    fn none() -> Self {
        SizingDecision {
            actions: Vec::new(),
            halt: false,
        }
    }

    fn order(quantity: Decimal) -> Self {
        SizingDecision {
            actions: vec![SizingAction::Market { quantity }],
            halt: false,
        }
    }
}

/// Baseline order size from available cash and the bar value.
///
/// The `+ 1` on the absolute price keeps the divisor at least one, so the
/// function is total even at zero or negative prices; flooring yields a
/// whole-unit quantity.
pub fn target_quantity(cash: Decimal, price: Decimal) -> Decimal {
    (cash / (price.abs() + Decimal::ONE)).floor()
}

/// Evaluate the decision table for one consolidated bar. First match wins.
///
/// Deterministic in its four inputs, no side effects; the caller owns order
/// submission and the halt.
pub fn evaluate(cash: Decimal, price: Decimal, held: Decimal, invested: bool) -> SizingDecision {
    let target = target_quantity(cash, price);

    if !invested {
        return SizingDecision::order(target);
    }
    if held == target {
        return SizingDecision::order(STEP_TENTH);
    }
    if held == target + OFFSET_TENTH {
        return SizingDecision::order(STEP_HUNDREDTH);
    }
    if held == target + OFFSET_ELEVEN {
        return SizingDecision::order(STEP_REDUCE);
    }
    if held == target + OFFSET_FAILURE {
        // Terminal branch: the leveraged holdings requests are expected to be
        // rejected downstream, and the run stops here either way.
        return SizingDecision {
            actions: vec![
                SizingAction::Market { quantity: STEP_FINAL },
                SizingAction::SetHoldings { weight: -FAILURE_WEIGHT },
                SizingAction::SetHoldings { weight: FAILURE_WEIGHT },
            ],
            halt: true,
        };
    }
    SizingDecision::none()
}
