use rust_decimal::Decimal;

use crate::error::MortgageError;
use crate::types::{Money, Rate};
use crate::MortgageResult;

/// Amount financed: home price less down payment.
///
/// Hosts call this whenever either source field changes; nothing is cached.
pub fn derive_loan_amount(home_price: Money, down_payment: Money) -> MortgageResult<Money> {
    if home_price < Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "home_price".into(),
            reason: "Home price cannot be negative".into(),
        });
    }
    if down_payment < Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "down_payment".into(),
            reason: "Down payment cannot be negative".into(),
        });
    }
    if down_payment > home_price {
        return Err(MortgageError::InvalidInput {
            field: "down_payment".into(),
            reason: format!("Down payment {down_payment} exceeds home price {home_price}"),
        });
    }
    Ok(home_price - down_payment)
}

/// Fraction of the price paid up front (0.2 = 20% down).
pub fn down_payment_ratio(home_price: Money, down_payment: Money) -> MortgageResult<Rate> {
    derive_loan_amount(home_price, down_payment)?;
    if home_price.is_zero() {
        return Err(MortgageError::InvalidInput {
            field: "home_price".into(),
            reason: "Home price must be positive".into(),
        });
    }
    Ok(down_payment / home_price)
}
