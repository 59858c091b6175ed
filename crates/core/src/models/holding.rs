use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A configured mutual-fund position.
///
/// `name` is the free-text query sent to the scheme search endpoint, so it
/// should read like the fund's marketed name (e.g., "SBI Contra Fund").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundHolding {
    /// Fund display name, also used as the search query
    pub name: String,

    /// Amount paid for the position, in the display currency
    pub invested_amount: Decimal,

    /// Units allotted at purchase
    pub units_held: Decimal,
}

impl FundHolding {
    pub fn new(name: impl Into<String>, invested_amount: Decimal, units_held: Decimal) -> Self {
        Self {
            name: name.into(),
            invested_amount,
            units_held,
        }
    }
}
