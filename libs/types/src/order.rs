//! Swap intent normalization.
//!
//! An [`Order`] is the immutable value object handed to the solver: exact
//! input or exact output, both sides quantized to their token's precision,
//! plus the slippage ratio the solver uses as its risk ceiling. Construction
//! resolves the four allowed combinations of user-supplied amounts into one
//! of the two variants; when the caller supplies both an amount and its
//! paired bound, the slippage ratio is re-derived from them so the solver
//! always prices risk off the order's actual bounds.

use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::OrderError;
use crate::token::TokenRef;

/// Default slippage tolerance when the caller supplies none (0.5%)
pub const DEFAULT_SLIPPAGE: Decimal = dec!(0.005);

/// Swap a fixed input amount for at least `min_amount_out`
#[derive(Debug, Clone, PartialEq)]
pub struct ExactInOrder {
    pub have: TokenRef,
    pub want: TokenRef,
    pub amount_in: Decimal,
    pub min_amount_out: Decimal,
    pub slippage: Decimal,
}

/// Swap at most `max_amount_in` for a fixed output amount
#[derive(Debug, Clone, PartialEq)]
pub struct ExactOutOrder {
    pub have: TokenRef,
    pub want: TokenRef,
    pub max_amount_in: Decimal,
    pub amount_out: Decimal,
    pub slippage: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Order {
    ExactIn(ExactInOrder),
    ExactOut(ExactOutOrder),
}

impl ExactInOrder {
    pub fn new(
        have: TokenRef,
        want: TokenRef,
        amount_in: Decimal,
        min_amount_out: Decimal,
        slippage: Decimal,
    ) -> Result<Self, OrderError> {
        let amount_in = check_positive("amount_in", have.quantize(amount_in))?;
        let min_amount_out = check_positive("min_amount_out", want.quantize(min_amount_out))?;
        check_slippage(slippage)?;
        Ok(Self {
            have,
            want,
            amount_in,
            min_amount_out,
            slippage,
        })
    }

    /// Worst acceptable execution price, in want per have
    pub fn min_price(&self) -> Decimal {
        self.min_amount_out / self.amount_in
    }
}

impl ExactOutOrder {
    pub fn new(
        have: TokenRef,
        want: TokenRef,
        max_amount_in: Decimal,
        amount_out: Decimal,
        slippage: Decimal,
    ) -> Result<Self, OrderError> {
        let max_amount_in = check_positive("max_amount_in", have.quantize(max_amount_in))?;
        let amount_out = check_positive("amount_out", want.quantize(amount_out))?;
        check_slippage(slippage)?;
        Ok(Self {
            have,
            want,
            max_amount_in,
            amount_out,
            slippage,
        })
    }

    /// Worst acceptable execution price, in want per have
    pub fn min_price(&self) -> Decimal {
        self.amount_out / self.max_amount_in
    }
}

impl Order {
    pub fn have(&self) -> &TokenRef {
        match self {
            Order::ExactIn(order) => &order.have,
            Order::ExactOut(order) => &order.have,
        }
    }

    pub fn want(&self) -> &TokenRef {
        match self {
            Order::ExactIn(order) => &order.want,
            Order::ExactOut(order) => &order.want,
        }
    }

    pub fn slippage(&self) -> Decimal {
        match self {
            Order::ExactIn(order) => order.slippage,
            Order::ExactOut(order) => order.slippage,
        }
    }

    pub fn min_price(&self) -> Decimal {
        match self {
            Order::ExactIn(order) => order.min_price(),
            Order::ExactOut(order) => order.min_price(),
        }
    }

    pub fn is_exact_in(&self) -> bool {
        matches!(self, Order::ExactIn(_))
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Order::ExactIn(order) => write!(
                f,
                "swap {:.3} of {} for at least {:.3} of {} @ {:.5}",
                order.amount_in,
                order.have.address,
                order.min_amount_out,
                order.want.address,
                order.min_price(),
            ),
            Order::ExactOut(order) => write!(
                f,
                "swap at most {:.3} of {} for {:.3} of {} @ {:.5}",
                order.max_amount_in,
                order.have.address,
                order.amount_out,
                order.want.address,
                order.min_price(),
            ),
        }
    }
}

/// User-supplied amounts for [`create_order`]. Exactly one of
/// `amount_in`/`amount_out` must be set; the paired bound and the slippage
/// tolerance are optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderRequest {
    pub amount_in: Option<Decimal>,
    pub amount_out: Option<Decimal>,
    pub max_amount_in: Option<Decimal>,
    pub min_amount_out: Option<Decimal>,
    pub slippage: Option<Decimal>,
}

/// Resolve an [`OrderRequest`] against the current market price (want per
/// have) into a normalized [`Order`].
///
/// When the paired bound is omitted it is derived from `market_price` and the
/// slippage tolerance. When it is supplied, the slippage ratio is instead
/// derived from the implied price so it reflects the order's actual bounds.
pub fn create_order(
    have: TokenRef,
    want: TokenRef,
    request: OrderRequest,
    market_price: Decimal,
) -> Result<Order, OrderError> {
    if request.amount_in.is_some() && request.amount_out.is_some() {
        return Err(OrderError::AmbiguousAmountSpec {
            first: "amount_in",
            second: "amount_out",
        });
    }
    if request.amount_in.is_some() && request.max_amount_in.is_some() {
        return Err(OrderError::AmbiguousAmountSpec {
            first: "amount_in",
            second: "max_amount_in",
        });
    }
    if request.amount_out.is_some() && request.min_amount_out.is_some() {
        return Err(OrderError::AmbiguousAmountSpec {
            first: "amount_out",
            second: "min_amount_out",
        });
    }
    let market_price = check_positive("market_price", market_price)?;
    let slippage = request.slippage.unwrap_or(DEFAULT_SLIPPAGE);

    if let Some(amount_out) = request.amount_out {
        let amount_out = check_positive("amount_out", want.quantize(amount_out))?;

        let (max_amount_in, slippage) = match request.max_amount_in {
            None => {
                check_slippage(slippage)?;
                let min_price = market_price * (Decimal::ONE - slippage);
                (amount_out / min_price, slippage)
            }
            Some(max_amount_in) => {
                let max_amount_in = check_positive("max_amount_in", have.quantize(max_amount_in))?;
                let implied_price = amount_out / max_amount_in;
                (max_amount_in, (market_price - implied_price) / market_price)
            }
        };

        Ok(Order::ExactOut(ExactOutOrder::new(
            have,
            want,
            max_amount_in,
            amount_out,
            slippage,
        )?))
    } else if let Some(amount_in) = request.amount_in {
        let amount_in = check_positive("amount_in", have.quantize(amount_in))?;

        let (min_amount_out, slippage) = match request.min_amount_out {
            None => {
                check_slippage(slippage)?;
                let min_price = market_price * (Decimal::ONE - slippage);
                (amount_in * min_price, slippage)
            }
            Some(min_amount_out) => {
                let min_amount_out =
                    check_positive("min_amount_out", want.quantize(min_amount_out))?;
                let implied_price = min_amount_out / amount_in;
                (min_amount_out, (market_price - implied_price) / market_price)
            }
        };

        Ok(Order::ExactIn(ExactInOrder::new(
            have,
            want,
            amount_in,
            min_amount_out,
            slippage,
        )?))
    } else {
        Err(OrderError::MissingAmount)
    }
}

fn check_positive(field: &'static str, value: Decimal) -> Result<Decimal, OrderError> {
    if value <= Decimal::ZERO {
        return Err(OrderError::NonPositiveAmount { field, value });
    }
    Ok(value)
}

fn check_slippage(slippage: Decimal) -> Result<(), OrderError> {
    if slippage <= Decimal::ZERO || slippage >= Decimal::ONE {
        return Err(OrderError::SlippageOutOfRange { value: slippage });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers_core::types::Address;

    fn have() -> TokenRef {
        TokenRef::new(Address::from_low_u64_be(0xAA), 18)
    }

    fn want() -> TokenRef {
        TokenRef::new(Address::from_low_u64_be(0xBB), 6)
    }

    #[test]
    fn both_amounts_is_ambiguous() {
        let request = OrderRequest {
            amount_in: Some(dec!(1)),
            amount_out: Some(dec!(1)),
            ..Default::default()
        };
        assert_eq!(
            create_order(have(), want(), request, dec!(2)),
            Err(OrderError::AmbiguousAmountSpec {
                first: "amount_in",
                second: "amount_out",
            })
        );
    }

    #[test]
    fn no_amount_is_rejected() {
        let request = OrderRequest::default();
        assert_eq!(
            create_order(have(), want(), request, dec!(2)),
            Err(OrderError::MissingAmount)
        );
    }

    #[test]
    fn exact_in_derives_bound_from_market_price() {
        let request = OrderRequest {
            amount_in: Some(dec!(10)),
            slippage: Some(dec!(0.01)),
            ..Default::default()
        };
        let order = create_order(have(), want(), request, dec!(2)).unwrap();
        match order {
            Order::ExactIn(order) => {
                // 10 * 2 * (1 - 0.01) = 19.8
                assert_eq!(order.min_amount_out, dec!(19.8));
                assert_eq!(order.slippage, dec!(0.01));
            }
            Order::ExactOut(_) => panic!("expected exact-in"),
        }
    }

    #[test]
    fn exact_in_derives_slippage_from_bound() {
        let request = OrderRequest {
            amount_in: Some(dec!(10)),
            min_amount_out: Some(dec!(19)),
            ..Default::default()
        };
        let order = create_order(have(), want(), request, dec!(2)).unwrap();
        // implied price 1.9 against market 2.0 -> 5% slippage
        assert_eq!(order.slippage(), dec!(0.05));
    }

    #[test]
    fn exact_out_derives_bound_from_market_price() {
        let request = OrderRequest {
            amount_out: Some(dec!(20)),
            slippage: Some(dec!(0.05)),
            ..Default::default()
        };
        let order = create_order(have(), want(), request, dec!(2)).unwrap();
        match order {
            Order::ExactOut(order) => {
                // 20 / (2 * 0.95) = 10.526315... truncated to 18 decimals
                assert!(order.max_amount_in > dec!(10.52));
                assert!(order.max_amount_in < dec!(10.53));
            }
            Order::ExactIn(_) => panic!("expected exact-out"),
        }
    }

    #[test]
    fn bound_implying_negative_slippage_is_rejected() {
        // min_amount_out above market value implies slippage <= 0
        let request = OrderRequest {
            amount_in: Some(dec!(10)),
            min_amount_out: Some(dec!(21)),
            ..Default::default()
        };
        assert!(matches!(
            create_order(have(), want(), request, dec!(2)),
            Err(OrderError::SlippageOutOfRange { .. })
        ));
    }

    #[test]
    fn amounts_are_quantized_to_token_precision() {
        let request = OrderRequest {
            amount_in: Some(dec!(1.1234567890123456789012)),
            slippage: Some(dec!(0.005)),
            ..Default::default()
        };
        let order = create_order(have(), want(), request, dec!(1)).unwrap();
        match order {
            Order::ExactIn(order) => {
                assert_eq!(order.amount_in.scale(), 18);
                // want side is quantized to 6 decimals
                assert!(order.min_amount_out.scale() <= 6);
            }
            Order::ExactOut(_) => panic!("expected exact-in"),
        }
    }
}
