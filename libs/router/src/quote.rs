//! Liquidity-weighted market price across candidate routes.
//!
//! Routes with more start-token liquidity pull the quote harder; thin and
//! unpriceable routes fall below the liquidity floor and are skipped.

use ethers_core::types::Address;
use rust_decimal::Decimal;
use tracing::debug;

use amm::Route;

use crate::error::QuoteError;

/// Routes holding less than one whole token are ignored by default
pub const DEFAULT_MIN_LIQUIDITY: Decimal = Decimal::ONE;

/// Price of `base` in terms of the routes' end token, weighted by each
/// route's start-token liquidity bound
pub fn weighted_price(
    base: Address,
    quote: Address,
    routes: &[Route],
    min_liquidity: Decimal,
) -> Result<Decimal, QuoteError> {
    let mut quotient = Decimal::ZERO;
    let mut total_liquidity = Decimal::ZERO;

    for route in routes {
        let liquidity = route.liquidity_bound(base)?;
        if liquidity < min_liquidity {
            debug!(hops = route.len(), %liquidity, "route below liquidity floor, skipping");
            continue;
        }
        quotient += route.spot_price(base)? * liquidity;
        total_liquidity += liquidity;
    }

    if total_liquidity.is_zero() {
        return Err(QuoteError::InsufficientLiquidity { base, quote });
    }

    Ok(quotient / total_liquidity)
}
