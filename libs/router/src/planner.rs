//! High-level facade tying index, quoting, solving and compilation together.

use rust_decimal::Decimal;
use tracing::warn;

use codec::Plan;
use ethers_core::types::Address;
use types::{create_order, Order, OrderRequest, TokenRef};

use crate::compiler::{compile, CompileOptions};
use crate::config::Deployments;
use crate::error::PlannerError;
use crate::index::{PoolIndex, RouteSource};
use crate::quote::{weighted_price, DEFAULT_MIN_LIQUIDITY};
use crate::solver::{solve, Solution};

/// Route-discovery depth used when the caller does not care; deeper searches
/// explode combinatorially on dense indexes
pub const DEFAULT_ROUTE_DEPTH: usize = 2;

pub struct SwapPlanner {
    index: PoolIndex,
    deployments: Deployments,
}

impl SwapPlanner {
    pub fn new(index: PoolIndex, deployments: Deployments) -> Self {
        Self { index, deployments }
    }

    pub fn index(&self) -> &PoolIndex {
        &self.index
    }

    /// Mutable index access for snapshot refreshes
    pub fn index_mut(&mut self) -> &mut PoolIndex {
        &mut self.index
    }

    pub fn deployments(&self) -> &Deployments {
        &self.deployments
    }

    /// Liquidity-weighted market price of `base` in `quote` terms
    pub fn price(&self, base: Address, quote: Address) -> Result<Decimal, PlannerError> {
        let routes = self.index.find_routes(base, quote, DEFAULT_ROUTE_DEPTH);
        Ok(weighted_price(base, quote, &routes, DEFAULT_MIN_LIQUIDITY)?)
    }

    /// Resolve a request into a normalized order against the current market
    pub fn create_order(
        &self,
        have: TokenRef,
        want: TokenRef,
        request: OrderRequest,
    ) -> Result<Order, PlannerError> {
        let market_price = self.price(have.address, want.address)?;
        Ok(create_order(have, want, request, market_price)?)
    }

    /// Solve an order over the index's current candidate routes
    pub fn solve(&self, order: &Order) -> Result<Solution, PlannerError> {
        let routes = self.index.find_routes(
            order.have().address,
            order.want().address,
            DEFAULT_ROUTE_DEPTH,
        );
        Ok(solve(order, &routes)?)
    }

    /// Solve and compile in one step
    pub fn plan(&self, order: &Order, options: CompileOptions) -> Result<Plan, PlannerError> {
        if let Ok(market_price) = self.price(order.have().address, order.want().address) {
            if order.min_price() > market_price {
                // Feedback only; the solver decides feasibility
                warn!(
                    min_price = %order.min_price(),
                    %market_price,
                    "order min price above market, solve may fail"
                );
            }
        }

        let solution = self.solve(order)?;
        Ok(compile(order, &solution, options)?)
    }
}
