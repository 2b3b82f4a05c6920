//! Solution -> Plan compilation.
//!
//! One swap command per allocation, opcode chosen by the route's homogeneous
//! pool family. Per-route amounts scale the order totals by each allocation's
//! fraction; the derived output bound is additionally discounted by the
//! route's cumulative fee since every hop's AMM fee is shaved off what
//! arrives at the final hop. Compilation is all-or-nothing: any failure
//! aborts the whole plan.

use ethers_core::types::{Address, U256};
use rust_decimal::Decimal;
use tracing::{debug, info};

use amm::{AmmPool, PoolProtocol, Route};
use codec::{Command, Plan, TieredPath};
use types::{Order, TokenRef, MSG_SENDER};

use crate::error::CompileError;
use crate::solver::Solution;

/// Compilation knobs; the defaults execute to the caller's own address with
/// the user paying inputs from their wallet
#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    /// Recipient of swap outputs; `None` means the caller (sentinel address)
    pub recipient: Option<Address>,
    /// Whether inputs are pulled from the user (true) or the interpreter's
    /// own balance (false)
    pub payer_is_user: Option<bool>,
    /// Pre-built, pre-signed permit step to place first; never created or
    /// validated here
    pub permit: Option<Command>,
}

/// Compile a solved order into an executable plan
pub fn compile(
    order: &Order,
    solution: &Solution,
    options: CompileOptions,
) -> Result<Plan, CompileError> {
    if solution.is_empty() {
        return Err(CompileError::EmptySolution);
    }

    let recipient = options.recipient.unwrap_or(MSG_SENDER);
    let payer_is_user = options.payer_is_user.unwrap_or(true);

    let mut plan = Plan::new();
    if let Some(permit) = options.permit {
        plan.add(permit);
    }

    let last = solution.len() - 1;
    let mut exact_acc = Decimal::ZERO;

    for (index, allocation) in solution.iter().enumerate() {
        let route = allocation.route();
        let fraction = allocation.fraction();
        let protocol = route
            .protocol()
            .ok_or_else(|| heterogeneous(route))?;

        let command = match order {
            Order::ExactIn(order) => {
                // Exact side reconciles into the final route so the inputs
                // sum to precisely the order's amount
                let amount_in = if index == last {
                    order.amount_in - exact_acc
                } else {
                    order.have.quantize(order.amount_in * fraction)
                };
                exact_acc += amount_in;

                let min_out = order.want.quantize(
                    order.min_amount_out * fraction * (Decimal::ONE - route.cumulative_fee()),
                );
                debug!(%amount_in, %min_out, hops = route.len(), "compiling exact-in route");

                match protocol {
                    PoolProtocol::ConstantProduct => Command::v2_swap_exact_in(
                        recipient,
                        to_wire(&order.have, amount_in)?,
                        to_wire(&order.want, min_out)?,
                        route.tokens(order.have.address)?,
                        payer_is_user,
                    ),
                    PoolProtocol::Concentrated => Command::v3_swap_exact_in(
                        recipient,
                        to_wire(&order.have, amount_in)?,
                        to_wire(&order.want, min_out)?,
                        tiered_path(route, order.have.address)?,
                        payer_is_user,
                    ),
                }
            }
            Order::ExactOut(order) => {
                let amount_out = if index == last {
                    order.amount_out - exact_acc
                } else {
                    order.want.quantize(order.amount_out * fraction)
                };
                exact_acc += amount_out;

                let max_in = order.have.quantize(order.max_amount_in * fraction);
                debug!(%amount_out, %max_in, hops = route.len(), "compiling exact-out route");

                match protocol {
                    PoolProtocol::ConstantProduct => Command::v2_swap_exact_out(
                        recipient,
                        to_wire(&order.want, amount_out)?,
                        to_wire(&order.have, max_in)?,
                        route.tokens(order.have.address)?,
                        payer_is_user,
                    ),
                    PoolProtocol::Concentrated => Command::v3_swap_exact_out(
                        recipient,
                        to_wire(&order.want, amount_out)?,
                        to_wire(&order.have, max_in)?,
                        tiered_path(route, order.have.address)?,
                        payer_is_user,
                    ),
                }
            }
        };

        plan.add(command);
    }

    info!(steps = plan.len(), "plan compiled");
    Ok(plan)
}

/// Locate the first hop whose family disagrees with the route head
fn heterogeneous(route: &Route) -> CompileError {
    let pools = route.pools();
    let head = pools[0].protocol();
    let position = pools
        .iter()
        .position(|pool| pool.protocol() != head)
        .unwrap_or(0);
    CompileError::HeterogeneousRoute { position }
}

/// Human-unit amount -> wire integer in the token's base units
fn to_wire(token: &TokenRef, amount: Decimal) -> Result<U256, CompileError> {
    token
        .to_base_units(amount)
        .map(U256::from)
        .ok_or(CompileError::AmountOverflow { amount })
}

/// Fee-tiered packed path for concentrated routes
fn tiered_path(route: &Route, start: Address) -> Result<TieredPath, CompileError> {
    let tokens = route.tokens(start)?;
    let hops = route
        .pools()
        .iter()
        .zip(tokens.iter().skip(1))
        .map(|(pool, token)| (pool.fee(), *token))
        .collect();
    Ok(TieredPath::new(start, hops))
}
