//! Flow-based swap solver.
//!
//! The order's demand is normalized to integer base units of its exact-side
//! token, every candidate route contributes one graph edge per hop (keyed by
//! pool identity, capacity from depth at the order's slippage, weight from
//! realized price impact), min-cost flow splits the demand, and worklist
//! path-stripping decomposes the per-edge flows back into ordered per-route
//! allocations whose fractions sum to exactly one.

use std::collections::HashMap;

use ethers_core::types::Address;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use amm::{AmmPool, Pool, PoolError, Route};
use types::{Order, TokenRef};

use crate::error::SolverError;
use crate::flow::MinCostFlow;

/// Graph capacities above this are clamped; they are already far beyond any
/// order the integer scale can express
const CAPACITY_CLAMP: i128 = i128::MAX / 4;

/// One route's share of the order
#[derive(Debug, Clone, PartialEq)]
pub struct RouteAllocation {
    route: Route,
    fraction: Decimal,
    amount: Decimal,
}

impl RouteAllocation {
    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Share of the order's exact-side amount, in (0, 1]
    pub fn fraction(&self) -> Decimal {
        self.fraction
    }

    /// Absolute amount in the exact-side token's human units
    pub fn amount(&self) -> Decimal {
        self.amount
    }
}

/// Immutable per-route allocation of one solved order; fractions sum to
/// exactly one, with integer rounding absorbed into the final route
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    allocations: Vec<RouteAllocation>,
}

impl Solution {
    pub fn allocations(&self) -> &[RouteAllocation] {
        &self.allocations
    }

    pub fn len(&self) -> usize {
        self.allocations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.allocations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RouteAllocation> {
        self.allocations.iter()
    }
}

/// Split `order` across `routes`, minimizing realized price impact.
///
/// Exact-output orders solve the reversed problem - endpoints swapped and
/// routes walked backwards - and the resulting routes are flipped back to
/// execution order before they are returned.
pub fn solve(order: &Order, routes: &[Route]) -> Result<Solution, SolverError> {
    let (unit, start, end, demand, reversed) = match order {
        Order::ExactIn(order) => (
            order.have,
            order.have.address,
            order.want.address,
            order.amount_in,
            false,
        ),
        Order::ExactOut(order) => (
            order.want,
            order.want.address,
            order.have.address,
            order.amount_out,
            true,
        ),
    };

    let solve_routes: Vec<Route> = if reversed {
        routes.iter().map(Route::reversed).collect()
    } else {
        routes.to_vec()
    };

    let demand_units = demand
        .checked_mul(unit.one())
        .and_then(to_units)
        .ok_or(SolverError::AmountOverflow { amount: demand })?;

    let (graph, pushed) = run_flow(order, &unit, start, end, demand_units, &solve_routes)?;

    if pushed < demand_units {
        warn!(
            %start, %end, demand = %demand,
            "flow network cannot absorb the order"
        );
        return Err(SolverError::Infeasible {
            token: start,
            demand,
            capacity: unit.from_base_units(pushed as u128),
        });
    }

    decompose(graph, &unit, demand, demand_units, reversed)
}

/// Built flow network plus everything needed to map edges back to pools
struct SolvedGraph {
    flow: MinCostFlow,
    source: usize,
    sink: usize,
    /// forward edge id -> (from node, pool) in solve orientation
    edge_pools: Vec<(usize, usize, Pool)>,
}

fn run_flow(
    order: &Order,
    unit: &TokenRef,
    start: Address,
    end: Address,
    demand_units: i128,
    routes: &[Route],
) -> Result<(SolvedGraph, i128), SolverError> {
    let mut flow = MinCostFlow::new();
    let mut node_ids: HashMap<Address, usize> = HashMap::new();
    let mut seen_edges: HashMap<(usize, usize, Address), ()> = HashMap::new();
    let mut edge_pools: Vec<(usize, usize, Pool)> = Vec::new();

    let source = flow.add_node();
    node_ids.insert(start, source);
    let sink = flow.add_node();
    node_ids.insert(end, sink);

    let slippage = order.slippage();
    let slippage_bps = to_bps(slippage);
    let demand = unit.from_base_units(demand_units as u128);

    for route in routes {
        match route.end_token(start) {
            Ok(token) if token == end => {}
            _ => {
                debug!(hops = route.len(), "candidate route does not connect the pair, skipping");
                continue;
            }
        }

        let mut token = start;
        let mut price = Decimal::ONE;

        for pool in route.pools() {
            // Depth in this hop's token, at the order's slippage ceiling
            let depth = match pool.depth(token, slippage) {
                Ok(depth) => depth,
                Err(PoolError::UninitializedPool { .. }) => {
                    debug!(pool = %pool.address(), "unpriceable hop, abandoning route");
                    break;
                }
                Err(err) => return Err(err.into()),
            };

            // Back into start-token units via the running price
            let capacity = depth / price;
            let capacity_units = unit
                .to_base_units(capacity)
                .map(|units| (units.min(CAPACITY_CLAMP as u128)) as i128)
                .unwrap_or(CAPACITY_CLAMP);

            // Cost per unit: the realized price impact of pushing the whole
            // demand through this hop when it fits, the slippage ceiling
            // when it cannot
            let weight = if capacity < demand {
                slippage_bps
            } else {
                match pool.reflexivity(token, demand * price) {
                    Ok(reflexivity) => to_bps(reflexivity),
                    Err(PoolError::SizeOutOfBounds { .. }) => slippage_bps,
                    Err(PoolError::UninitializedPool { .. }) => {
                        debug!(pool = %pool.address(), "unpriceable hop, abandoning route");
                        break;
                    }
                    Err(err) => return Err(err.into()),
                }
            }
            .max(1); // strictly positive weights keep the flow acyclic

            let hop_price = match pool.price(token) {
                Ok(hop_price) => hop_price,
                Err(PoolError::UninitializedPool { .. }) => {
                    debug!(pool = %pool.address(), "unpriceable hop, abandoning route");
                    break;
                }
                Err(err) => return Err(err.into()),
            };

            let other = pool.other(token)?.address;
            let from = node_id(&mut flow, &mut node_ids, token);
            let to = node_id(&mut flow, &mut node_ids, other);

            // The same pool can appear on many candidate routes; one edge
            // per (direction, pool identity) is enough
            if seen_edges.insert((from, to, pool.address()), ()).is_none() {
                let edge = flow.add_edge(from, to, capacity_units, weight);
                debug_assert_eq!(edge, edge_pools.len() * 2);
                edge_pools.push((from, to, pool.clone()));
            }

            token = other;
            price *= hop_price;
        }
    }

    let pushed = flow.run(source, sink, demand_units);
    Ok((
        SolvedGraph {
            flow,
            source,
            sink,
            edge_pools,
        },
        pushed,
    ))
}

/// Strip positive-flow paths from source to sink with an explicit worklist,
/// subtracting each path's bottleneck so no edge is ever double-counted.
fn decompose(
    graph: SolvedGraph,
    unit: &TokenRef,
    demand: Decimal,
    demand_units: i128,
    reversed: bool,
) -> Result<Solution, SolverError> {
    let SolvedGraph {
        flow,
        source,
        sink,
        edge_pools,
    } = graph;

    // Positive flows per forward edge, adjacency in deterministic edge order
    let mut remaining: Vec<i128> = (0..edge_pools.len())
        .map(|index| flow.flow(index * 2).max(0))
        .collect();
    let mut outgoing: Vec<Vec<usize>> = vec![Vec::new(); node_count(&edge_pools, source, sink)];
    for (index, (from, _, _)) in edge_pools.iter().enumerate() {
        outgoing[*from].push(index);
    }

    let mut stripped: Vec<(Vec<Pool>, i128)> = Vec::new();
    let mut total = 0i128;

    // Each iteration zeroes at least one edge, so this terminates
    while total < demand_units {
        let mut path: Vec<usize> = Vec::new();
        let mut node = source;

        while node != sink {
            match outgoing[node]
                .iter()
                .copied()
                .find(|&index| remaining[index] > 0)
            {
                Some(index) => {
                    path.push(index);
                    node = edge_pools[index].1;
                }
                None => break,
            }
        }

        if node != sink || path.is_empty() {
            break;
        }

        let bottleneck = match path.iter().map(|&index| remaining[index]).min() {
            Some(bottleneck) if bottleneck > 0 => bottleneck,
            _ => break,
        };
        for &index in &path {
            remaining[index] -= bottleneck;
        }

        let pools = path
            .iter()
            .map(|&index| edge_pools[index].2.clone())
            .collect();
        stripped.push((pools, bottleneck));
        total += bottleneck;
    }

    if total != demand_units {
        return Err(SolverError::InvariantViolation {
            allocated: unit.from_base_units(total as u128),
            demand,
        });
    }

    // Fractions sum to exactly one: the final route absorbs the rounding
    let mut allocations = Vec::with_capacity(stripped.len());
    let mut fraction_acc = Decimal::ZERO;
    let mut amount_acc = Decimal::ZERO;
    let last = stripped.len().saturating_sub(1);

    for (index, (mut pools, units)) in stripped.into_iter().enumerate() {
        if reversed {
            pools.reverse();
        }
        let route = Route::new(pools)?;

        let (fraction, amount) = if index == last {
            (Decimal::ONE - fraction_acc, demand - amount_acc)
        } else {
            let amount = unit.from_base_units(units as u128);
            (amount / demand, amount)
        };
        fraction_acc += fraction;
        amount_acc += amount;

        allocations.push(RouteAllocation {
            route,
            fraction,
            amount,
        });
    }

    let total_fraction: Decimal = allocations
        .iter()
        .map(RouteAllocation::fraction)
        .sum();
    if !allocations.is_empty() && total_fraction != Decimal::ONE {
        return Err(SolverError::InvariantViolation {
            allocated: total_fraction * demand,
            demand,
        });
    }

    debug!(routes = allocations.len(), "order decomposed");
    Ok(Solution { allocations })
}

fn node_id(flow: &mut MinCostFlow, ids: &mut HashMap<Address, usize>, token: Address) -> usize {
    match ids.get(&token) {
        Some(id) => *id,
        None => {
            let id = flow.add_node();
            ids.insert(token, id);
            id
        }
    }
}

fn node_count(edge_pools: &[(usize, usize, Pool)], source: usize, sink: usize) -> usize {
    edge_pools
        .iter()
        .flat_map(|(from, to, _)| [*from, *to])
        .chain([source, sink])
        .max()
        .map(|max| max + 1)
        .unwrap_or(0)
}

/// Ratio -> integer basis points, rounded half-up
fn to_bps(ratio: Decimal) -> i128 {
    use rust_decimal::prelude::ToPrimitive;
    (ratio * Decimal::from(10_000u32))
        .round()
        .to_i128()
        .unwrap_or(i128::MAX)
}

fn to_units(amount: Decimal) -> Option<i128> {
    use rust_decimal::prelude::ToPrimitive;
    amount.trunc().to_i128()
}
