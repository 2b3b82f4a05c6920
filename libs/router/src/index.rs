//! In-memory pool index and route discovery.
//!
//! The index is a token-keyed multigraph of pool snapshots: several pools may
//! connect the same pair at different fee tiers. Route discovery is an
//! exhaustive simple-path DFS with a depth cutoff - candidate generation
//! only; fetching and refreshing the snapshots is the supplier's job.

use std::collections::HashMap;

use ethers_core::types::Address;
use tracing::debug;

use amm::{AmmPool, Pool, Route};

/// Collaborator interface the solver consumes candidate routes from
pub trait RouteSource {
    /// All simple routes from `start` to `end` of at most `depth` hops
    fn find_routes(&self, start: Address, end: Address, depth: usize) -> Vec<Route>;
}

#[derive(Debug, Default)]
pub struct PoolIndex {
    pools: Vec<Pool>,
    by_address: HashMap<Address, usize>,
    by_token: HashMap<Address, Vec<usize>>,
}

impl PoolIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a pool snapshot; a pool already present (by address) is
    /// replaced wholesale, which is how managed snapshots are refreshed
    pub fn insert(&mut self, pool: Pool) {
        if let Some(&slot) = self.by_address.get(&pool.address()) {
            self.pools[slot] = pool;
            return;
        }

        let slot = self.pools.len();
        self.by_address.insert(pool.address(), slot);
        self.by_token
            .entry(pool.token0().address)
            .or_default()
            .push(slot);
        self.by_token
            .entry(pool.token1().address)
            .or_default()
            .push(slot);
        self.pools.push(pool);
    }

    pub fn get(&self, address: Address) -> Option<&Pool> {
        self.by_address.get(&address).map(|&slot| &self.pools[slot])
    }

    pub fn get_mut(&mut self, address: Address) -> Option<&mut Pool> {
        let slot = *self.by_address.get(&address)?;
        Some(&mut self.pools[slot])
    }

    pub fn len(&self) -> usize {
        self.pools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    /// All pools containing `token`, in insertion order
    pub fn pools_for(&self, token: Address) -> impl Iterator<Item = &Pool> {
        self.by_token
            .get(&token)
            .into_iter()
            .flatten()
            .map(|&slot| &self.pools[slot])
    }

    /// The pool connecting `a` and `b` under `key` (fee tier), if indexed
    pub fn pool_for_pair(&self, a: Address, b: Address, key: u32) -> Option<&Pool> {
        self.pools_for(a)
            .find(|pool| pool.contains(b) && pool.key() == key)
    }
}

impl RouteSource for PoolIndex {
    fn find_routes(&self, start: Address, end: Address, depth: usize) -> Vec<Route> {
        let mut routes = Vec::new();
        if start == end || depth == 0 {
            return routes;
        }

        // Iterative DFS over simple paths: no token revisited, cutoff at
        // `depth` hops. Explicit frames instead of recursion.
        struct Frame {
            token: Address,
            next: usize,
        }

        let mut stack = vec![Frame {
            token: start,
            next: 0,
        }];
        let mut path_tokens = vec![start];
        let mut path_pools: Vec<usize> = Vec::new();

        while let Some(frame) = stack.last_mut() {
            let token = frame.token;
            let candidates = self
                .by_token
                .get(&token)
                .map(Vec::as_slice)
                .unwrap_or_default();

            if frame.next >= candidates.len() || path_pools.len() >= depth {
                stack.pop();
                path_tokens.pop();
                path_pools.pop();
                continue;
            }

            let slot = candidates[frame.next];
            frame.next += 1;

            let pool = &self.pools[slot];
            let other = match pool.other(token) {
                Ok(other) => other.address,
                Err(_) => continue,
            };
            if path_pools.contains(&slot) || path_tokens.contains(&other) {
                continue;
            }

            if other == end {
                let pools = path_pools
                    .iter()
                    .chain([&slot])
                    .map(|&slot| self.pools[slot].clone())
                    .collect();
                if let Ok(route) = Route::new(pools) {
                    routes.push(route);
                }
                continue;
            }

            path_pools.push(slot);
            path_tokens.push(other);
            stack.push(Frame {
                token: other,
                next: 0,
            });
        }

        debug!(%start, %end, depth, found = routes.len(), "route discovery");
        routes
    }
}
