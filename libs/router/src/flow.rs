//! Integer min-cost flow over an adjacency-list multigraph.
//!
//! Successive shortest augmenting paths with an SPFA relaxation; costs are
//! non-negative so every augmentation follows a cheapest residual path. All
//! arithmetic is in scaled integers - the solver converts Decimal depths and
//! weights exactly once before touching this module.

use std::collections::VecDeque;

#[derive(Debug, Clone)]
struct FlowEdge {
    to: usize,
    capacity: i128,
    cost: i128,
    flow: i128,
}

/// Multigraph with paired forward/reverse edges for residual traversal
#[derive(Debug, Default)]
pub(crate) struct MinCostFlow {
    adjacency: Vec<Vec<usize>>,
    edges: Vec<FlowEdge>,
}

impl MinCostFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self) -> usize {
        self.adjacency.push(Vec::new());
        self.adjacency.len() - 1
    }

    /// Add a directed edge and its zero-capacity reverse; returns the
    /// forward edge's id
    pub fn add_edge(&mut self, from: usize, to: usize, capacity: i128, cost: i128) -> usize {
        let id = self.edges.len();
        self.edges.push(FlowEdge {
            to,
            capacity,
            cost,
            flow: 0,
        });
        self.edges.push(FlowEdge {
            to: from,
            capacity: 0,
            cost: -cost,
            flow: 0,
        });
        self.adjacency[from].push(id);
        self.adjacency[to].push(id + 1);
        id
    }

    /// Net flow on a forward edge after [`Self::run`]
    pub fn flow(&self, edge: usize) -> i128 {
        self.edges[edge].flow
    }

    /// Source node of `edge`, read through its paired reverse edge
    fn from_node(&self, edge: usize) -> usize {
        self.edges[edge ^ 1].to
    }

    /// Push up to `demand` units from `source` to `sink` along cheapest
    /// residual paths. Returns the amount actually pushed; anything short of
    /// `demand` means the network is infeasible at these capacities.
    pub fn run(&mut self, source: usize, sink: usize, demand: i128) -> i128 {
        let nodes = self.adjacency.len();
        let mut pushed = 0i128;

        while pushed < demand {
            // SPFA shortest-path over the residual graph
            let mut dist = vec![i128::MAX; nodes];
            let mut prev_edge = vec![usize::MAX; nodes];
            let mut queued = vec![false; nodes];
            let mut queue = VecDeque::new();
            dist[source] = 0;
            queued[source] = true;
            queue.push_back(source);

            while let Some(node) = queue.pop_front() {
                queued[node] = false;
                for &edge_id in &self.adjacency[node] {
                    let edge = &self.edges[edge_id];
                    if edge.capacity - edge.flow <= 0 {
                        continue;
                    }
                    let candidate = dist[node].saturating_add(edge.cost);
                    if candidate < dist[edge.to] {
                        dist[edge.to] = candidate;
                        prev_edge[edge.to] = edge_id;
                        if !queued[edge.to] {
                            queued[edge.to] = true;
                            queue.push_back(edge.to);
                        }
                    }
                }
            }

            if dist[sink] == i128::MAX {
                break;
            }

            // Bottleneck along the found path, capped by remaining demand
            let mut bottleneck = demand - pushed;
            let mut node = sink;
            while node != source {
                let edge_id = prev_edge[node];
                let edge = &self.edges[edge_id];
                bottleneck = bottleneck.min(edge.capacity - edge.flow);
                node = self.from_node(edge_id);
            }

            // Augment forward and cancel on the paired reverse
            let mut node = sink;
            while node != source {
                let edge_id = prev_edge[node];
                self.edges[edge_id].flow += bottleneck;
                self.edges[edge_id ^ 1].flow -= bottleneck;
                node = self.from_node(edge_id);
            }

            pushed += bottleneck;
        }

        pushed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_the_cheaper_path() {
        let mut flow = MinCostFlow::new();
        let s = flow.add_node();
        let a = flow.add_node();
        let b = flow.add_node();
        let t = flow.add_node();

        let cheap_in = flow.add_edge(s, a, 10, 1);
        let cheap_out = flow.add_edge(a, t, 10, 1);
        let pricey_in = flow.add_edge(s, b, 10, 5);
        let pricey_out = flow.add_edge(b, t, 10, 5);

        assert_eq!(flow.run(s, t, 10), 10);
        assert_eq!(flow.flow(cheap_in), 10);
        assert_eq!(flow.flow(cheap_out), 10);
        assert_eq!(flow.flow(pricey_in), 0);
        assert_eq!(flow.flow(pricey_out), 0);
    }

    #[test]
    fn spills_over_when_the_cheap_path_saturates() {
        let mut flow = MinCostFlow::new();
        let s = flow.add_node();
        let a = flow.add_node();
        let b = flow.add_node();
        let t = flow.add_node();

        let cheap_in = flow.add_edge(s, a, 4, 1);
        flow.add_edge(a, t, 4, 1);
        let pricey_in = flow.add_edge(s, b, 10, 5);
        flow.add_edge(b, t, 10, 5);

        assert_eq!(flow.run(s, t, 10), 10);
        assert_eq!(flow.flow(cheap_in), 4);
        assert_eq!(flow.flow(pricey_in), 6);
    }

    #[test]
    fn reports_partial_flow_when_infeasible() {
        let mut flow = MinCostFlow::new();
        let s = flow.add_node();
        let t = flow.add_node();
        flow.add_edge(s, t, 3, 1);

        assert_eq!(flow.run(s, t, 10), 3);
    }

    #[test]
    fn parallel_edges_are_independent() {
        let mut flow = MinCostFlow::new();
        let s = flow.add_node();
        let t = flow.add_node();
        let first = flow.add_edge(s, t, 5, 1);
        let second = flow.add_edge(s, t, 5, 2);

        assert_eq!(flow.run(s, t, 8), 8);
        assert_eq!(flow.flow(first), 5);
        assert_eq!(flow.flow(second), 3);
    }
}
