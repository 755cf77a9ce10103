//! Dependency graph over a circuit's gate ops.
//!
//! Each node is one op; an edge `a -> b` means `b` is the next op after `a`
//! on at least one shared qubit. The graph is used for depth and layering;
//! the circuit itself stays a flat list.

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use rustc_hash::FxHashMap;

use crate::circuit::Circuit;
use crate::qubit::QubitId;

/// Qubit-sharing dependency graph of a circuit.
#[derive(Debug, Clone, Default)]
pub struct DependencyDag {
    /// Node weights are op positions in the circuit.
    graph: DiGraph<usize, QubitId>,
}

impl DependencyDag {
    /// Build the graph for a circuit.
    pub fn from_circuit(circuit: &Circuit) -> Self {
        let mut graph = DiGraph::with_capacity(circuit.gate_count(), circuit.gate_count() * 2);
        let mut last_on_wire: FxHashMap<QubitId, NodeIndex> = FxHashMap::default();

        for (position, op) in circuit.ops().iter().enumerate() {
            let node = graph.add_node(position);
            for &qubit in &op.qubits {
                if let Some(prev) = last_on_wire.insert(qubit, node) {
                    graph.add_edge(prev, node, qubit);
                }
            }
        }

        Self { graph }
    }

    /// Length of the longest path, counted in ops.
    pub fn depth(&self) -> usize {
        self.levels().into_iter().max().unwrap_or(0)
    }

    /// 1-based layer of every op, indexed by op position.
    pub fn levels(&self) -> Vec<usize> {
        let mut levels = vec![0usize; self.graph.node_count()];

        // Edges only ever point from an earlier op to a later one, so
        // insertion order is already a topological order.
        for node in self.graph.node_indices() {
            let max_pred = self
                .graph
                .edges_directed(node, Direction::Incoming)
                .map(|e| levels[e.source().index()])
                .max()
                .unwrap_or(0);
            levels[node.index()] = max_pred + 1;
        }

        levels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::GateKind;
    use crate::instruction::GateOp;

    fn circuit(num_qubits: u32, ops: &[(GateKind, &[u32])]) -> Circuit {
        let ops = ops
            .iter()
            .map(|(kind, qubits)| GateOp::new(*kind, qubits.iter().copied().map(QubitId)))
            .collect();
        Circuit::new(num_qubits, ops).unwrap()
    }

    #[test]
    fn test_chain_depth() {
        let c = circuit(
            3,
            &[
                (GateKind::H, &[0]),
                (GateKind::CNOT, &[0, 1]),
                (GateKind::CNOT, &[1, 2]),
            ],
        );
        let dag = DependencyDag::from_circuit(&c);
        assert_eq!(dag.depth(), 3);
        assert_eq!(dag.levels(), vec![1, 2, 3]);
    }

    #[test]
    fn test_independent_wires() {
        let c = circuit(
            4,
            &[
                (GateKind::H, &[0]),
                (GateKind::X, &[1]),
                (GateKind::CNOT, &[2, 3]),
                (GateKind::T, &[0]),
            ],
        );
        let dag = DependencyDag::from_circuit(&c);
        assert_eq!(dag.levels(), vec![1, 1, 1, 2]);
        assert_eq!(dag.depth(), 2);
    }

    #[test]
    fn test_shared_wires_count_once() {
        // Both wires of the second CNOT come from the first one.
        let c = circuit(2, &[(GateKind::CNOT, &[0, 1]), (GateKind::CNOT, &[1, 0])]);
        let dag = DependencyDag::from_circuit(&c);
        assert_eq!(dag.levels(), vec![1, 2]);
        assert_eq!(dag.depth(), 2);
    }

    #[test]
    fn test_empty_circuit() {
        let dag = DependencyDag::from_circuit(&circuit(2, &[]));
        assert!(dag.levels().is_empty());
        assert_eq!(dag.depth(), 0);
    }
}
