//! Table dependency graph and generation order.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::cmp::Reverse;
use std::collections::{BTreeSet, BinaryHeap, HashMap, HashSet};
use synth_core::{Schema, SchemaError};

/// Directed graph of foreign-key dependencies between tables.
///
/// Edges go from the referenced (parent) table to the referencing (child)
/// table, so a topological order yields parents first. References to tables
/// outside the schema add no edge.
#[derive(Debug)]
pub struct DependencyGraph {
    graph: DiGraph<String, ()>,
    node_map: HashMap<String, NodeIndex>,
}

impl DependencyGraph {
    /// Build the graph for every table of `schema`.
    pub fn from_schema(schema: &Schema) -> Self {
        let mut graph = DiGraph::new();
        let mut node_map = HashMap::new();
        for table in &schema.tables {
            let idx = graph.add_node(table.name.clone());
            node_map.insert(table.name.clone(), idx);
        }

        let mut seen = HashSet::new();
        for fk in schema.foreign_keys() {
            let (Some(&parent), Some(&child)) =
                (node_map.get(&fk.parent_table), node_map.get(&fk.child_table))
            else {
                continue;
            };
            if seen.insert((parent, child)) {
                graph.add_edge(parent, child, ());
            }
        }

        Self { graph, node_map }
    }

    /// Number of tables.
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Tables in generation order: parents before children, ties broken by
    /// table name.
    ///
    /// Fails with [`SchemaError::CircularDependency`] naming one cycle as
    /// `a -> b -> a`, where each arrow reads "references".
    pub fn generation_order(&self) -> Result<Vec<String>, SchemaError> {
        let mut in_degree: HashMap<NodeIndex, usize> = self
            .graph
            .node_indices()
            .map(|idx| {
                let parents = self.graph.neighbors_directed(idx, Direction::Incoming).count();
                (idx, parents)
            })
            .collect();

        let mut ready: BinaryHeap<Reverse<(&str, NodeIndex)>> = in_degree
            .iter()
            .filter(|(_, &d)| d == 0)
            .map(|(&idx, _)| Reverse((self.graph[idx].as_str(), idx)))
            .collect();

        let mut order = Vec::with_capacity(self.len());
        while let Some(Reverse((name, idx))) = ready.pop() {
            order.push(name.to_string());
            for child in self.graph.neighbors_directed(idx, Direction::Outgoing) {
                if let Some(d) = in_degree.get_mut(&child) {
                    *d -= 1;
                    if *d == 0 {
                        ready.push(Reverse((self.graph[child].as_str(), child)));
                    }
                }
            }
            in_degree.remove(&idx);
        }

        if order.len() < self.len() {
            let remaining: HashSet<NodeIndex> = in_degree.keys().copied().collect();
            return Err(SchemaError::CircularDependency {
                cycle: self.find_cycle_path(&remaining),
            });
        }
        Ok(order)
    }

    /// Walk "references" edges through the unordered tables until one repeats.
    ///
    /// Every table left over by the topological sort still has a parent among
    /// the leftovers, so the walk always closes a cycle.
    fn find_cycle_path(&self, remaining: &HashSet<NodeIndex>) -> String {
        let Some(start) = remaining
            .iter()
            .min_by(|a, b| self.graph[**a].cmp(&self.graph[**b]))
            .copied()
        else {
            return String::new();
        };

        let mut path = vec![start];
        let mut current = start;
        loop {
            let next = self
                .graph
                .neighbors_directed(current, Direction::Incoming)
                .filter(|p| remaining.contains(p))
                .min_by(|a, b| self.graph[*a].cmp(&self.graph[*b]));
            let Some(next) = next else {
                break;
            };
            if let Some(pos) = path.iter().position(|n| *n == next) {
                path.drain(..pos);
                path.push(next);
                break;
            }
            path.push(next);
            current = next;
        }

        path.iter()
            .map(|idx| self.graph[*idx].as_str())
            .collect::<Vec<_>>()
            .join(" -> ")
    }

    /// Tables `table` references directly, sorted by name.
    pub fn parents(&self, table: &str) -> Vec<String> {
        let Some(&idx) = self.node_map.get(table) else {
            return Vec::new();
        };
        let names: BTreeSet<String> = self
            .graph
            .neighbors_directed(idx, Direction::Incoming)
            .map(|n| self.graph[n].clone())
            .collect();
        names.into_iter().collect()
    }

    /// All tables `table` depends on, transitively, sorted by name.
    pub fn ancestors(&self, table: &str) -> Vec<String> {
        let Some(&start) = self.node_map.get(table) else {
            return Vec::new();
        };
        let mut visited = HashSet::new();
        let mut stack = vec![start];
        let mut result = BTreeSet::new();
        while let Some(idx) = stack.pop() {
            for parent in self.graph.neighbors_directed(idx, Direction::Incoming) {
                if visited.insert(parent) {
                    result.insert(self.graph[parent].clone());
                    stack.push(parent);
                }
            }
        }
        result.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use synth_core::{Column, Table};

    fn table(name: &str, refs: &[&str]) -> Table {
        let mut columns = vec![Column::new("id", "uuid").primary_key()];
        for parent in refs {
            columns.push(Column::foreign(format!("{parent}_id"), parent, "id"));
        }
        Table::new(name, 1, columns)
    }

    fn schema(tables: Vec<Table>) -> Schema {
        Schema::new(tables, vec![]).unwrap()
    }

    #[test]
    fn test_parents_first_then_by_name() {
        let s = schema(vec![
            table("orders", &["users", "products"]),
            table("users", &[]),
            table("products", &[]),
            table("audit", &[]),
            table("order_items", &["orders", "products"]),
        ]);
        let order = DependencyGraph::from_schema(&s).generation_order().unwrap();
        assert_eq!(
            order,
            vec!["audit", "products", "users", "orders", "order_items"]
        );
    }

    #[test]
    fn test_cycle_is_named() {
        let s = schema(vec![table("a", &["b"]), table("b", &["a"])]);
        let err = DependencyGraph::from_schema(&s)
            .generation_order()
            .unwrap_err();
        match err {
            SchemaError::CircularDependency { cycle } => assert_eq!(cycle, "a -> b -> a"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_cycle_downstream_table_not_reported() {
        // c hangs off the a <-> b cycle but is not part of it
        let s = schema(vec![
            table("a", &["b"]),
            table("b", &["a"]),
            table("c", &["a"]),
        ]);
        let err = DependencyGraph::from_schema(&s)
            .generation_order()
            .unwrap_err();
        assert!(err.to_string().contains("a -> b -> a"), "{err}");
    }

    #[test]
    fn test_self_reference_is_a_cycle() {
        let s = schema(vec![table("employees", &["employees"])]);
        let err = DependencyGraph::from_schema(&s)
            .generation_order()
            .unwrap_err();
        assert!(err.to_string().contains("employees -> employees"));
    }

    #[test]
    fn test_external_parent_adds_no_edge() {
        let s = schema(vec![table("orders", &["legacy_users"])]);
        let graph = DependencyGraph::from_schema(&s);
        assert_eq!(graph.generation_order().unwrap(), vec!["orders"]);
        assert!(graph.parents("orders").is_empty());
    }

    #[test]
    fn test_ancestors() {
        let s = schema(vec![
            table("a", &[]),
            table("b", &["a"]),
            table("c", &["b"]),
            table("d", &[]),
        ]);
        let graph = DependencyGraph::from_schema(&s);
        assert_eq!(graph.ancestors("c"), vec!["a", "b"]);
        assert!(graph.ancestors("d").is_empty());
        assert_eq!(graph.parents("c"), vec!["b"]);
    }
}
