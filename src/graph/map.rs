//! Hash-map keyed graph backing.
//!
//! Stores nodes and edges in `HashMap`s keyed by id, with no assumptions on
//! id density or sign. The default choice for networks read from external
//! data, where id ranges are whatever the producing tool emitted.

use std::collections::HashMap;

use super::{Edge, Graph, GraphError, Identifiable};

/// Map-backed multigraph. Behavior is identical to
/// [`ArrayGraph`](super::ArrayGraph); only the id-density assumptions differ.
#[derive(Debug, Clone)]
pub struct MapGraph<N, E> {
    directed: bool,
    nodes: HashMap<i64, N>,
    edges: HashMap<i64, E>,
    outgoing: HashMap<i64, Vec<i64>>,
    incoming: HashMap<i64, Vec<i64>>,
}

impl<N: Identifiable, E: Edge> MapGraph<N, E> {
    /// Creates an empty graph.
    pub fn new(directed: bool) -> Self {
        Self {
            directed,
            nodes: HashMap::new(),
            edges: HashMap::new(),
            outgoing: HashMap::new(),
            incoming: HashMap::new(),
        }
    }

    /// Creates an empty directed graph.
    pub fn directed() -> Self {
        Self::new(true)
    }

    /// Creates an empty undirected graph.
    pub fn undirected() -> Self {
        Self::new(false)
    }

    fn outgoing_ids(&self, node_id: i64) -> &[i64] {
        self.outgoing.get(&node_id).map_or(&[], Vec::as_slice)
    }

    fn incoming_ids(&self, node_id: i64) -> &[i64] {
        self.incoming.get(&node_id).map_or(&[], Vec::as_slice)
    }
}

impl<N: Identifiable, E: Edge> Graph<N, E> for MapGraph<N, E> {
    fn is_directed(&self) -> bool {
        self.directed
    }

    fn add_node(&mut self, node: N) -> Result<(), GraphError> {
        let id = node.id();
        if self.nodes.contains_key(&id) {
            return Err(GraphError::DuplicateId(id));
        }
        self.nodes.insert(id, node);
        Ok(())
    }

    fn add_edge(&mut self, edge: E) -> Result<(), GraphError> {
        let edge_id = edge.id();
        if self.edges.contains_key(&edge_id) {
            return Err(GraphError::DuplicateId(edge_id));
        }
        let (source, target) = (edge.source_id(), edge.target_id());
        for node_id in [source, target] {
            if !self.nodes.contains_key(&node_id) {
                return Err(GraphError::IncidentNodeMissing { edge_id, node_id });
            }
        }
        self.edges.insert(edge_id, edge);
        self.outgoing.entry(source).or_default().push(edge_id);
        self.incoming.entry(target).or_default().push(edge_id);
        if !self.directed && source != target {
            self.outgoing.entry(target).or_default().push(edge_id);
            self.incoming.entry(source).or_default().push(edge_id);
        }
        Ok(())
    }

    fn node(&self, id: i64) -> Option<&N> {
        self.nodes.get(&id)
    }

    fn node_mut(&mut self, id: i64) -> Option<&mut N> {
        self.nodes.get_mut(&id)
    }

    fn edge(&self, id: i64) -> Option<&E> {
        self.edges.get(&id)
    }

    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn nodes<'a>(&'a self) -> impl Iterator<Item = &'a N>
    where
        N: 'a,
    {
        self.nodes.values()
    }

    fn edges<'a>(&'a self) -> impl Iterator<Item = &'a E>
    where
        E: 'a,
    {
        self.edges.values()
    }

    fn outgoing_edges<'a>(&'a self, node_id: i64) -> impl Iterator<Item = &'a E>
    where
        E: 'a,
    {
        self.outgoing_ids(node_id)
            .iter()
            .filter_map(|edge_id| self.edge(*edge_id))
    }

    fn incoming_edges<'a>(&'a self, node_id: i64) -> impl Iterator<Item = &'a E>
    where
        E: 'a,
    {
        self.incoming_ids(node_id)
            .iter()
            .filter_map(|edge_id| self.edge(*edge_id))
    }

    fn incident_edges<'a>(&'a self, node_id: i64) -> impl Iterator<Item = &'a E>
    where
        E: 'a,
    {
        // Undirected storage mirrors each edge into both endpoints' outgoing
        // lists; for directed graphs, self-loops are kept on the outgoing
        // side only so each edge is yielded once.
        let extra = self
            .directed
            .then(|| {
                self.incoming_edges(node_id)
                    .filter(|edge| edge.source_id() != edge.target_id())
            })
            .into_iter()
            .flatten();
        self.outgoing_edges(node_id).chain(extra)
    }

    fn empty_like(&self) -> Self {
        Self::new(self.directed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::seq::SliceRandom;

    #[derive(Debug, Clone, PartialEq)]
    struct Stop {
        id: i64,
    }

    impl Identifiable for Stop {
        fn id(&self) -> i64 {
            self.id
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Link {
        id: i64,
        source: i64,
        target: i64,
    }

    impl Identifiable for Link {
        fn id(&self) -> i64 {
            self.id
        }
    }

    impl Edge for Link {
        fn source_id(&self) -> i64 {
            self.source
        }

        fn target_id(&self) -> i64 {
            self.target
        }
    }

    fn link(id: i64, source: i64, target: i64) -> Link {
        Link { id, source, target }
    }

    fn sample_graph(directed: bool) -> MapGraph<Stop, Link> {
        let mut graph = MapGraph::new(directed);
        for id in [10, 20, 30] {
            graph.add_node(Stop { id }).unwrap();
        }
        graph.add_edge(link(1, 10, 20)).unwrap();
        graph.add_edge(link(2, 20, 30)).unwrap();
        graph
    }

    #[test]
    fn test_add_and_lookup() {
        let graph = sample_graph(true);
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.node(20), Some(&Stop { id: 20 }));
        assert!(graph.node(25).is_none());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut graph = sample_graph(true);
        assert_eq!(
            graph.add_node(Stop { id: 10 }).unwrap_err(),
            GraphError::DuplicateId(10)
        );
        assert_eq!(
            graph.add_edge(link(2, 10, 30)).unwrap_err(),
            GraphError::DuplicateId(2)
        );
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_missing_incident_node_rejected() {
        let mut graph = sample_graph(true);
        let err = graph.add_edge(link(3, 30, 99)).unwrap_err();
        assert_eq!(
            err,
            GraphError::IncidentNodeMissing {
                edge_id: 3,
                node_id: 99
            }
        );
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_negative_and_sparse_ids_accepted() {
        let mut graph: MapGraph<Stop, Link> = MapGraph::directed();
        graph.add_node(Stop { id: -5 }).unwrap();
        graph.add_node(Stop { id: 1_000_000 }).unwrap();
        graph.add_edge(link(-1, -5, 1_000_000)).unwrap();
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.outgoing_edges(-5).count(), 1);
    }

    #[test]
    fn test_undirected_edge_visible_from_both_endpoints() {
        let graph = sample_graph(false);
        assert!(graph.incident_edges(10).any(|e| e.id() == 1));
        assert!(graph.incident_edges(20).any(|e| e.id() == 1));
        assert_eq!(graph.outgoing_edges(20).count(), 2);
        assert_eq!(graph.incoming_edges(10).count(), 1);
    }

    #[test]
    fn test_directed_incidence() {
        let graph = sample_graph(true);
        let out: Vec<i64> = graph.outgoing_edges(20).map(|e| e.id()).collect();
        let inc: Vec<i64> = graph.incoming_edges(20).map(|e| e.id()).collect();
        assert_eq!(out, vec![2]);
        assert_eq!(inc, vec![1]);
    }

    #[test]
    fn test_self_loop_yielded_once() {
        for directed in [true, false] {
            let mut graph = sample_graph(directed);
            graph.add_edge(link(7, 30, 30)).unwrap();
            assert_eq!(
                graph.incident_edges(30).filter(|e| e.id() == 7).count(),
                1,
                "directed={directed}"
            );
        }
    }

    #[test]
    fn test_round_trip_independent_of_insertion_order() {
        let stops: Vec<Stop> = (0..20).map(|id| Stop { id: id * 3 }).collect();
        let links: Vec<Link> = (0..19).map(|i| link(i, i * 3, (i + 1) * 3)).collect();

        let mut rng = rand::rng();
        let mut reference: Option<(Vec<Stop>, Vec<Link>)> = None;
        for _ in 0..5 {
            let mut shuffled_stops = stops.clone();
            let mut shuffled_links = links.clone();
            shuffled_stops.shuffle(&mut rng);
            shuffled_links.shuffle(&mut rng);

            let mut graph = MapGraph::directed();
            for stop in shuffled_stops {
                graph.add_node(stop).unwrap();
            }
            for l in shuffled_links {
                graph.add_edge(l).unwrap();
            }

            let mut got_nodes: Vec<Stop> = graph.nodes().cloned().collect();
            let mut got_links: Vec<Link> = graph.edges().cloned().collect();
            got_nodes.sort_by_key(|n| n.id());
            got_links.sort_by_key(|e| e.id());
            match &reference {
                None => reference = Some((got_nodes, got_links)),
                Some((nodes, edges)) => {
                    assert_eq!(&got_nodes, nodes);
                    assert_eq!(&got_links, edges);
                }
            }
        }
    }
}
