//! Dense, `Vec`-indexed graph backing.
//!
//! Node and edge ids address `Vec` slots directly, so lookups are a bounds
//! check plus an `Option` read. Ids must be non-negative; the store grows to
//! the largest id seen. Suited to networks whose ids form a compact range,
//! such as freshly numbered rollout output.

use super::{Edge, Graph, GraphError, Identifiable};

/// Array-backed multigraph. See the [module docs](self) for the id-density
/// assumption; behavior is otherwise identical to [`MapGraph`](super::MapGraph).
#[derive(Debug, Clone)]
pub struct ArrayGraph<N, E> {
    directed: bool,
    nodes: Vec<Option<N>>,
    edges: Vec<Option<E>>,
    outgoing: Vec<Vec<i64>>,
    incoming: Vec<Vec<i64>>,
    node_count: usize,
    edge_count: usize,
}

impl<N: Identifiable, E: Edge> ArrayGraph<N, E> {
    /// Creates an empty graph.
    pub fn new(directed: bool) -> Self {
        Self {
            directed,
            nodes: Vec::new(),
            edges: Vec::new(),
            outgoing: Vec::new(),
            incoming: Vec::new(),
            node_count: 0,
            edge_count: 0,
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

    fn slot(id: i64) -> Result<usize, GraphError> {
        usize::try_from(id).map_err(|_| GraphError::InvalidId(id))
    }

    fn contains_node(&self, id: i64) -> bool {
        usize::try_from(id)
            .ok()
            .and_then(|idx| self.nodes.get(idx))
            .is_some_and(Option::is_some)
    }

    fn outgoing_ids(&self, node_id: i64) -> &[i64] {
        usize::try_from(node_id)
            .ok()
            .and_then(|idx| self.outgoing.get(idx))
            .map_or(&[], Vec::as_slice)
    }

    fn incoming_ids(&self, node_id: i64) -> &[i64] {
        usize::try_from(node_id)
            .ok()
            .and_then(|idx| self.incoming.get(idx))
            .map_or(&[], Vec::as_slice)
    }
}

impl<N: Identifiable, E: Edge> Graph<N, E> for ArrayGraph<N, E> {
    fn is_directed(&self) -> bool {
        self.directed
    }

    fn add_node(&mut self, node: N) -> Result<(), GraphError> {
        let idx = Self::slot(node.id())?;
        if idx >= self.nodes.len() {
            self.nodes.resize_with(idx + 1, || None);
            self.outgoing.resize_with(idx + 1, Vec::new);
            self.incoming.resize_with(idx + 1, Vec::new);
        }
        if self.nodes[idx].is_some() {
            return Err(GraphError::DuplicateId(node.id()));
        }
        self.nodes[idx] = Some(node);
        self.node_count += 1;
        Ok(())
    }

    fn add_edge(&mut self, edge: E) -> Result<(), GraphError> {
        let edge_id = edge.id();
        let idx = Self::slot(edge_id)?;
        if self.edges.get(idx).is_some_and(Option::is_some) {
            return Err(GraphError::DuplicateId(edge_id));
        }
        let (source, target) = (edge.source_id(), edge.target_id());
        for node_id in [source, target] {
            if !self.contains_node(node_id) {
                return Err(GraphError::IncidentNodeMissing { edge_id, node_id });
            }
        }
        if idx >= self.edges.len() {
            self.edges.resize_with(idx + 1, || None);
        }
        self.edges[idx] = Some(edge);
        self.edge_count += 1;

        // contains_node above guarantees these slots exist
        let (src, tgt) = (source as usize, target as usize);
        self.outgoing[src].push(edge_id);
        self.incoming[tgt].push(edge_id);
        if !self.directed && src != tgt {
            self.outgoing[tgt].push(edge_id);
            self.incoming[src].push(edge_id);
        }
        Ok(())
    }

    fn node(&self, id: i64) -> Option<&N> {
        usize::try_from(id)
            .ok()
            .and_then(|idx| self.nodes.get(idx))
            .and_then(Option::as_ref)
    }

    fn node_mut(&mut self, id: i64) -> Option<&mut N> {
        usize::try_from(id)
            .ok()
            .and_then(|idx| self.nodes.get_mut(idx))
            .and_then(Option::as_mut)
    }

    fn edge(&self, id: i64) -> Option<&E> {
        usize::try_from(id)
            .ok()
            .and_then(|idx| self.edges.get(idx))
            .and_then(Option::as_ref)
    }

    fn node_count(&self) -> usize {
        self.node_count
    }

    fn edge_count(&self) -> usize {
        self.edge_count
    }

    fn nodes<'a>(&'a self) -> impl Iterator<Item = &'a N>
    where
        N: 'a,
    {
        self.nodes.iter().flatten()
    }

    fn edges<'a>(&'a self) -> impl Iterator<Item = &'a E>
    where
        E: 'a,
    {
        self.edges.iter().flatten()
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
        // Undirected storage already mirrors each edge into the outgoing
        // list of both endpoints; for directed graphs, self-loops would be
        // seen from both lists and are kept on the outgoing side only.
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
