//! Layered feed-forward layout.
//!
//! Nodes live in a flat arena ordered layer by layer; edges refer to them by
//! [`NodeId`]. Edges are generated in source order, so every node's outgoing
//! edges form one contiguous range of the edge list.

use core::ops::Range;

use crate::geometry::{CanvasSize, Point};
use crate::prng::Prng;

/// Radius of every node disc, in pixels.
pub const NODE_RADIUS: f64 = 8.0;

/// Index into [`Topology::nodes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub pos: Point,
    pub layer: usize,
    /// Position within the layer, top to bottom.
    pub index: usize,
    pub radius: f64,
    /// Copy of the activations table entry, refreshed by the sync step.
    pub activation: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    source: NodeId,
    target: NodeId,
    weight: f64,
    pub signal_active: bool,
    /// Fraction of the way from source to target; in `[0, 1)`.
    pub animation_progress: f64,
}

impl Edge {
    fn new(source: NodeId, target: NodeId, weight: f64) -> Self {
        Self {
            source,
            target,
            weight,
            signal_active: false,
            animation_progress: 0.0,
        }
    }

    #[inline]
    pub fn source(&self) -> NodeId {
        self.source
    }

    #[inline]
    pub fn target(&self) -> NodeId {
        self.target
    }

    /// Fixed at creation, in `[-1, 1]`.
    #[inline]
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Start a signal at the source end.
    #[inline]
    pub fn fire(&mut self) {
        self.signal_active = true;
        self.animation_progress = 0.0;
    }

    /// Start a signal unless one is already travelling.
    #[inline]
    pub fn fire_if_idle(&mut self) {
        if !self.signal_active {
            self.fire();
        }
    }
}

/// Neuron count per layer. Input and output layers are drawn narrower.
pub fn layer_sizes(layers: usize, neurons: usize) -> Vec<usize> {
    let edge_layer = ((neurons as f64 / 1.5).floor() as usize).max(2);
    (0..layers)
        .map(|l| {
            if l == 0 || l + 1 == layers {
                edge_layer
            } else {
                neurons
            }
        })
        .collect()
}

/// One generation of nodes, edges and the activations table.
///
/// Never patched in place: a parameter change that affects the layout builds
/// a new `Topology` and drops the old one.
#[derive(Debug, Clone)]
pub struct Topology {
    pub(crate) nodes: Vec<Node>,
    pub(crate) edges: Vec<Edge>,
    /// Authoritative activation values, `[layer][index]`.
    pub(crate) activations: Vec<Vec<f64>>,
    /// `layer_offsets[l]..layer_offsets[l + 1]` are the arena slots of layer `l`.
    layer_offsets: Vec<usize>,
    /// Outgoing edge range per node.
    outgoing: Vec<Range<usize>>,
    canvas: CanvasSize,
}

impl Topology {
    pub fn build(layers: usize, neurons: usize, canvas: CanvasSize, rng: &mut Prng) -> Self {
        let canvas = canvas.sanitized();
        let sizes = layer_sizes(layers, neurons);

        let mut layer_offsets = Vec::with_capacity(sizes.len() + 1);
        layer_offsets.push(0);
        for &n in &sizes {
            let last = *layer_offsets.last().unwrap_or(&0);
            layer_offsets.push(last + n);
        }
        let node_count = *layer_offsets.last().unwrap_or(&0);

        let layer_spacing = canvas.width / (layers as f64 + 1.0);
        let mut nodes = Vec::with_capacity(node_count);
        let mut activations = Vec::with_capacity(sizes.len());
        for (layer, &in_layer) in sizes.iter().enumerate() {
            let neuron_spacing = canvas.height / (in_layer as f64 + 1.0);
            let x = (layer as f64 + 1.0) * layer_spacing;
            for index in 0..in_layer {
                nodes.push(Node {
                    pos: Point::new(x, (index as f64 + 1.0) * neuron_spacing),
                    layer,
                    index,
                    radius: NODE_RADIUS,
                    activation: 0.0,
                });
            }
            activations.push(vec![0.0; in_layer]);
        }

        let edge_count: usize = sizes.windows(2).map(|w| w[0] * w[1]).sum();
        let mut edges = Vec::with_capacity(edge_count);
        let mut outgoing = Vec::with_capacity(node_count);
        for (i, node) in nodes.iter().enumerate() {
            let start = edges.len();
            if node.layer + 1 < sizes.len() {
                let next = layer_offsets[node.layer + 1]..layer_offsets[node.layer + 2];
                for j in next {
                    let weight = rng.gen_range_f64(-1.0, 1.0);
                    edges.push(Edge::new(NodeId(i as u32), NodeId(j as u32), weight));
                }
            }
            outgoing.push(start..edges.len());
        }

        tracing::debug!(
            layers,
            nodes = nodes.len(),
            edges = edges.len(),
            "topology built"
        );

        Self {
            nodes,
            edges,
            activations,
            layer_offsets,
            outgoing,
            canvas,
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Only signal state is writable; endpoints and weight are fixed at build time.
    pub fn edges_mut(&mut self) -> &mut [Edge] {
        &mut self.edges
    }

    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    pub fn layer_count(&self) -> usize {
        self.layer_offsets.len().saturating_sub(1)
    }

    pub fn layer_len(&self, layer: usize) -> usize {
        self.activations.get(layer).map_or(0, Vec::len)
    }

    pub fn layer_nodes(&self, layer: usize) -> &[Node] {
        match (self.layer_offsets.get(layer), self.layer_offsets.get(layer + 1)) {
            (Some(&a), Some(&b)) => &self.nodes[a..b],
            _ => &[],
        }
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn node_id(&self, layer: usize, index: usize) -> Option<NodeId> {
        if index >= self.layer_len(layer) {
            return None;
        }
        Some(NodeId((self.layer_offsets[layer] + index) as u32))
    }

    /// Edge-list range holding the edges that leave `id`.
    pub fn outgoing(&self, id: NodeId) -> Range<usize> {
        self.outgoing.get(id.index()).cloned().unwrap_or(0..0)
    }

    pub fn activation(&self, layer: usize, index: usize) -> Option<f64> {
        self.activations.get(layer)?.get(index).copied()
    }

    pub fn activations(&self) -> &[Vec<f64>] {
        &self.activations
    }

    /// Write the table entry for `(layer, index)`, clamped to `[0, 1]` (NaN
    /// reads as 0). Ignored when out of range.
    pub fn set_activation(&mut self, layer: usize, index: usize, value: f64) {
        if let Some(slot) = self
            .activations
            .get_mut(layer)
            .and_then(|row| row.get_mut(index))
        {
            *slot = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
        }
    }

    /// Copy the activations table into every node.
    pub fn sync_nodes(&mut self) {
        for node in &mut self.nodes {
            if let Some(&a) = self
                .activations
                .get(node.layer)
                .and_then(|row| row.get(node.index))
            {
                node.activation = a;
            }
        }
    }

    /// Zero the table and every node's copy. In-flight signals are untouched.
    pub fn reset_activations(&mut self) {
        for row in &mut self.activations {
            row.iter_mut().for_each(|a| *a = 0.0);
        }
        for node in &mut self.nodes {
            node.activation = 0.0;
        }
    }

    /// Endpoint positions; an id from another topology resolves to the origin.
    pub fn endpoints(&self, edge: &Edge) -> (Point, Point) {
        let pos = |id: NodeId| self.node(id).map_or(Point::default(), |n| n.pos);
        (pos(edge.source), pos(edge.target))
    }

    /// Where the travelling signal is drawn.
    pub fn signal_position(&self, edge: &Edge) -> Point {
        let (a, b) = self.endpoints(edge);
        a.lerp(b, edge.animation_progress)
    }

    pub fn active_signal_count(&self) -> usize {
        self.edges.iter().filter(|e| e.signal_active).count()
    }

    pub fn mean_activation(&self) -> f64 {
        if self.nodes.is_empty() {
            return 0.0;
        }
        self.nodes.iter().map(|n| n.activation).sum::<f64>() / self.nodes.len() as f64
    }
}
