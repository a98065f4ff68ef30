// src/feature/graph.rs
use crate::feature::{Feature, FeatureId};
use petgraph::graph::UnGraph;
use std::collections::HashSet;

/// Строит граф смежности особенностей: ребро — общая сторона хотя бы у одной пары клеток
///
/// `owner[y * width + x]` — особенность, которой принадлежит клетка.
/// Узел `i` графа соответствует особенности с id `i`.
pub fn build_feature_graph(
    features: &[Feature],
    owner: &[FeatureId],
    width: usize,
    height: usize,
) -> UnGraph<FeatureId, ()> {
    let mut graph = UnGraph::with_capacity(features.len(), features.len() * 2);
    let nodes: Vec<_> = features.iter().map(|f| graph.add_node(f.id())).collect();

    // достаточно смотреть вправо и вниз: каждая общая сторона встретится один раз
    let directions = [(1, 0), (0, 1)];
    let mut edges = HashSet::new();

    for feature in features {
        for block in feature.blocks() {
            for &(dx, dy) in &directions {
                let nx = block.col + dx;
                let ny = block.row + dy;
                if nx >= width || ny >= height {
                    continue;
                }
                let n_id = owner[ny * width + nx];
                if n_id == feature.id() {
                    continue;
                }
                let (a, b) = if feature.id() < n_id {
                    (feature.id(), n_id)
                } else {
                    (n_id, feature.id())
                };
                if edges.insert((a, b)) {
                    graph.add_edge(nodes[a], nodes[b], ());
                }
            }
        }
    }
    graph
}
