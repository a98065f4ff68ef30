use petgraph::graph::{NodeIndex, UnGraph};

use crate::feature::graph::build_feature_graph;
use crate::feature::{Feature, FeatureId};
use crate::terrain::{Terrain, TerrainMap};

const DIRECTIONS: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Карта местности вместе с её разбиением на особенности
#[derive(Debug, Clone)]
pub struct Draft {
    width: usize,
    height: usize,
    features: Vec<Feature>,
    /// особенность каждой клетки, `y * width + x`
    owner: Vec<FeatureId>,
    graph: UnGraph<FeatureId, ()>,
}

impl Draft {
    pub fn new(terrain: &TerrainMap) -> Self {
        let (features, owner) = partition(terrain);
        let graph = build_feature_graph(&features, &owner, terrain.width, terrain.height);
        Self {
            width: terrain.width,
            height: terrain.height,
            features,
            owner,
            graph,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn feature(&self, id: FeatureId) -> &Feature {
        &self.features[id]
    }

    pub fn feature_at(&self, x: usize, y: usize) -> &Feature {
        &self.features[self.owner[y * self.width + x]]
    }

    pub fn graph(&self) -> &UnGraph<FeatureId, ()> {
        &self.graph
    }

    pub(crate) fn neighbors(&self, id: FeatureId) -> impl Iterator<Item = &Feature> {
        self.graph
            .neighbors(NodeIndex::new(id))
            .map(|n| &self.features[self.graph[n]])
    }

    /// Восстанавливает карту местности по блокам
    pub fn terrain(&self) -> TerrainMap {
        let mut data = vec![Terrain::Unassigned; self.width * self.height];
        for feature in &self.features {
            for block in feature.blocks() {
                data[block.row * self.width + block.col] = block.terrain;
            }
        }
        TerrainMap {
            width: self.width,
            height: self.height,
            data,
        }
    }

    /// Переписывает все клетки особенностей, удовлетворяющих `predicate`, в `replace`
    ///
    /// Остальные клетки копируются без изменений; сам `Draft` не меняется.
    pub fn cull<P>(&self, predicate: P, replace: Terrain) -> TerrainMap
    where
        P: Fn(&Feature) -> bool,
    {
        let mut result = self.terrain();
        for feature in self.features.iter().filter(|f| predicate(f)) {
            for block in feature.blocks() {
                result.set(block.col, block.row, replace);
            }
        }
        result
    }
}

/// Разметка связных компонент обходом в глубину
///
/// Клетка помечается посещённой при добавлении в стек, поэтому каждая клетка
/// попадает в стек ровно один раз — либо как корень, либо как найденный сосед.
fn partition(terrain: &TerrainMap) -> (Vec<Feature>, Vec<FeatureId>) {
    let width = terrain.width;
    let height = terrain.height;
    let mut visited = vec![false; width * height];
    let mut owner = vec![0; width * height];
    let mut features = Vec::new();
    let mut stack = Vec::new();

    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            if visited[idx] {
                continue;
            }

            let id = features.len();
            let start_terrain = terrain.data[idx];
            let mut feature = Feature::new(id, start_terrain);
            visited[idx] = true;
            stack.push((x, y));

            while let Some((cx, cy)) = stack.pop() {
                owner[cy * width + cx] = id;
                feature.push(cy, cx);

                for &(dx, dy) in &DIRECTIONS {
                    let (Some(nx), Some(ny)) =
                        (cx.checked_add_signed(dx), cy.checked_add_signed(dy))
                    else {
                        continue;
                    };
                    if nx >= width || ny >= height {
                        continue;
                    }
                    let nidx = ny * width + nx;
                    if !visited[nidx] && terrain.data[nidx] == start_terrain {
                        visited[nidx] = true;
                        stack.push((nx, ny));
                    }
                }
            }
            features.push(feature);
        }
    }
    (features, owner)
}
