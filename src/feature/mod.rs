// src/feature/mod.rs
//! Разбиение карты местности на "особенности" — связные области одного типа
//!
//! ## Архитектура
//!
//! 1. **`Draft`** владеет всеми `Feature`, таблицей "клетка → feature" и графом смежности.
//! 2. **`Feature`** хранит свои `Block` и только индекс (`FeatureId`) — обратной ссылки на
//!    `Draft` нет, запросы смежности идут через `Draft`.
//! 3. **`Draft::cull`** — чистое преобразование: возвращает новую `TerrainMap`, не меняя `Draft`.
//!
//! Связность — 4 соседа, без зацикливания по краям карты.

pub mod draft;
pub mod graph;

pub use draft::Draft;

use crate::terrain::Terrain;

/// Индекс особенности в `Draft::features()`
pub type FeatureId = usize;

/// Одна клетка карты внутри особенности
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub terrain: Terrain,
    pub row: usize,
    pub col: usize,
}

/// Максимальная 4-связная область клеток с одинаковой местностью
#[derive(Debug, Clone)]
pub struct Feature {
    id: FeatureId,
    terrain: Terrain,
    blocks: Vec<Block>,
}

impl Feature {
    pub(crate) fn new(id: FeatureId, terrain: Terrain) -> Self {
        Self {
            id,
            terrain,
            blocks: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, row: usize, col: usize) {
        self.blocks.push(Block {
            terrain: self.terrain,
            row,
            col,
        });
    }

    pub fn id(&self) -> FeatureId {
        self.id
    }

    pub fn terrain(&self) -> Terrain {
        self.terrain
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Число клеток
    pub fn size(&self) -> usize {
        self.blocks.len()
    }

    /// Соседние особенности (через общую сторону клетки), каждая ровно один раз
    pub fn adjacent_features<'d>(&self, draft: &'d Draft) -> impl Iterator<Item = &'d Feature> {
        draft.neighbors(self.id)
    }

    pub fn is_adjacent_to(&self, draft: &Draft, terrain: Terrain) -> bool {
        self.adjacent_features(draft).any(|f| f.terrain == terrain)
    }
}
