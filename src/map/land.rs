use serde::Serialize;

use crate::terrain::Terrain;

/// Покрытие треугольника: цвет и можно ли на нём строить
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Land {
    pub color: [u8; 4],
    pub buildable: bool,
}

impl Land {
    pub fn for_terrain(terrain: Terrain) -> Self {
        let [r, g, b] = terrain.to_rgb();
        let buildable = !terrain.is_water()
            && !matches!(terrain, Terrain::Mountain | Terrain::Unassigned);
        Self {
            color: [r, g, b, 255],
            buildable,
        }
    }
}

/// Зона застройки. Назначается только треугольникам малоэтажной застройки.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Zone {
    pub color: [u8; 4],
    pub name: String,
}

impl Zone {
    pub fn residential() -> Self {
        Self {
            color: [255, 203, 0, 255],
            name: "Residential".to_string(),
        }
    }

    pub fn for_terrain(terrain: Terrain) -> Option<Self> {
        (terrain == Terrain::LowDensity).then(Self::residential)
    }
}

/// Радиус дерева в долях клетки
pub const TREE_RADIUS: f32 = 0.3;

/// Объект на треугольнике. Позиция — в координатах клеток, её выставляет треугольник-владелец.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum Structure {
    Tree { position: (f32, f32) },
}

impl Structure {
    pub fn tree() -> Self {
        Structure::Tree {
            position: (0.0, 0.0),
        }
    }

    /// Объекты, которые растут на данном типе местности
    pub fn for_terrain(terrain: Terrain) -> Vec<Self> {
        match terrain {
            Terrain::Forest => vec![Self::tree()],
            _ => Vec::new(),
        }
    }

    pub fn position(&self) -> (f32, f32) {
        match *self {
            Structure::Tree { position } => position,
        }
    }

    pub fn set_position(&mut self, position: (f32, f32)) {
        match self {
            Structure::Tree { position: p } => *p = position,
        }
    }

    pub fn color(&self) -> [u8; 4] {
        match self {
            Structure::Tree { .. } => [135, 60, 190, 255],
        }
    }

    pub fn radius(&self) -> f32 {
        match self {
            Structure::Tree { .. } => TREE_RADIUS,
        }
    }
}
