// src/map/mod.rs
//! Итоговая карта города
//!
//! Финальная `TerrainMap` растеризуется в клетки по четыре треугольника.
//! Каждый треугольник получает местность (по таблице сглаживания углов),
//! покрытие `Land`, зону (только малоэтажная застройка) и объекты (деревья в лесу).

pub mod cell;
pub mod land;
pub mod png;
pub mod road;

pub use cell::{Cell, Point, Side, Tile};
pub use land::{Land, Structure, Zone};
pub use road::Road;

use serde::Serialize;

use crate::config::MapGenerationParams;
use crate::error::Result;
use crate::layers::{generate_terrain, generate_terrain_with};
use crate::smoothing;
use crate::terrain::{Terrain, TerrainMap};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Map {
    pub width: usize,
    pub height: usize,
    pub terrain: TerrainMap,
    /// Клетки построчно, `row * width + col`
    pub cells: Vec<Cell>,
    pub roads: Vec<Road>,
}

impl Map {
    /// Растеризует карту местности. `smooth_corners = false` даёт клетки одного типа целиком.
    pub fn from_terrain(terrain: TerrainMap, smooth_corners: bool) -> Self {
        let corners = if smooth_corners {
            smoothing::smooth
        } else {
            smoothing::flat
        };
        let mut cells = Vec::with_capacity(terrain.width * terrain.height);
        for row in 0..terrain.height {
            for col in 0..terrain.width {
                cells.push(Cell::from_corners(
                    col,
                    row,
                    corners(&terrain.orthogonal(col, row)),
                ));
            }
        }
        Self {
            width: terrain.width,
            height: terrain.height,
            terrain,
            cells,
            roads: Vec::new(),
        }
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn cell(&self, col: usize, row: usize) -> &Cell {
        &self.cells[row * self.width + col]
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.cells.iter().flat_map(|c| c.tiles.iter())
    }

    fn cell_index(&self, (x, y): Point) -> Option<usize> {
        if x < 0.0 || y < 0.0 {
            return None;
        }
        // правая и нижняя граница клетки принадлежит соседу, крайняя — последней клетке
        let col = (x as usize).min(self.width.saturating_sub(1));
        let row = (y as usize).min(self.height.saturating_sub(1));
        let index = row * self.width + col;
        self.cells
            .get(index)
            .filter(|cell| cell.contains((x, y)))
            .map(|_| index)
    }

    pub fn cell_at(&self, point: Point) -> Option<&Cell> {
        self.cell_index(point).map(|i| &self.cells[i])
    }

    pub fn tile_at(&self, point: Point) -> Option<&Tile> {
        self.cell_at(point)?.tile_at(point)
    }

    /// Перекрашивает треугольник под точкой. Исходная `terrain` не меняется.
    pub fn paint(&mut self, point: Point, terrain: Terrain) -> bool {
        let Some(index) = self.cell_index(point) else {
            return false;
        };
        let cell = &mut self.cells[index];
        let Some(side) = cell.tile_at(point).map(|t| t.side) else {
            return false;
        };
        cell.tile_mut(side).paint(terrain);
        true
    }

    pub fn add_road(&mut self, road: Road) {
        self.roads.push(road);
    }
}

/// Генерирует карту с топологией по умолчанию и сглаженными углами
pub fn generate_map(width: usize, height: usize, seed: u64) -> Result<Map> {
    let terrain = generate_terrain(width, height, seed)?;
    let map = Map::from_terrain(terrain, true);
    log_summary(&map);
    Ok(map)
}

pub fn generate_map_with(params: &MapGenerationParams) -> Result<Map> {
    let terrain = generate_terrain_with(params)?;
    let map = Map::from_terrain(terrain, params.smooth_corners);
    log_summary(&map);
    Ok(map)
}

fn log_summary(map: &Map) {
    let cells = (map.width * map.height) as f32;
    tracing::info!(
        target: "citygen::map",
        width = map.width,
        height = map.height,
        ocean = map.terrain.count(Terrain::Ocean) as f32 / cells,
        settlements = map.terrain.count(Terrain::LowDensity),
        trees = map.tiles().map(|t| t.structures.len()).sum::<usize>(),
        "map generated"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn island() -> TerrainMap {
        let mut terrain = TerrainMap::new(5, 5, Terrain::Ocean).unwrap();
        for y in 1..4 {
            for x in 1..4 {
                terrain.set(x, y, Terrain::Grass);
            }
        }
        terrain.set(2, 2, Terrain::Forest);
        terrain
    }

    #[test]
    fn one_cell_per_terrain_cell() {
        let map = Map::from_terrain(island(), true);
        assert_eq!(map.cells.len(), 25);
        assert_eq!(map.tiles().count(), 100);
        let cell = map.cell(3, 1);
        assert_eq!((cell.col, cell.row), (3, 1));
        assert!(map.roads.is_empty());
    }

    #[test]
    fn flat_mode_uses_cell_terrain() {
        let map = Map::from_terrain(island(), false);
        for cell in &map.cells {
            let center = map.terrain.get(cell.col, cell.row);
            assert!(cell.tiles.iter().all(|t| t.terrain == center));
        }
    }

    #[test]
    fn smoothing_rounds_island_corners() {
        let map = Map::from_terrain(island(), true);
        // угол острова: сверху и слева океан, он "заметнее" травы
        let corner = map.cell(1, 1).corners();
        assert_eq!(corner.top, Terrain::Ocean);
        assert_eq!(corner.left, Terrain::Ocean);
        assert_eq!(corner.right, Terrain::Grass);
        assert_eq!(corner.bottom, Terrain::Grass);
        // лес в центре окружён травой со всех сторон и поглощается ею
        assert!(map.cell(2, 2).tiles.iter().all(|t| t.terrain == Terrain::Grass));
    }

    #[test]
    fn hit_test_and_paint() {
        let mut map = Map::from_terrain(island(), false);
        assert_eq!(map.cell_at((2.5, 3.5)).map(|c| (c.col, c.row)), Some((2, 3)));
        assert!(map.cell_at((-0.5, 1.0)).is_none());
        assert!(map.cell_at((5.5, 1.0)).is_none());
        assert_eq!(map.tile_at((2.5, 3.1)).map(|t| t.side), Some(Side::Top));

        assert!(map.paint((1.5, 1.1), Terrain::Forest));
        let tile = map.cell(1, 1).tile(Side::Top);
        assert_eq!(tile.terrain, Terrain::Forest);
        assert_eq!(tile.structures.len(), 1);
        assert_eq!(map.terrain.get(1, 1), Terrain::Grass);
        assert!(!map.paint((9.0, 9.0), Terrain::Forest));
    }

    #[test]
    fn hit_test_on_far_edges() {
        let map = Map::from_terrain(island(), true);
        assert_eq!(map.cell_at((5.0, 5.0)).map(|c| (c.col, c.row)), Some((4, 4)));
        assert_eq!(map.cell_at((0.0, 0.0)).map(|c| (c.col, c.row)), Some((0, 0)));
        assert!(map.tile_at((5.0, 5.01)).is_none());
    }

    #[test]
    fn generated_map_has_no_roads_yet() {
        let mut map = generate_map(12, 10, 3).unwrap();
        assert!(map.roads.is_empty());
        map.add_road(Road::new("main", vec![(1.0, 1.0), (4.0, 1.0)]));
        assert_eq!(map.roads.len(), 1);
    }

    #[test]
    fn params_control_smoothing() {
        let params = MapGenerationParams {
            seed: 11,
            width: 20,
            height: 15,
            smooth_corners: false,
            ..MapGenerationParams::default()
        };
        let map = generate_map_with(&params).unwrap();
        assert_eq!(map.dimensions(), (20, 15));
        for cell in &map.cells {
            let center = map.terrain.get(cell.col, cell.row);
            assert!(cell.tiles.iter().all(|t| t.terrain == center));
        }
    }
}
