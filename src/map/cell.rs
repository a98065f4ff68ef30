// src/map/cell.rs
//! Клетка карты: четыре треугольника, сходящиеся в центре
//!
//! Координаты — в единицах клеток: клетка `(col, row)` занимает квадрат
//! `[col, col + 1] × [row, row + 1]`, центр в `(col + 0.5, row + 0.5)`.

use serde::Serialize;

use super::land::{Land, Structure, Zone};
use crate::smoothing::Corners;
use crate::terrain::Terrain;

pub type Point = (f32, f32);

/// Сторона клетки, к которой примыкает треугольник
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    /// Порядок совпадает с [`Corners::to_array`]
    pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

    /// Вершины треугольника: центр клетки и два угла стороны
    pub fn triangle(self, col: usize, row: usize) -> [Point; 3] {
        let (x0, y0) = (col as f32, row as f32);
        let (x1, y1) = (x0 + 1.0, y0 + 1.0);
        let center = (x0 + 0.5, y0 + 0.5);
        match self {
            Side::Top => [center, (x0, y0), (x1, y0)],
            Side::Right => [center, (x1, y0), (x1, y1)],
            Side::Bottom => [center, (x1, y1), (x0, y1)],
            Side::Left => [center, (x0, y1), (x0, y0)],
        }
    }
}

/// Треугольник клетки с назначенной местностью
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tile {
    pub side: Side,
    pub terrain: Terrain,
    pub land: Land,
    pub zone: Option<Zone>,
    pub structures: Vec<Structure>,
    #[serde(skip)]
    vertices: [Point; 3],
}

impl Tile {
    pub fn new(col: usize, row: usize, side: Side, terrain: Terrain) -> Self {
        let mut tile = Self {
            side,
            terrain,
            land: Land::for_terrain(Terrain::Unassigned),
            zone: None,
            structures: Vec::new(),
            vertices: side.triangle(col, row),
        };
        tile.paint(terrain);
        tile
    }

    /// Перекрашивает треугольник: покрытие, зона и объекты пересчитываются по местности
    pub fn paint(&mut self, terrain: Terrain) {
        self.terrain = terrain;
        self.land = Land::for_terrain(terrain);
        self.zone = Zone::for_terrain(terrain);
        let centroid = self.centroid();
        self.structures = Structure::for_terrain(terrain);
        for structure in &mut self.structures {
            structure.set_position(centroid);
        }
    }

    pub fn vertices(&self) -> [Point; 3] {
        self.vertices
    }

    pub fn centroid(&self) -> Point {
        let [a, b, c] = self.vertices;
        ((a.0 + b.0 + c.0) / 3.0, (a.1 + b.1 + c.1) / 3.0)
    }

    /// Попадание точки в треугольник (границы включительно)
    pub fn contains(&self, point: Point) -> bool {
        let [a, b, c] = self.vertices;
        let cross = |p: Point, q: Point| (q.0 - p.0) * (point.1 - p.1) - (q.1 - p.1) * (point.0 - p.0);
        let d1 = cross(a, b);
        let d2 = cross(b, c);
        let d3 = cross(c, a);
        let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
        let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
        !(has_neg && has_pos)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cell {
    pub col: usize,
    pub row: usize,
    /// `[top, right, bottom, left]`
    pub tiles: [Tile; 4],
}

impl Cell {
    pub fn from_corners(col: usize, row: usize, corners: Corners) -> Self {
        let [top, right, bottom, left] = corners.to_array();
        Self {
            col,
            row,
            tiles: [
                Tile::new(col, row, Side::Top, top),
                Tile::new(col, row, Side::Right, right),
                Tile::new(col, row, Side::Bottom, bottom),
                Tile::new(col, row, Side::Left, left),
            ],
        }
    }

    pub fn tile(&self, side: Side) -> &Tile {
        &self.tiles[side as usize]
    }

    pub fn tile_mut(&mut self, side: Side) -> &mut Tile {
        &mut self.tiles[side as usize]
    }

    pub fn corners(&self) -> Corners {
        Corners::from_array(self.tiles.each_ref().map(|t| t.terrain))
    }

    pub fn contains(&self, (x, y): Point) -> bool {
        let (x0, y0) = (self.col as f32, self.row as f32);
        (x0..=x0 + 1.0).contains(&x) && (y0..=y0 + 1.0).contains(&y)
    }

    pub fn tile_at(&self, point: Point) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.contains(point))
    }
}
