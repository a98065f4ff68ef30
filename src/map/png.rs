// src/map/png.rs
//! Отрисовка карты в PNG
//!
//! Два вида: покрытие (треугольники, деревья, дороги) и зоны застройки.

use image::{ImageBuffer, Rgba, RgbaImage};
use imageproc::drawing::{
    draw_filled_circle_mut, draw_filled_rect_mut, draw_line_segment_mut, draw_polygon_mut,
};
use imageproc::point::Point as PixelPoint;
use imageproc::rect::Rect;

use super::{Land, Map, Point, Side, Tile, Zone};
use crate::error::{MapGenError, Result};
use crate::terrain::Terrain;

const ROAD_COLOR: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Цвет треугольника без зоны на карте зон
pub const NO_ZONE_COLOR: [u8; 4] = [130, 130, 130, 255];

/// Вершины треугольника в пикселях
///
/// Углы клетки лежат на границе `cell_size`-сетки и общие с соседями, центр строго внутри,
/// поэтому при `cell_size >= 2` вершины треугольника всегда различны.
fn pixel_triangle(side: Side, col: usize, row: usize, cell_size: u32) -> [PixelPoint<i32>; 3] {
    let size = cell_size as i32;
    let x0 = col as i32 * size;
    let y0 = row as i32 * size;
    let x1 = x0 + size;
    let y1 = y0 + size;
    let center = PixelPoint::new(x0 + size / 2, y0 + size / 2);
    match side {
        Side::Top => [center, PixelPoint::new(x0, y0), PixelPoint::new(x1, y0)],
        Side::Right => [center, PixelPoint::new(x1, y0), PixelPoint::new(x1, y1)],
        Side::Bottom => [center, PixelPoint::new(x1, y1), PixelPoint::new(x0, y1)],
        Side::Left => [center, PixelPoint::new(x0, y1), PixelPoint::new(x0, y0)],
    }
}

fn to_pixels((x, y): Point, cell_size: u32) -> (f32, f32) {
    (x * cell_size as f32, y * cell_size as f32)
}

fn zone_color(zone: Option<&Zone>) -> [u8; 4] {
    zone.map_or(NO_ZONE_COLOR, |z| z.color)
}

impl Map {
    /// Пустой холст под карту; размер проверяется до выделения буфера
    fn canvas(&self, cell_size: u32) -> Result<RgbaImage> {
        if cell_size < 2 {
            return Err(MapGenError::InvalidCellSize(cell_size));
        }
        let too_large = || MapGenError::ImageTooLarge {
            width: self.width,
            height: self.height,
            cell_size,
        };
        let width = u32::try_from(self.width)
            .ok()
            .and_then(|w| w.checked_mul(cell_size))
            .ok_or_else(too_large)?;
        let height = u32::try_from(self.height)
            .ok()
            .and_then(|h| h.checked_mul(cell_size))
            .ok_or_else(too_large)?;
        (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(4))
            .ok_or_else(too_large)?;
        Ok(ImageBuffer::new(width, height))
    }

    /// Заливает клетки: подложка по местности центра, затем четыре треугольника
    fn draw_tiles(
        &self,
        img: &mut RgbaImage,
        cell_size: u32,
        background: impl Fn(Terrain) -> [u8; 4],
        fill: impl Fn(&Tile) -> [u8; 4],
    ) {
        for cell in &self.cells {
            // подложка закрывает пиксели на стыках треугольников
            draw_filled_rect_mut(
                img,
                Rect::at(cell.col as i32 * cell_size as i32, cell.row as i32 * cell_size as i32)
                    .of_size(cell_size, cell_size),
                Rgba(background(self.terrain.get(cell.col, cell.row))),
            );
            for tile in &cell.tiles {
                let triangle = pixel_triangle(tile.side, cell.col, cell.row, cell_size);
                draw_polygon_mut(img, &triangle, Rgba(fill(tile)));
            }
        }
    }

    /// Рисует карту: `cell_size` пикселей на клетку
    ///
    /// Порядок слоёв: треугольники местности → объекты → дороги.
    pub fn to_rgba_image(&self, cell_size: u32) -> Result<RgbaImage> {
        let mut img = self.canvas(cell_size)?;
        self.draw_tiles(
            &mut img,
            cell_size,
            |t| Land::for_terrain(t).color,
            |tile| tile.land.color,
        );

        for structure in self.tiles().flat_map(|t| t.structures.iter()) {
            let (x, y) = to_pixels(structure.position(), cell_size);
            let radius = (structure.radius() * cell_size as f32).round().max(1.0) as i32;
            draw_filled_circle_mut(
                &mut img,
                (x.round() as i32, y.round() as i32),
                radius,
                Rgba(structure.color()),
            );
        }

        for road in &self.roads {
            for (from, to) in road.segments() {
                draw_line_segment_mut(
                    &mut img,
                    to_pixels(from, cell_size),
                    to_pixels(to, cell_size),
                    ROAD_COLOR,
                );
            }
        }

        Ok(img)
    }

    /// Карта зон: треугольник цвета своей зоны, без зоны — [`NO_ZONE_COLOR`]
    pub fn to_zone_image(&self, cell_size: u32) -> Result<RgbaImage> {
        let mut img = self.canvas(cell_size)?;
        self.draw_tiles(
            &mut img,
            cell_size,
            |t| zone_color(Zone::for_terrain(t).as_ref()),
            |tile| zone_color(tile.zone.as_ref()),
        );
        Ok(img)
    }

    pub fn save_as_png(&self, path: impl AsRef<std::path::Path>, cell_size: u32) -> Result<()> {
        self.to_rgba_image(cell_size)?.save(path)?;
        Ok(())
    }

    pub fn save_zones_as_png(&self, path: impl AsRef<std::path::Path>, cell_size: u32) -> Result<()> {
        self.to_zone_image(cell_size)?.save(path)?;
        Ok(())
    }
}
