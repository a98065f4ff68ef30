use serde::{Deserialize, Serialize};

use crate::error::{MapGenError, Result};
use crate::feature::Draft;

/// Тип местности клетки.
///
/// Порядок объявления значим: сравнение (`>`) задаёт приоритет при сглаживании углов,
/// "более заметная" местность (горы, океан) затекает в соседние клетки, а не наоборот.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum Terrain {
    #[default]
    Unassigned,
    Beach,
    Grass,
    Forest,
    LowDensity,
    HighDensity,
    Lake,
    Mountain,
    Ocean,
    River,
    Icecap,
}

impl Terrain {
    pub const ALL: [Terrain; 11] = [
        Terrain::Unassigned,
        Terrain::Beach,
        Terrain::Grass,
        Terrain::Forest,
        Terrain::LowDensity,
        Terrain::HighDensity,
        Terrain::Lake,
        Terrain::Mountain,
        Terrain::Ocean,
        Terrain::River,
        Terrain::Icecap,
    ];

    pub fn to_rgb(self) -> [u8; 3] {
        match self {
            Terrain::Unassigned => [0, 0, 0],
            Terrain::Beach => [255, 216, 146],
            Terrain::Grass => [0, 228, 48],
            Terrain::Forest => [0, 117, 44],
            Terrain::LowDensity => [130, 130, 130],
            Terrain::HighDensity => [80, 80, 80],
            Terrain::Lake => [88, 88, 255],
            Terrain::Mountain => [200, 200, 200],
            Terrain::Ocean => [0, 82, 172],
            Terrain::River => [0, 121, 241],
            Terrain::Icecap => [255, 255, 255],
        }
    }

    /// Водные типы: на них нельзя строить, и они не дают структур
    pub fn is_water(self) -> bool {
        matches!(
            self,
            Terrain::Lake | Terrain::Ocean | Terrain::River | Terrain::Icecap
        )
    }
}

/// Центр клетки и четыре ортогональных соседа (диагонали не учитываются)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Orthogonal {
    pub center: Terrain,
    pub top: Terrain,
    pub right: Terrain,
    pub bottom: Terrain,
    pub left: Terrain,
}

/// Двумерная карта местности, `y * width + x`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TerrainMap {
    pub(crate) width: usize,
    pub(crate) height: usize,
    pub(crate) data: Vec<Terrain>,
}

impl TerrainMap {
    pub fn new(width: usize, height: usize, fill: Terrain) -> Result<Self> {
        Self::from_data(width, height, vec![fill; width * height])
    }

    /// Карта из готовых данных построчно; длина должна быть ровно `width * height`
    pub fn from_data(width: usize, height: usize, data: Vec<Terrain>) -> Result<Self> {
        if width < 3 || height < 3 {
            return Err(MapGenError::InvalidDimensions { width, height });
        }
        if data.len() != width * height {
            return Err(MapGenError::DataLength {
                expected: width * height,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn data(&self) -> &[Terrain] {
        &self.data
    }

    pub fn get(&self, x: usize, y: usize) -> Terrain {
        self.data[y * self.width + x]
    }

    pub fn set(&mut self, x: usize, y: usize, terrain: Terrain) {
        self.data[y * self.width + x] = terrain;
    }

    /// Доступ с ограничением координат по краям карты
    pub fn get_clamped(&self, x: isize, y: isize) -> Terrain {
        let x = x.clamp(0, self.width as isize - 1) as usize;
        let y = y.clamp(0, self.height as isize - 1) as usize;
        self.get(x, y)
    }

    pub fn count(&self, terrain: Terrain) -> usize {
        self.data.iter().filter(|&&t| t == terrain).count()
    }

    pub fn orthogonal(&self, x: usize, y: usize) -> Orthogonal {
        let (x, y) = (x as isize, y as isize);
        Orthogonal {
            center: self.get_clamped(x, y),
            top: self.get_clamped(x, y - 1),
            right: self.get_clamped(x + 1, y),
            bottom: self.get_clamped(x, y + 1),
            left: self.get_clamped(x - 1, y),
        }
    }

    /// 8 соседей в порядке строк: верхний ряд, левый/правый, нижний ряд
    pub fn moore(&self, x: usize, y: usize) -> [Terrain; 8] {
        let (x, y) = (x as isize, y as isize);
        [
            self.get_clamped(x - 1, y - 1),
            self.get_clamped(x, y - 1),
            self.get_clamped(x + 1, y - 1),
            self.get_clamped(x - 1, y),
            self.get_clamped(x + 1, y),
            self.get_clamped(x - 1, y + 1),
            self.get_clamped(x, y + 1),
            self.get_clamped(x + 1, y + 1),
        ]
    }

    /// Накладывает `overlay` поверх карты: в клетке побеждает слой, если его значение входит в `mask`
    ///
    /// Порядок вызовов задаёт приоритет слоёв — последний наложенный слой выигрывает.
    pub fn cover(&self, overlay: &TerrainMap, mask: &[Terrain]) -> TerrainMap {
        debug_assert_eq!((self.width, self.height), (overlay.width, overlay.height));
        let data = self
            .data
            .iter()
            .zip(&overlay.data)
            .map(|(&base, &top)| if mask.contains(&top) { top } else { base })
            .collect();
        TerrainMap {
            width: self.width,
            height: self.height,
            data,
        }
    }

    /// Прокладывает линию: клетка получает `terrain`, если она ближе `width` к одной из точек
    ///
    /// Точки задаются в координатах клеток; точки за пределами карты просто ничего не задевают.
    pub fn line(&self, terrain: Terrain, points: &[(f32, f32)], width: f32) -> TerrainMap {
        let reach = width * width;
        let mut output = self.clone();
        for y in 0..self.height {
            for x in 0..self.width {
                let (cx, cy) = (x as f32, y as f32);
                let hit = points.iter().any(|&(px, py)| {
                    let (dx, dy) = (cx - px, cy - py);
                    dx * dx + dy * dy < reach
                });
                if hit {
                    output.set(x, y, terrain);
                }
            }
        }
        output
    }

    /// Убирает одиночные клетки: если среди 8 соседей меньше `min_same` таких же,
    /// клетка принимает самый частый тип соседей.
    ///
    /// При равенстве частот выигрывает тип, встреченный среди соседей позже остальных.
    pub fn remove_lonely(&self, min_same: usize) -> TerrainMap {
        let mut data = Vec::with_capacity(self.data.len());
        for y in 0..self.height {
            for x in 0..self.width {
                let cell = self.get(x, y);
                let adjacent = self.moore(x, y);
                let same = adjacent.iter().filter(|&&t| t == cell).count();
                if same >= min_same {
                    data.push(cell);
                    continue;
                }

                // (тип, количество) в порядке первого появления
                let mut counts: Vec<(Terrain, usize)> = Vec::with_capacity(8);
                for &t in &adjacent {
                    match counts.iter_mut().find(|(seen, _)| *seen == t) {
                        Some((_, n)) => *n += 1,
                        None => counts.push((t, 1)),
                    }
                }
                let dominant = counts
                    .iter()
                    .max_by_key(|&&(_, n)| n)
                    .map_or(cell, |&(t, _)| t);
                data.push(dominant);
            }
        }
        TerrainMap {
            width: self.width,
            height: self.height,
            data,
        }
    }

    pub fn to_draft(&self) -> Draft {
        Draft::new(self)
    }

    pub fn to_rgba_image(&self) -> Vec<u8> {
        self.data
            .iter()
            .flat_map(|&t| {
                let rgb = t.to_rgb();
                [rgb[0], rgb[1], rgb[2], 255]
            })
            .collect()
    }

    pub fn save_as_png(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let img: image::ImageBuffer<image::Rgba<u8>, Vec<u8>> = image::ImageBuffer::from_raw(
            self.width as u32,
            self.height as u32,
            self.to_rgba_image(),
        )
        .ok_or(MapGenError::ImageBuffer)?;
        img.save(path)?;
        Ok(())
    }
}
