use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::Automaton;
use crate::error::{MapGenError, Result};
use crate::terrain::{Terrain, TerrainMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellState {
    #[default]
    Dead,
    Alive,
}

/// Поведение краёв сетки по каждой оси
///
/// По умолчанию X зацикливается (мир непрерывен с запада на восток), Y ограничен (полюса).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topology {
    #[serde(default = "default_loop_x")]
    pub loop_x: bool,
    #[serde(default)]
    pub loop_y: bool,
}

fn default_loop_x() -> bool {
    true
}

impl Default for Topology {
    fn default() -> Self {
        Self {
            loop_x: true,
            loop_y: false,
        }
    }
}

const MOORE: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Двоичная сетка клеточного автомата
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    topology: Topology,
    cells: Vec<CellState>,
}

impl Grid {
    pub fn new(width: usize, height: usize, topology: Topology) -> Result<Self> {
        if width < 3 || height < 3 {
            return Err(MapGenError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            topology,
            cells: vec![CellState::Dead; width * height],
        })
    }

    /// Пустая сетка с топологией по умолчанию (цикл по X, без цикла по Y)
    pub fn empty(width: usize, height: usize) -> Result<Self> {
        Self::new(width, height, Topology::default())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    fn limit_x(&self, x: isize) -> usize {
        let w = self.width as isize;
        if self.topology.loop_x {
            x.rem_euclid(w) as usize
        } else {
            x.clamp(0, w - 1) as usize
        }
    }

    fn limit_y(&self, y: isize) -> usize {
        let h = self.height as isize;
        if self.topology.loop_y {
            y.rem_euclid(h) as usize
        } else {
            y.clamp(0, h - 1) as usize
        }
    }

    /// Значение клетки; координаты вне сетки нормализуются по топологии
    pub fn get(&self, x: isize, y: isize) -> CellState {
        self.cells[self.limit_y(y) * self.width + self.limit_x(x)]
    }

    pub fn set(&mut self, x: isize, y: isize, state: CellState) {
        let idx = self.limit_y(y) * self.width + self.limit_x(x);
        self.cells[idx] = state;
    }

    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c == CellState::Alive).count()
    }

    /// Число живых клеток среди 8 соседей (окрестность Мура)
    pub fn live_neighbors(&self, x: usize, y: usize) -> u8 {
        let (x, y) = (x as isize, y as isize);
        MOORE
            .iter()
            .filter(|&&(dx, dy)| self.get(x + dx, y + dy) == CellState::Alive)
            .count() as u8
    }

    fn evolve_cell(&self, automaton: &Automaton, idx: usize) -> CellState {
        let live = self.live_neighbors(idx % self.width, idx / self.width);
        automaton.evolve(self.cells[idx], live, idx)
    }

    /// Одно поколение: все клетки читают только текущую сетку, результат — новая сетка
    #[must_use]
    pub fn step(&self, automaton: &Automaton) -> Grid {
        #[cfg(feature = "parallel")]
        let cells = (0..self.cells.len())
            .into_par_iter()
            .map(|idx| self.evolve_cell(automaton, idx))
            .collect();
        #[cfg(not(feature = "parallel"))]
        let cells = (0..self.cells.len())
            .map(|idx| self.evolve_cell(automaton, idx))
            .collect();

        Grid {
            width: self.width,
            height: self.height,
            topology: self.topology,
            cells,
        }
    }

    /// Применяет автомат `iterations` раз
    #[must_use]
    pub fn run(&self, automaton: &Automaton, iterations: usize) -> Grid {
        (0..iterations).fold(self.clone(), |grid, _| grid.step(automaton))
    }

    /// Обнуляет полосу шириной `width` вдоль краёв незацикленных осей
    #[must_use]
    pub fn border(&self, width: usize) -> Grid {
        let mut output = self.clone();
        if width == 0 {
            return output;
        }
        for y in 0..self.height {
            for x in 0..self.width {
                let on_x_rim = !self.topology.loop_x && (x < width || x + width >= self.width);
                let on_y_rim = !self.topology.loop_y && (y < width || y + width >= self.height);
                if on_x_rim || on_y_rim {
                    output.cells[y * self.width + x] = CellState::Dead;
                }
            }
        }
        output
    }

    /// Засевает полярные шапки у краёв незацикленных осей
    ///
    /// Клетка на расстоянии `d < depth` от края оживает с вероятностью `1 - d / depth`:
    /// крайний ряд живой всегда, дальше шапка рвётся случайным образом.
    #[must_use]
    pub fn poles(&self, depth: usize, seed: u64) -> Grid {
        let mut output = self.clone();
        if depth == 0 {
            return output;
        }
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(seed);

        for y in 0..self.height {
            for x in 0..self.width {
                let mut distance = usize::MAX;
                if !self.topology.loop_y {
                    distance = distance.min(y.min(self.height - 1 - y));
                }
                if !self.topology.loop_x {
                    distance = distance.min(x.min(self.width - 1 - x));
                }
                if distance >= depth {
                    continue;
                }
                let chance = 1.0 - distance as f64 / depth as f64;
                if rng.gen_bool(chance) {
                    output.cells[y * self.width + x] = CellState::Alive;
                }
            }
        }
        output
    }

    /// Проецирует двоичную сетку на карту местности
    pub fn replace(&self, alive: Terrain, dead: Terrain) -> TerrainMap {
        TerrainMap {
            width: self.width,
            height: self.height,
            data: self
                .cells
                .iter()
                .map(|&c| if c == CellState::Alive { alive } else { dead })
                .collect(),
        }
    }
}
