// src/automaton/mod.rs
//! Клеточные автоматы для генерации слоёв местности
//!
//! - [`Grid`] — двоичная сетка с настраиваемой топологией краёв (зацикливание по осям)
//! - [`Automaton`] — пара правил рождения/выживания над числом живых соседей
//! - [`Rule`] — предикат над числом соседей (маска значений или случайный)
//!
//! Все операции чистые: каждый шаг строит новую сетку, читая только предыдущее поколение.

pub mod grid;
pub mod rule;

pub use grid::{CellState, Grid, Topology};
pub use rule::Rule;

use crate::error::Result;

/// Правило эволюции клетки: рождение мёртвой и выживание живой
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Automaton {
    pub born: Rule,
    pub survive: Rule,
}

impl Automaton {
    pub const fn new(born: Rule, survive: Rule) -> Self {
        Self { born, survive }
    }

    /// B3/S345678 — медленный рост "кораллов" из редких семян
    pub const fn coral() -> Self {
        Self::new(Rule::exactly(3), Rule::at_least(3))
    }

    /// B5678/S45678 — сглаживание краёв
    pub const fn smooth() -> Self {
        Self::new(Rule::at_least(5), Rule::at_least(4))
    }

    /// B35678/S4678
    pub fn holstein() -> Self {
        Self::new(
            Rule::exactly(3).or(Rule::at_least(5)),
            Rule::exactly(4).or(Rule::at_least(6)),
        )
    }

    pub fn bugs() -> Self {
        Self::new(
            Rule::at_least(3).except(&[4, 8]),
            Rule::exactly(1).or(Rule::at_least(5)),
        )
    }

    /// Голосование большинством
    pub const fn vote() -> Self {
        Self::new(Rule::at_least(5), Rule::at_least(4))
    }

    /// Случайное заполнение: мёртвая клетка оживает с вероятностью `density`, живые не умирают
    pub fn random(density: f64, seed: u64) -> Result<Self> {
        Ok(Self::new(Rule::chance(density, seed)?, Rule::always()))
    }

    /// Клетка, у которой меньше `min_same` соседей в том же состоянии, меняет состояние
    pub const fn remove_lonely(min_same: u8) -> Self {
        // мёртвая клетка одинока, когда мёртвых соседей (8 - live) меньше min_same
        let born = if min_same == 0 {
            Rule::never()
        } else if min_same > 9 {
            Rule::always()
        } else {
            Rule::at_least(9 - min_same)
        };
        Self::new(born, Rule::at_least(min_same))
    }

    /// Заполняет мёртвые клетки, окружённые не менее чем `threshold` живыми
    pub const fn fill(threshold: u8) -> Self {
        Self::new(Rule::at_least(threshold), Rule::always())
    }

    pub fn evolve(&self, cell: CellState, live: u8, index: usize) -> CellState {
        let alive = match cell {
            CellState::Alive => self.survive.test(live, index),
            CellState::Dead => self.born.test(live, index),
        };
        if alive {
            CellState::Alive
        } else {
            CellState::Dead
        }
    }
}
