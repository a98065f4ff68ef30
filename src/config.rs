// src/config.rs
//! Конфигурация генерации карты
//!
//! Параметры слоёв (плотности, цепочки автоматов) зашиты в [`crate::layers`] и здесь
//! не настраиваются. Конфигурация задаёт только то, что выбирает встраивающее приложение:
//! - сид и размеры карты;
//! - топологию краёв (зацикливание по осям);
//! - режим отрисовки клеток (сглаживание углов, размер клетки в пикселях).
//!
//! Все структуры поддерживают загрузку из TOML.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::automaton::Topology;
use crate::error::{MapGenError, Result};

/// Основные параметры генерации карты
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MapGenerationParams {
    /// Сид генератора случайных чисел (детерминированная генерация)
    pub seed: u64,

    /// Ширина карты в клетках (по умолчанию 80)
    #[serde(default = "default_width")]
    pub width: u32,

    /// Высота карты в клетках (по умолчанию 60)
    #[serde(default = "default_height")]
    pub height: u32,

    /// Поведение краёв: по умолчанию X зацикливается, Y ограничен
    #[serde(default)]
    pub topology: Topology,

    /// Сглаживать ли углы клеток по соседям:
    /// - `true` — четыре треугольника клетки выбираются по таблице приоритетов,
    /// - `false` — клетка целиком одного типа.
    #[serde(default = "default_smooth_corners")]
    pub smooth_corners: bool,

    /// Размер клетки в пикселях при отрисовке в PNG
    #[serde(default = "default_cell_size")]
    pub cell_size: u32,
}

impl MapGenerationParams {
    /// Загружает параметры из TOML-файла
    ///
    /// # Пример
    /// ```toml
    /// # city.toml
    /// seed = 1291174
    /// width = 80
    /// height = 60
    ///
    /// [topology]
    /// loop_x = true
    /// loop_y = false
    /// ```
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let params: Self = toml::from_str(contents)?;
        params.validate()?;
        Ok(params)
    }

    /// Проверяет предусловия генерации: сетка не меньше 3×3, клетка не меньше 2 пикселей
    pub fn validate(&self) -> Result<()> {
        if self.width < 3 || self.height < 3 {
            return Err(MapGenError::InvalidDimensions {
                width: self.width as usize,
                height: self.height as usize,
            });
        }
        if self.cell_size < 2 {
            return Err(MapGenError::InvalidCellSize(self.cell_size));
        }
        Ok(())
    }
}

fn default_width() -> u32 {
    80
}
fn default_height() -> u32 {
    60
}
fn default_smooth_corners() -> bool {
    true
}
fn default_cell_size() -> u32 {
    10
}

impl Default for MapGenerationParams {
    fn default() -> Self {
        Self {
            seed: 0,
            width: 80,
            height: 60,
            topology: Topology::default(),
            smooth_corners: true,
            cell_size: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn minimal_toml_uses_defaults() {
        let params = MapGenerationParams::from_toml_str("seed = 42").unwrap();
        assert_eq!(
            params,
            MapGenerationParams {
                seed: 42,
                ..MapGenerationParams::default()
            }
        );
    }

    #[test]
    fn full_toml_overrides_everything() {
        let params = MapGenerationParams::from_toml_str(
            r#"
            seed = 7
            width = 32
            height = 16
            smooth_corners = false
            cell_size = 4

            [topology]
            loop_x = false
            loop_y = true
            "#,
        )
        .unwrap();
        assert_eq!(params.width, 32);
        assert_eq!(params.height, 16);
        assert!(!params.smooth_corners);
        assert_eq!(params.cell_size, 4);
        assert_eq!(params.topology, Topology { loop_x: false, loop_y: true });
    }

    #[test]
    fn partial_topology_keeps_default_axis() {
        let params = MapGenerationParams::from_toml_str("seed = 1\n[topology]\nloop_y = true").unwrap();
        assert_eq!(params.topology, Topology { loop_x: true, loop_y: true });
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(matches!(
            MapGenerationParams::from_toml_str("seed = 1\nwidth = 2"),
            Err(MapGenError::InvalidDimensions { width: 2, height: 60 })
        ));
        assert!(matches!(
            MapGenerationParams::from_toml_str("seed = 1\ncell_size = 1"),
            Err(MapGenError::InvalidCellSize(1))
        ));
        assert!(matches!(
            MapGenerationParams::from_toml_str("width = 10"),
            Err(MapGenError::Toml(_))
        ));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "seed = 1291174\nheight = 45").unwrap();
        let params = MapGenerationParams::from_toml_file(file.path()).unwrap();
        assert_eq!(params.seed, 1_291_174);
        assert_eq!(params.height, 45);
        assert_eq!(params.width, 80);
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            MapGenerationParams::from_toml_file("/nonexistent/citygen.toml"),
            Err(MapGenError::Io(_))
        ));
    }
}
