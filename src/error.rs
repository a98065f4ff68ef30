// src/error.rs
//! Ошибки генерации карты
//!
//! Генерация детерминирована и не имеет "восстанавливаемых" ошибок времени выполнения:
//! все варианты ниже — либо нарушение предусловий (некорректные размеры, плотность),
//! либо ошибки ввода-вывода при загрузке конфигурации и экспорте результатов.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MapGenError {
    /// Сетка меньше 3×3: окрестность 3×3 должна быть определена всегда
    #[error("grid must be at least 3x3, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    /// Плотность случайного заполнения вне диапазона [0, 1]
    #[error("density must be within [0, 1], got {0}")]
    InvalidDensity(f64),

    /// Размер клетки в пикселях слишком мал для отрисовки треугольников
    #[error("cell size must be at least 2 pixels, got {0}")]
    InvalidCellSize(u32),

    /// Длина данных не совпадает с `width × height`
    #[error("terrain data has {actual} cells, expected {expected}")]
    DataLength { expected: usize, actual: usize },

    /// Итоговое изображение не помещается в адресуемый буфер
    #[error("image of {width}x{height} cells at {cell_size} px per cell is too large")]
    ImageTooLarge {
        width: usize,
        height: usize,
        cell_size: u32,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error("failed to create image buffer")]
    ImageBuffer,
}

pub type Result<T> = std::result::Result<T, MapGenError>;
