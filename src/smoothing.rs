// src/smoothing.rs
//! Сглаживание углов клетки
//!
//! Каждая клетка рисуется четырьмя треугольниками (верх, право, низ, лево).
//! Тип местности каждого треугольника выбирается по центру и четырём ортогональным
//! соседям, чтобы границы биомов не выглядели "лесенкой" из целых клеток.
//!
//! Правила проверяются строго по порядку, побеждает первое сработавшее:
//! 1. все четыре соседа одинаковы;
//! 2. три одинаковых соседа (верх, право, низ, лево), более "заметных", чем центр;
//! 3. диагональное деление: две пары одинаковых соседей;
//! 4. одна пара одинаковых соседей, более заметная, чем центр;
//! 5. иначе — все углы равны центру.
//!
//! "Заметнее" — строго больше в порядке [`Terrain`]. Порядок ветвей менять нельзя:
//! на неоднозначных окрестностях разные порядки дают разную картинку.

use serde::Serialize;

use crate::terrain::{Orthogonal, Terrain};

/// Типы местности четырёх треугольников клетки
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Corners {
    pub top: Terrain,
    pub right: Terrain,
    pub bottom: Terrain,
    pub left: Terrain,
}

impl Corners {
    pub fn uniform(terrain: Terrain) -> Self {
        Self::from_array([terrain; 4])
    }

    /// `[top, right, bottom, left]`
    pub fn from_array([top, right, bottom, left]: [Terrain; 4]) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub fn to_array(self) -> [Terrain; 4] {
        [self.top, self.right, self.bottom, self.left]
    }
}

/// Без сглаживания: вся клетка одного цвета
pub fn flat(neighborhood: &Orthogonal) -> Corners {
    Corners::uniform(neighborhood.center)
}

pub fn smooth(neighborhood: &Orthogonal) -> Corners {
    let Orthogonal {
        center: c,
        top: t,
        right: r,
        bottom: b,
        left: l,
    } = *neighborhood;

    if t == l && t == r && t == b {
        return Corners::uniform(t);
    }

    let three_same_top = t == l && t == r;
    let three_same_right = r == t && r == b;
    let three_same_bottom = b == l && b == r;
    let three_same_left = l == t && l == b;

    if three_same_top && t > c {
        return Corners::from_array([t, t, c, t]);
    }
    if three_same_right && r > c {
        return Corners::from_array([r, r, r, c]);
    }
    if three_same_bottom && b > c {
        return Corners::from_array([c, b, b, b]);
    }
    if three_same_left && l > c {
        return Corners::from_array([l, c, l, l]);
    }

    let top_left = t == l;
    let top_right = t == r;
    let bottom_left = b == l;
    let bottom_right = b == r;
    let dominant = |side: Terrain| if side > c { side } else { c };

    if top_left && bottom_right && (t > c || b > c) {
        let (tl, br) = (dominant(t), dominant(b));
        return Corners::from_array([tl, br, br, tl]);
    }
    if top_right && bottom_left && (t > c || b > c) {
        let (tr, bl) = (dominant(t), dominant(b));
        return Corners::from_array([tr, tr, bl, bl]);
    }

    if top_left && t > c {
        return Corners::from_array([t, c, c, t]);
    }
    if top_right && t > c {
        return Corners::from_array([t, t, c, c]);
    }
    if bottom_left && b > c {
        return Corners::from_array([c, c, b, b]);
    }
    if bottom_right && b > c {
        return Corners::from_array([c, b, b, c]);
    }

    Corners::uniform(c)
}
