use serde::Serialize;

use super::cell::Point;

/// Именованная ломаная в координатах клеток
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Road {
    pub name: String,
    pub points: Vec<Point>,
}

impl Road {
    pub fn new(name: impl Into<String>, points: Vec<Point>) -> Self {
        Self {
            name: name.into(),
            points,
        }
    }

    /// Отрезки между соседними точками
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segments_pair_consecutive_points() {
        let road = Road::new("main", vec![(10.0, 10.0), (10.0, 11.0), (11.0, 12.0)]);
        let segments: Vec<_> = road.segments().collect();
        assert_eq!(
            segments,
            vec![((10.0, 10.0), (10.0, 11.0)), ((10.0, 11.0), (11.0, 12.0))]
        );
    }

    #[test]
    fn short_roads_have_no_segments() {
        assert_eq!(Road::new("stub", vec![(1.0, 1.0)]).segments().count(), 0);
        assert_eq!(Road::new("empty", Vec::new()).segments().count(), 0);
    }
}
