pub mod automaton;
pub mod config;
pub mod error;
pub mod feature;
pub mod layers;
pub mod map;
pub mod smoothing;
pub mod terrain;

pub use automaton::{Automaton, Grid, Rule, Topology};
pub use config::MapGenerationParams;
pub use error::{MapGenError, Result};
pub use feature::{Block, Draft, Feature, FeatureId};
pub use layers::{generate_terrain, generate_terrain_with};
pub use map::{Cell, Land, Map, Road, Side, Structure, Tile, Zone, generate_map, generate_map_with};
pub use smoothing::Corners;
pub use terrain::{Terrain, TerrainMap};
