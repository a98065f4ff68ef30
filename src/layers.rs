// src/layers.rs
//! Генерация карты местности из слоёв клеточных автоматов
//!
//! Каждый биом — отдельный прогон автоматов на пустой сетке:
//! случайное заполнение (сид `seed + смещение слоя`) → опционально обнуление краёв →
//! цепочка автоматов → проекция в `TerrainMap`.
//!
//! Слои накладываются на травяную основу в фиксированном порядке:
//! лес → поселения → озёра → горы → ледяные шапки → океан.
//! Океан накладывается последним и всегда побеждает: береговая линия важнее шума внутри суши.
//! Поверх наложения прокладывается русло реки ([`RIVER`]), и только затем идёт очистка.
//!
//! После наложения карта чистится через разбиение на особенности ([`crate::feature`]).

use crate::automaton::{Automaton, Grid, Topology};
use crate::config::MapGenerationParams;
use crate::error::Result;
use crate::terrain::{Terrain, TerrainMap};

/// Особенности меньше этого размера (поселения и горы) превращаются в траву
pub const MIN_FEATURE_SIZE: usize = 40;

/// Минимум одинаковых соседей, чтобы клетка не считалась одиночной на итоговой карте
const MIN_SAME_NEIGHBORS: usize = 2;

/// Рецепт одного слоя: живые клетки становятся `terrain`, мёртвые — `background`
struct LayerRecipe {
    name: &'static str,
    terrain: Terrain,
    background: Terrain,
    density: f64,
    seed_offset: u64,
    border: usize,
    chain: Vec<(Automaton, usize)>,
    final_border: usize,
}

impl LayerRecipe {
    fn build(&self, width: usize, height: usize, topology: Topology, seed: u64) -> Result<TerrainMap> {
        let seeded = Grid::new(width, height, topology)?.run(
            &Automaton::random(self.density, seed.wrapping_add(self.seed_offset))?,
            1,
        );
        let grid = self
            .chain
            .iter()
            .fold(seeded.border(self.border), |grid, (automaton, iterations)| {
                grid.run(automaton, *iterations)
            })
            .border(self.final_border);

        tracing::debug!(
            target: "citygen::layers",
            layer = self.name,
            coverage = grid.alive_count() as f32 / (width * height) as f32,
            "layer built"
        );
        Ok(grid.replace(self.terrain, self.background))
    }
}

fn continents() -> LayerRecipe {
    LayerRecipe {
        name: "continents",
        terrain: Terrain::Grass,
        background: Terrain::Ocean,
        density: 0.58,
        seed_offset: 0,
        border: 0,
        chain: vec![(Automaton::vote(), 12), (Automaton::remove_lonely(3), 1)],
        final_border: 0,
    }
}

fn lakes() -> LayerRecipe {
    LayerRecipe {
        name: "lakes",
        terrain: Terrain::Lake,
        background: Terrain::Grass,
        density: 0.1,
        seed_offset: 25,
        border: 8,
        chain: vec![(Automaton::coral(), 20), (Automaton::smooth(), 1)],
        final_border: 2,
    }
}

fn mountains() -> LayerRecipe {
    LayerRecipe {
        name: "mountains",
        terrain: Terrain::Mountain,
        background: Terrain::Grass,
        density: 0.45,
        seed_offset: 50,
        border: 0,
        chain: vec![(Automaton::holstein(), 45), (Automaton::remove_lonely(3), 1)],
        final_border: 0,
    }
}

fn settlements() -> LayerRecipe {
    LayerRecipe {
        name: "settlements",
        terrain: Terrain::LowDensity,
        background: Terrain::Grass,
        density: 0.2,
        seed_offset: 75,
        border: 5,
        chain: vec![(Automaton::coral(), 14), (Automaton::smooth(), 5)],
        final_border: 0,
    }
}

fn forest() -> LayerRecipe {
    LayerRecipe {
        name: "forest",
        terrain: Terrain::Forest,
        background: Terrain::Grass,
        density: 0.5,
        seed_offset: 100,
        border: 0,
        chain: vec![(Automaton::holstein(), 20), (Automaton::remove_lonely(3), 1)],
        final_border: 0,
    }
}

const ICECAP_SEED_OFFSET: u64 = 200;

/// Русло реки: фиксированная ломаная у северо-западного угла, пока реки не генерируются
pub const RIVER: [(f32, f32); 9] = [
    (0.0, 0.0),
    (0.0, 1.0),
    (1.0, 1.0),
    (1.0, 2.0),
    (2.0, 2.0),
    (2.0, 3.0),
    (3.0, 3.0),
    (3.0, 4.0),
    (4.0, 4.0),
];

const RIVER_WIDTH: f32 = 1.0;

/// Полярные шапки: засев у незацикленных краёв и два прохода сглаживания
fn icecaps(width: usize, height: usize, topology: Topology, seed: u64) -> Result<TerrainMap> {
    let depth = (height / 12).max(1);
    let grid = Grid::new(width, height, topology)?
        .poles(depth, seed.wrapping_add(ICECAP_SEED_OFFSET))
        .run(&Automaton::smooth(), 2);
    tracing::debug!(
        target: "citygen::layers",
        layer = "icecaps",
        depth,
        coverage = grid.alive_count() as f32 / (width * height) as f32,
        "layer built"
    );
    Ok(grid.replace(Terrain::Icecap, Terrain::Unassigned))
}

/// Накладывает слои биомов на травяную основу без очистки
pub fn compose(width: usize, height: usize, topology: Topology, seed: u64) -> Result<TerrainMap> {
    let base = TerrainMap::new(width, height, Terrain::Grass)?;
    let forest = forest().build(width, height, topology, seed)?;
    let settlements = settlements().build(width, height, topology, seed)?;
    let lakes = lakes().build(width, height, topology, seed)?;
    let mountains = mountains().build(width, height, topology, seed)?;
    let icecaps = icecaps(width, height, topology, seed)?;
    let continents = continents().build(width, height, topology, seed)?;

    Ok(base
        .cover(&forest, &[Terrain::Forest])
        .cover(&settlements, &[Terrain::LowDensity])
        .cover(&lakes, &[Terrain::Lake])
        .cover(&mountains, &[Terrain::Mountain])
        .cover(&icecaps, &[Terrain::Icecap])
        .cover(&continents, &[Terrain::Ocean]))
}

/// Очистка наложенной карты
///
/// 1. мелкие поселения и горы (< [`MIN_FEATURE_SIZE`]) → трава;
/// 2. одиночные клетки принимают тип большинства соседей;
/// 3. озёра, касающиеся океана, становятся океаном (это заливы, а не озёра).
pub fn cleanup(terrain: &TerrainMap) -> TerrainMap {
    let draft = terrain.to_draft();
    let culled = draft.cull(
        |f| {
            f.size() < MIN_FEATURE_SIZE
                && matches!(f.terrain(), Terrain::LowDensity | Terrain::Mountain)
        },
        Terrain::Grass,
    );
    tracing::info!(
        target: "citygen::layers",
        features = draft.features().len(),
        culled = culled.data.iter().zip(&terrain.data).filter(|(a, b)| a != b).count(),
        "small features culled"
    );

    let smoothed = culled.remove_lonely(MIN_SAME_NEIGHBORS);

    let draft = smoothed.to_draft();
    let result = draft.cull(
        |f| f.terrain() == Terrain::Lake && f.is_adjacent_to(&draft, Terrain::Ocean),
        Terrain::Ocean,
    );
    tracing::info!(
        target: "citygen::layers",
        features = draft.features().len(),
        inlets = result.data.iter().zip(&smoothed.data).filter(|(a, b)| a != b).count(),
        "coastal lakes merged into ocean"
    );
    result
}

/// Наложение слоёв, русло реки поверх всех слоёв и очистка
fn pipeline(width: usize, height: usize, topology: Topology, seed: u64) -> Result<TerrainMap> {
    let composed = compose(width, height, topology, seed)?.line(Terrain::River, &RIVER, RIVER_WIDTH);
    Ok(cleanup(&composed))
}

/// Полная карта местности для размеров и сида, топология по умолчанию
pub fn generate_terrain(width: usize, height: usize, seed: u64) -> Result<TerrainMap> {
    pipeline(width, height, Topology::default(), seed)
}

pub fn generate_terrain_with(params: &MapGenerationParams) -> Result<TerrainMap> {
    params.validate()?;
    pipeline(
        params.width as usize,
        params.height as usize,
        params.topology,
        params.seed,
    )
}
