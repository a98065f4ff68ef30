use std::collections::HashSet;

use citygen::layers::RIVER;
use citygen::{
    Draft, MapGenError, MapGenerationParams, Terrain, TerrainMap, Topology, generate_map,
    generate_map_with, generate_terrain,
};

const SEED: u64 = 1_291_174;

#[test]
fn generation_is_deterministic() {
    let a = generate_map(80, 60, SEED).unwrap();
    let b = generate_map(80, 60, SEED).unwrap();
    assert_eq!(a.terrain, b.terrain);
    assert_eq!(a.cells, b.cells);

    let other = generate_terrain(80, 60, SEED + 1).unwrap();
    assert_ne!(a.terrain, other);
}

#[test]
fn smallest_map_generates() {
    let map = generate_map(3, 3, 0).unwrap();
    assert_eq!(map.cells.len(), 9);
    assert!(matches!(
        generate_map(2, 3, 0),
        Err(MapGenError::InvalidDimensions { .. })
    ));
}

#[test]
fn every_cell_is_assigned() {
    for seed in [0, 7, SEED] {
        let terrain = generate_terrain(48, 36, seed).unwrap();
        assert_eq!(terrain.count(Terrain::Unassigned), 0, "seed {seed}");
    }
}

#[test]
fn no_lake_touches_ocean() {
    for seed in [1, 42, SEED] {
        let terrain = generate_terrain(64, 48, seed).unwrap();
        let draft = Draft::new(&terrain);
        for feature in draft.features() {
            if feature.terrain() == Terrain::Lake {
                assert!(!feature.is_adjacent_to(&draft, Terrain::Ocean), "seed {seed}");
            }
        }
    }
}

#[test]
fn partition_of_generated_map_is_complete() {
    let terrain = generate_terrain(60, 40, SEED).unwrap();
    let draft = Draft::new(&terrain);
    let mut seen = HashSet::new();
    for feature in draft.features() {
        for block in feature.blocks() {
            assert!(seen.insert((block.row, block.col)));
        }
    }
    assert_eq!(seen.len(), 60 * 40);
    assert_eq!(draft.terrain(), terrain);
}

#[test]
fn tiles_carry_zones_and_trees() {
    let map = generate_map(80, 60, SEED).unwrap();
    for tile in map.tiles() {
        assert_eq!(tile.zone.is_some(), tile.terrain == Terrain::LowDensity);
        assert_eq!(!tile.structures.is_empty(), tile.terrain == Terrain::Forest);
        let buildable = matches!(
            tile.terrain,
            Terrain::Beach
                | Terrain::Grass
                | Terrain::Forest
                | Terrain::LowDensity
                | Terrain::HighDensity
        );
        assert_eq!(tile.land.buildable, buildable);
    }
}

#[test]
fn exports_png_and_json() {
    let dir = tempfile::tempdir().unwrap();
    let params = MapGenerationParams {
        seed: SEED,
        width: 24,
        height: 18,
        cell_size: 5,
        ..MapGenerationParams::default()
    };
    let map = generate_map_with(&params).unwrap();

    let png = dir.path().join("map.png");
    map.save_as_png(&png, params.cell_size).unwrap();
    let image = image::open(&png).unwrap();
    assert_eq!((image.width(), image.height()), (120, 90));

    let terrain_png = dir.path().join("terrain.png");
    map.terrain.save_as_png(&terrain_png).unwrap();
    let image = image::open(&terrain_png).unwrap();
    assert_eq!((image.width(), image.height()), (24, 18));

    let json = serde_json::to_value(&map).unwrap();
    assert_eq!(json["width"], 24);
    assert_eq!(json["cells"].as_array().map(Vec::len), Some(24 * 18));
    assert_eq!(json["terrain"]["data"].as_array().map(Vec::len), Some(24 * 18));
    assert!(json["roads"].as_array().is_some_and(Vec::is_empty));
}

#[test]
fn topology_changes_result() {
    let base = MapGenerationParams {
        seed: 5,
        width: 40,
        height: 30,
        ..MapGenerationParams::default()
    };
    let torus = MapGenerationParams {
        topology: Topology {
            loop_x: true,
            loop_y: true,
        },
        ..base.clone()
    };
    let a = generate_map_with(&base).unwrap();
    let b = generate_map_with(&torus).unwrap();
    assert_ne!(a.terrain, b.terrain);
    // на торе нет полюсов
    assert_eq!(b.terrain.count(Terrain::Icecap), 0);
}

#[test]
fn config_file_drives_generation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("city.toml");
    std::fs::write(&path, "seed = 1291174\nwidth = 30\nheight = 20\nsmooth_corners = false\n").unwrap();
    let params = MapGenerationParams::from_toml_file(&path).unwrap();
    let map = generate_map_with(&params).unwrap();
    assert_eq!(map.dimensions(), (30, 20));
    assert_eq!(map.terrain, generate_terrain(30, 20, SEED).unwrap());
}

#[test]
fn river_is_stamped_into_every_map() {
    for seed in [0, 1, 7, 42, SEED] {
        let terrain = generate_terrain(80, 60, seed).unwrap();
        assert!(terrain.count(Terrain::River) >= RIVER.len(), "seed {seed}");
        for &(x, y) in &RIVER {
            assert_eq!(terrain.get(x as usize, y as usize), Terrain::River, "seed {seed}");
        }
    }
}

#[test]
fn smallest_valid_cell_size_renders() {
    let dir = tempfile::tempdir().unwrap();
    let params = MapGenerationParams::from_toml_str("seed = 3\nwidth = 16\nheight = 12\ncell_size = 2").unwrap();
    let map = generate_map_with(&params).unwrap();

    let png = dir.path().join("map.png");
    map.save_as_png(&png, params.cell_size).unwrap();
    let image = image::open(&png).unwrap();
    assert_eq!((image.width(), image.height()), (32, 24));

    let zones = dir.path().join("zones.png");
    map.save_zones_as_png(&zones, params.cell_size).unwrap();
    assert!(zones.exists());
}

#[test]
fn huge_cell_size_is_rejected_not_wrapped() {
    let map = generate_map(10, 10, 1).unwrap();
    assert!(matches!(
        map.to_rgba_image(u32::MAX / 4),
        Err(MapGenError::ImageTooLarge { width: 10, height: 10, .. })
    ));
}

#[test]
fn terrain_map_rejects_inconsistent_data() {
    assert!(matches!(
        TerrainMap::from_data(5, 5, vec![Terrain::Grass; 24]),
        Err(MapGenError::DataLength { expected: 25, actual: 24 })
    ));
    let terrain = generate_terrain(12, 9, SEED).unwrap();
    assert_eq!(terrain.data().len(), terrain.width() * terrain.height());
}
