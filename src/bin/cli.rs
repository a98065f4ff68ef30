use clap::Parser;
use citygen::{MapGenerationParams, generate_map_with};
use std::path::PathBuf;
use tracing::Level;

/// Генератор местности для градостроительного симулятора
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Путь к конфигурационному файлу в формате TOML
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Сид генерации (перекрывает значение из конфигурации)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Ширина карты в клетках
    #[arg(long)]
    width: Option<u32>,

    /// Высота карты в клетках
    #[arg(long)]
    height: Option<u32>,

    /// Путь для сохранения карты (по умолчанию: ./map.png)
    #[arg(short, long, default_value = "map.png")]
    output: PathBuf,

    /// Дополнительно сохранить карту местности: один пиксель на клетку
    #[arg(long)]
    terrain: Option<PathBuf>,

    /// Дополнительно сохранить карту зон застройки
    #[arg(long)]
    zones: Option<PathBuf>,

    /// Дополнительно сохранить карту в JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Подробный лог (уровень DEBUG)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_target(cli.verbose)
        .init();

    let mut params = match &cli.config {
        Some(path) => {
            tracing::info!("Загрузка конфигурации из {}", path.display());
            MapGenerationParams::from_toml_file(path)?
        }
        None => MapGenerationParams::default(),
    };
    if let Some(seed) = cli.seed {
        params.seed = seed;
    }
    if let Some(width) = cli.width {
        params.width = width;
    }
    if let Some(height) = cli.height {
        params.height = height;
    }
    params.validate()?;

    tracing::info!(
        "Генерация карты (размер: {}×{}, сид: {})...",
        params.width,
        params.height,
        params.seed
    );
    let map = generate_map_with(&params)?;

    tracing::info!("Сохранение в {}", cli.output.display());
    map.save_as_png(&cli.output, params.cell_size)?;

    if let Some(path) = &cli.terrain {
        tracing::info!("Сохранение карты местности в {}", path.display());
        map.terrain.save_as_png(path)?;
    }

    if let Some(path) = &cli.zones {
        tracing::info!("Сохранение карты зон в {}", path.display());
        map.save_zones_as_png(path, params.cell_size)?;
    }

    if let Some(path) = &cli.json {
        tracing::info!("Сохранение JSON в {}", path.display());
        let file = std::io::BufWriter::new(std::fs::File::create(path)?);
        serde_json::to_writer(file, &map)?;
    }

    tracing::info!("Готово!");
    Ok(())
}
