use crate::entity::Entity;
use anyhow::{Context, Result};
use creeps_common::{OutputConfig, OutputFormat, Snapshot};
use log::{info, warn};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Resolves the configured snapshot format, falling back to JSON for unknown names.
pub fn resolve_format(output: &OutputConfig) -> OutputFormat {
    let name = output.format.as_deref().unwrap_or("json");
    OutputFormat::parse(name).unwrap_or_else(|| {
        warn!("Unknown output format: {}. Using JSON instead.", name);
        OutputFormat::Json
    })
}

/// Writes all snapshots to `<base_filename>_snapshots.<ext>` and returns the path.
pub fn save_snapshots(snapshots: &[Snapshot], output: &OutputConfig) -> Result<PathBuf> {
    let format = resolve_format(output);
    let path = PathBuf::from(format!("{}_snapshots.{}", output.base_filename, format.extension()));
    let file = File::create(&path)
        .with_context(|| format!("Error creating snapshot file '{}'", path.display()))?;
    let mut writer = BufWriter::new(file);

    match format {
        OutputFormat::Json => serde_json::to_writer(&mut writer, snapshots)
            .context("Error serializing snapshots to JSON")?,
        OutputFormat::Bincode => bincode::serialize_into(&mut writer, snapshots)
            .context("Error serializing snapshots to bincode")?,
        OutputFormat::MessagePack => rmp_serde::encode::write(&mut writer, snapshots)
            .context("Error serializing snapshots to MessagePack")?,
    }
    writer.flush()?;

    info!("{} snapshots saved to {} ({:?} format)", snapshots.len(), path.display(), format);
    Ok(path)
}

/// Writes the final entity states to `<base_filename>_final_positions.csv`.
pub fn save_final_positions<'a, I>(entities: I, output: &OutputConfig) -> Result<PathBuf>
where
    I: IntoIterator<Item = &'a Entity>,
{
    let path = PathBuf::from(format!("{}_final_positions.csv", output.base_filename));
    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("Error saving CSV file '{}'", path.display()))?;
    writer.write_record(["id", "kind", "x", "y", "heading"])?;
    for entity in entities {
        writer.write_record(&[
            entity.id().raw().to_string(),
            entity.kind().as_str().to_string(),
            format!("{:.4}", entity.position().x),
            format!("{:.4}", entity.position().y),
            format!("{:.4}", entity.heading()),
        ])?;
    }
    writer.flush()?;
    info!("Final positions saved to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntitySpec;
    use crate::simulation::CreepSimulation;
    use creeps_common::{Arena, Vec2};

    fn output_in(dir: &std::path::Path, format: Option<&str>) -> OutputConfig {
        OutputConfig {
            base_filename: dir.join("run").to_string_lossy().into_owned(),
            save_stats: true,
            save_final_positions: true,
            save_entities_in_snapshot: true,
            format: format.map(str::to_string),
        }
    }

    fn small_sim() -> CreepSimulation {
        let arena = Arena::new(200.0, 300.0, 100.0).unwrap();
        let specs = vec![
            EntitySpec::creep(Vec2::new(50.0, 50.0), 0.0, 8.0, 2.0),
            EntitySpec::base(Vec2::new(150.0, 150.0), 12.0),
        ];
        let mut sim = CreepSimulation::new(arena, specs).unwrap();
        sim.record_snapshot();
        sim.tick();
        sim.record_snapshot();
        sim
    }

    #[test]
    fn test_unknown_format_falls_back_to_json() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(resolve_format(&output_in(dir.path(), Some("yaml"))), OutputFormat::Json);
        assert_eq!(resolve_format(&output_in(dir.path(), None)), OutputFormat::Json);
    }

    #[test]
    fn test_json_snapshots_are_readable() {
        let dir = tempfile::tempdir().unwrap();
        let sim = small_sim();
        let path = save_snapshots(sim.recorded_snapshots(), &output_in(dir.path(), Some("json"))).unwrap();
        assert!(path.to_string_lossy().ends_with("run_snapshots.json"));
        let text = std::fs::read_to_string(&path).unwrap();
        let loaded: Vec<Snapshot> = serde_json::from_str(&text).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[1].tick, 1);
        assert_eq!(loaded[1].entities.as_ref().map(Vec::len), Some(2));
    }

    #[test]
    fn test_binary_formats_write_files() {
        let dir = tempfile::tempdir().unwrap();
        let sim = small_sim();
        for (name, ext) in [("bincode", "bin"), ("messagepack", "msgpack")] {
            let path = save_snapshots(sim.recorded_snapshots(), &output_in(dir.path(), Some(name))).unwrap();
            assert!(path.to_string_lossy().ends_with(ext));
            assert!(std::fs::metadata(&path).unwrap().len() > 0);
        }
    }

    #[test]
    fn test_final_positions_csv() {
        let dir = tempfile::tempdir().unwrap();
        let sim = small_sim();
        let path = save_final_positions(sim.entities(), &output_in(dir.path(), None)).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "id,kind,x,y,heading");
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("0,creep,52.0000,50.0000"));
        assert!(lines[2].starts_with("1,base,150.0000,150.0000"));
    }
}
