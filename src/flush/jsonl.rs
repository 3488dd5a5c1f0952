use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::sim::WorldManager;

/// Write an iterator of serializable items to a JSONL file (one JSON object per line).
fn write_jsonl<T: Serialize>(path: &Path, items: impl Iterator<Item = T>) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for item in items {
        serde_json::to_writer(&mut writer, &item)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()
}

/// Snapshot the mutable world state as JSONL files in `output_dir`.
///
/// Creates the directory if needed and writes, each sorted by id:
/// - `provinces.jsonl`
/// - `factions.jsonl`
/// - `armies.jsonl`
/// - `relations.jsonl`
/// - `borders.jsonl`
pub fn flush_to_jsonl(world: &WorldManager, output_dir: &Path) -> io::Result<()> {
    fs::create_dir_all(output_dir)?;

    write_jsonl(&output_dir.join("provinces.jsonl"), world.provinces().iter())?;
    write_jsonl(&output_dir.join("factions.jsonl"), world.factions().iter())?;
    write_jsonl(&output_dir.join("armies.jsonl"), world.armies().iter())?;
    write_jsonl(&output_dir.join("relations.jsonl"), world.relations().iter())?;
    write_jsonl(&output_dir.join("borders.jsonl"), world.borders().iter())?;

    debug!(dir = %output_dir.display(), turn = world.current_turn(), "world snapshot written");
    Ok(())
}
