//! Seed files compiled into the binary, and loading seeds from a directory.

use std::path::Path;

use crate::error::DbError;

use super::document::SeedFile;

/// The repository's `db/seeds` files, in application order.
const BUNDLED: &[(&str, &str)] = &[
    (
        "001_zones_ports.json",
        include_str!("../../../../db/seeds/001_zones_ports.json"),
    ),
    (
        "002_terminals.json",
        include_str!("../../../../db/seeds/002_terminals.json"),
    ),
    (
        "003_federal_fees.json",
        include_str!("../../../../db/seeds/003_federal_fees.json"),
    ),
    (
        "004_state_port_fees.json",
        include_str!("../../../../db/seeds/004_state_port_fees.json"),
    ),
    (
        "005_sources.json",
        include_str!("../../../../db/seeds/005_sources.json"),
    ),
    (
        "006_port_documents.json",
        include_str!("../../../../db/seeds/006_port_documents.json"),
    ),
];

/// Parse the bundled seed files.
pub fn bundled() -> Result<Vec<SeedFile>, DbError> {
    BUNDLED
        .iter()
        .map(|(name, contents)| SeedFile::parse(*name, contents))
        .collect()
}

/// Parse every `*.json` file in `dir`, sorted by filename.
pub fn load_dir(dir: &Path) -> Result<Vec<SeedFile>, DbError> {
    let io_err = |file: &Path, source| DbError::SeedIo {
        file: file.display().to_string(),
        source,
    };

    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(|e| io_err(dir, e))? {
        let path = entry.map_err(|e| io_err(dir, e))?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            paths.push(path);
        }
    }
    paths.sort();

    paths
        .iter()
        .map(|path| {
            let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            SeedFile::parse(name, &contents)
        })
        .collect()
}
