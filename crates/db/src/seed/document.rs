//! Seed document parsing and pre-flight validation.

use serde::Deserialize;

use portref_core::lookup::find_overlaps;

use crate::error::DbError;
use crate::models::fee::CreateFeeVersion;
use crate::models::port::UpsertPort;
use crate::models::port_document::UpsertPortDocument;
use crate::models::source::UpsertSource;
use crate::models::terminal::UpsertTerminal;
use crate::models::zone::UpsertPortZone;

/// The contents of one seed file.
///
/// Every section is optional; sections are applied in field order.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedDocument {
    #[serde(default)]
    pub zones: Vec<UpsertPortZone>,
    #[serde(default)]
    pub ports: Vec<UpsertPort>,
    #[serde(default)]
    pub terminals: Vec<UpsertTerminal>,
    #[serde(default)]
    pub port_documents: Vec<UpsertPortDocument>,
    #[serde(default)]
    pub sources: Vec<UpsertSource>,
    #[serde(default)]
    pub fees: Vec<CreateFeeVersion>,
}

impl SeedDocument {
    /// Validate every row without touching the database.
    ///
    /// Also rejects fee versions within the document that overlap each other.
    pub fn validate(&self) -> Result<(), DbError> {
        for zone in &self.zones {
            zone.validate()?;
        }
        for port in &self.ports {
            port.validate()?;
        }
        for terminal in &self.terminals {
            terminal.validate()?;
        }
        for doc in &self.port_documents {
            doc.validate()?;
        }
        for source in &self.sources {
            source.validate()?;
        }
        for fee in &self.fees {
            fee.validate()?;
        }
        if let Some(overlap) = find_overlaps(&self.fees).into_iter().next() {
            return Err(DbError::OverlappingVersion(overlap));
        }
        Ok(())
    }

    /// Number of rows across all sections.
    pub fn row_count(&self) -> usize {
        self.zones.len()
            + self.ports.len()
            + self.terminals.len()
            + self.port_documents.len()
            + self.sources.len()
            + self.fees.len()
    }
}

/// A named, parsed seed document.
#[derive(Debug, Clone)]
pub struct SeedFile {
    pub name: String,
    pub document: SeedDocument,
}

impl SeedFile {
    /// Parse `contents` as a seed document named `name`.
    pub fn parse(name: impl Into<String>, contents: &str) -> Result<Self, DbError> {
        let name = name.into();
        let document = serde_json::from_str(contents).map_err(|source| DbError::MalformedSeed {
            file: name.clone(),
            source,
        })?;
        Ok(Self { name, document })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn missing_sections_default_to_empty() {
        let file = SeedFile::parse("empty.json", "{}").unwrap();
        assert_eq!(file.document.row_count(), 0);
        assert!(file.document.validate().is_ok());
    }

    #[test]
    fn unknown_section_is_malformed() {
        let err = SeedFile::parse("typo.json", r#"{"zone": []}"#).unwrap_err();
        assert_matches!(err, DbError::MalformedSeed { file, .. } if file == "typo.json");
    }

    #[test]
    fn invalid_row_fails_validation() {
        let file = SeedFile::parse(
            "bad.json",
            r#"{"zones": [{"code": "so cal", "name": "Southern California"}]}"#,
        )
        .unwrap();
        assert_matches!(file.document.validate(), Err(DbError::Core(_)));
    }

    #[test]
    fn overlapping_versions_in_one_file_rejected() {
        let file = SeedFile::parse(
            "overlap.json",
            r#"{"fees": [
                {"code": "MX_VTS_PER_CALL", "name": "VTS", "scope": "port", "unit": "per_call",
                 "rate": "300.00", "applies_port_code": "LALB", "effective_start": "2024-01-01"},
                {"code": "MX_VTS_PER_CALL", "name": "VTS", "scope": "port", "unit": "per_call",
                 "rate": "325.00", "applies_port_code": "LALB", "effective_start": "2025-01-01"}
            ]}"#,
        )
        .unwrap();
        assert_matches!(
            file.document.validate(),
            Err(DbError::OverlappingVersion(overlap)) if overlap.code == "MX_VTS_PER_CALL"
        );
    }
}
