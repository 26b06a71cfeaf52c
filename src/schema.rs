//! Column schema definitions and version registry.
//!
//! Maps each LVIS Data Structure version to its ordered column layout.
//! The registry is immutable, read-only configuration constructed once at
//! startup; parsing selects a schema through it exactly once per granule
//! rather than branching on file naming conventions per line.

use std::collections::HashMap;

use crate::constants::{RH_PERCENTILES, columns};
use crate::error::{LvisError, Result};
use crate::models::{ColumnType, FieldDef, FieldGroup, LdsVersion};

/// Ordered column layout for one LVIS Data Structure version
#[derive(Debug, Clone)]
pub struct ColumnSchema {
    version: LdsVersion,
    fields: Vec<FieldDef>,
}

impl ColumnSchema {
    fn new(version: LdsVersion) -> Self {
        Self {
            version,
            fields: Vec::new(),
        }
    }

    fn push(&mut self, name: &str, dtype: ColumnType, group: FieldGroup) {
        debug_assert!(
            !self.fields.iter().any(|f| f.name == name),
            "duplicate field name in schema: {name}"
        );
        let position = self.fields.len();
        self.fields.push(FieldDef {
            name: name.to_string(),
            dtype,
            position,
            group,
        });
    }

    /// The version this layout belongs to
    pub fn version(&self) -> LdsVersion {
        self.version
    }

    /// Number of whitespace-delimited tokens expected per record line
    pub fn width(&self) -> usize {
        self.fields.len()
    }

    /// Ordered field definitions
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    /// Ordered field names
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Start building a custom layout for a version.
    ///
    /// The published layouts are registered by [`SchemaRegistry::standard`];
    /// the builder exists so alternative layouts stay configuration rather
    /// than parse-time logic.
    pub fn builder(version: LdsVersion) -> ColumnSchemaBuilder {
        ColumnSchemaBuilder {
            schema: ColumnSchema::new(version),
        }
    }

    /// Field names organized by dataset group, in schema order within
    /// each group
    pub fn grouped_fields(&self) -> Vec<(String, Vec<String>)> {
        let order = [
            FieldGroup::Time,
            FieldGroup::Geolocation,
            FieldGroup::ElevationSurfaces,
            FieldGroup::Waveform,
            FieldGroup::InstrumentParameters,
        ];

        order
            .iter()
            .filter_map(|group| {
                let names: Vec<String> = self
                    .fields
                    .iter()
                    .filter(|f| f.group == *group)
                    .map(|f| f.name.clone())
                    .collect();
                if names.is_empty() {
                    None
                } else {
                    Some((group.name().to_string(), names))
                }
            })
            .collect()
    }
}

/// Builder for custom column layouts
#[derive(Debug)]
pub struct ColumnSchemaBuilder {
    schema: ColumnSchema,
}

impl ColumnSchemaBuilder {
    /// Append an integer column at the next position
    pub fn integer(mut self, name: &str, group: FieldGroup) -> Self {
        self.schema.push(name, ColumnType::Integer, group);
        self
    }

    /// Append a float column at the next position
    pub fn float(mut self, name: &str, group: FieldGroup) -> Self {
        self.schema.push(name, ColumnType::Float, group);
        self
    }

    pub fn build(self) -> ColumnSchema {
        self.schema
    }
}

/// Registry of column schemas keyed by data structure version
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    schemas: HashMap<LdsVersion, ColumnSchema>,
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl SchemaRegistry {
    /// Create an empty registry with no layouts registered
    pub fn empty() -> Self {
        Self {
            schemas: HashMap::new(),
        }
    }

    /// Create the registry holding both published LDS layouts
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        registry.register(lds104_schema());
        registry.register(lds202_schema());
        registry
    }

    /// Register a layout, replacing any previous entry for its version
    pub fn register(&mut self, schema: ColumnSchema) {
        self.schemas.insert(schema.version(), schema);
    }

    /// Look up the layout for a version, failing before any record is
    /// processed if none is registered
    pub fn schema_for(&self, version: LdsVersion) -> Result<&ColumnSchema> {
        self.schemas
            .get(&version)
            .ok_or_else(|| LvisError::UnknownVersion {
                version: version.label().to_string(),
            })
    }

    /// Look up a layout by published version label ("1.04", "2.0.2")
    pub fn schema_for_label(&self, label: &str) -> Result<&ColumnSchema> {
        let version = LdsVersion::from_label(label).ok_or_else(|| LvisError::UnknownVersion {
            version: label.to_string(),
        })?;
        self.schema_for(version)
    }

    /// Print the column layout of a version for operator inspection
    pub fn report_layout(&self, version: LdsVersion) -> Result<()> {
        let schema = self.schema_for(version)?;

        println!("\n=== LDS {} Column Layout ===", version);
        println!("Total columns: {}", schema.width());
        for field in schema.fields() {
            println!(
                "  {:>2}  {:<22} {:>7}  {}",
                field.position,
                field.name,
                field.dtype.type_name(),
                field.group.name()
            );
        }

        Ok(())
    }
}

/// The 12-column LDS 1.04 layout (releases through 2017)
fn lds104_schema() -> ColumnSchema {
    use ColumnType::{Float, Integer};

    let mut schema = ColumnSchema::new(LdsVersion::V104);
    schema.push(columns::LVIS_LFID, Integer, FieldGroup::Time);
    schema.push(columns::SHOT_NUMBER, Integer, FieldGroup::Time);
    schema.push(columns::TIME, Float, FieldGroup::Time);
    schema.push("Longitude_Centroid", Float, FieldGroup::Geolocation);
    schema.push("Latitude_Centroid", Float, FieldGroup::Geolocation);
    schema.push("Elevation_Centroid", Float, FieldGroup::ElevationSurfaces);
    schema.push(columns::LONGITUDE_LOW, Float, FieldGroup::Geolocation);
    schema.push(columns::LATITUDE_LOW, Float, FieldGroup::Geolocation);
    schema.push(columns::ELEVATION_LOW, Float, FieldGroup::ElevationSurfaces);
    schema.push(columns::LONGITUDE_HIGH, Float, FieldGroup::Geolocation);
    schema.push(columns::LATITUDE_HIGH, Float, FieldGroup::Geolocation);
    schema.push(columns::ELEVATION_HIGH, Float, FieldGroup::ElevationSurfaces);
    schema
}

/// The 42-column LDS 2.0.2 layout (2018 reprocessing onward)
fn lds202_schema() -> ColumnSchema {
    use ColumnType::{Float, Integer};

    let mut schema = ColumnSchema::new(LdsVersion::V202);
    schema.push(columns::LVIS_LFID, Integer, FieldGroup::Time);
    schema.push(columns::SHOT_NUMBER, Integer, FieldGroup::Time);
    schema.push(columns::TIME, Float, FieldGroup::Time);
    schema.push(columns::LONGITUDE_LOW, Float, FieldGroup::Geolocation);
    schema.push(columns::LATITUDE_LOW, Float, FieldGroup::Geolocation);
    schema.push(columns::ELEVATION_LOW, Float, FieldGroup::ElevationSurfaces);
    schema.push("Longitude_Top", Float, FieldGroup::Geolocation);
    schema.push("Latitude_Top", Float, FieldGroup::Geolocation);
    schema.push("Elevation_Top", Float, FieldGroup::ElevationSurfaces);
    schema.push(columns::LONGITUDE_HIGH, Float, FieldGroup::Geolocation);
    schema.push(columns::LATITUDE_HIGH, Float, FieldGroup::Geolocation);
    schema.push(columns::ELEVATION_HIGH, Float, FieldGroup::ElevationSurfaces);

    for percentile in RH_PERCENTILES {
        let name = format!("RH{}", percentile);
        schema.push(&name, Float, FieldGroup::Waveform);
    }

    schema.push("Azimuth", Float, FieldGroup::InstrumentParameters);
    schema.push("Incident_Angle", Float, FieldGroup::InstrumentParameters);
    schema.push("Range", Float, FieldGroup::InstrumentParameters);
    schema.push("Complexity", Float, FieldGroup::Waveform);
    schema.push("Flag1", Integer, FieldGroup::InstrumentParameters);
    schema.push("Flag2", Integer, FieldGroup::InstrumentParameters);
    schema.push("Flag3", Integer, FieldGroup::InstrumentParameters);
    schema
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_standard_layout_widths() {
        let registry = SchemaRegistry::standard();

        assert_eq!(registry.schema_for(LdsVersion::V104).unwrap().width(), 12);
        assert_eq!(registry.schema_for(LdsVersion::V202).unwrap().width(), 42);
    }

    #[test]
    fn test_positions_are_contiguous() {
        let registry = SchemaRegistry::standard();

        for version in [LdsVersion::V104, LdsVersion::V202] {
            let schema = registry.schema_for(version).unwrap();
            for (i, field) in schema.fields().iter().enumerate() {
                assert_eq!(field.position, i);
            }
        }
    }

    #[test]
    fn test_field_names_are_unique() {
        let registry = SchemaRegistry::standard();

        for version in [LdsVersion::V104, LdsVersion::V202] {
            let schema = registry.schema_for(version).unwrap();
            let names: HashSet<_> = schema.field_names().into_iter().collect();
            assert_eq!(names.len(), schema.width());
        }
    }

    #[test]
    fn test_unknown_version_label() {
        let registry = SchemaRegistry::standard();

        let result = registry.schema_for_label("v99");
        match result {
            Err(LvisError::UnknownVersion { version }) => assert_eq!(version, "v99"),
            other => panic!("expected UnknownVersion, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_empty_registry_rejects_lookup() {
        let registry = SchemaRegistry::empty();
        assert!(matches!(
            registry.schema_for(LdsVersion::V104),
            Err(LvisError::UnknownVersion { .. })
        ));
    }

    #[test]
    fn test_lds202_flags_are_integers() {
        let registry = SchemaRegistry::standard();
        let schema = registry.schema_for(LdsVersion::V202).unwrap();

        for flag in ["Flag1", "Flag2", "Flag3"] {
            let field = schema.fields().iter().find(|f| f.name == flag).unwrap();
            assert_eq!(field.dtype, ColumnType::Integer);
        }
    }

    #[test]
    fn test_grouped_fields_cover_all_columns() {
        let registry = SchemaRegistry::standard();
        let schema = registry.schema_for(LdsVersion::V202).unwrap();

        let grouped: usize = schema
            .grouped_fields()
            .iter()
            .map(|(_, names)| names.len())
            .sum();
        assert_eq!(grouped, schema.width());
    }

    #[test]
    fn test_centroid_fields_only_in_legacy_layout() {
        let registry = SchemaRegistry::standard();

        let v104 = registry.schema_for(LdsVersion::V104).unwrap();
        let v202 = registry.schema_for(LdsVersion::V202).unwrap();

        assert!(v104.field_names().contains(&"Longitude_Centroid"));
        assert!(!v202.field_names().contains(&"Longitude_Centroid"));
        assert!(v202.field_names().contains(&"Longitude_Top"));
    }
}
