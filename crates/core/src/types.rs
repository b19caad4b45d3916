//! Core types used throughout the scaffolder
//!
//! This module contains the schema-builder vocabulary shared by the model
//! definitions and the migration compiler: column types and index kinds.

use serde::{Deserialize, Serialize};

// ============================================================================
// Column Types
// ============================================================================

/// Column types understood by the schema builder (`$table-><type>('name')`).
///
/// Any other schema-builder method is kept verbatim in [`ColumnType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColumnType {
    BigIncrements,
    BigInteger,
    Binary,
    Boolean,
    Char,
    Date,
    DateTime,
    DateTimeTz,
    Decimal,
    Double,
    Enum,
    Float,
    ForeignId,
    ForeignUlid,
    ForeignUuid,
    Geography,
    Geometry,
    GeometryCollection,
    Id,
    Increments,
    Integer,
    IpAddress,
    Json,
    Jsonb,
    LineString,
    LongText,
    MacAddress,
    MediumIncrements,
    MediumInteger,
    MediumText,
    Morphs,
    MultiLineString,
    MultiPoint,
    MultiPolygon,
    NullableMorphs,
    NullableTimestamps,
    NullableUlidMorphs,
    NullableUuidMorphs,
    Point,
    Polygon,
    RememberToken,
    Set,
    SmallIncrements,
    SmallInteger,
    SoftDeletes,
    SoftDeletesTz,
    String,
    Text,
    Time,
    TimeTz,
    Timestamp,
    TimestampTz,
    TinyIncrements,
    TinyInteger,
    TinyText,
    Ulid,
    UlidMorphs,
    UnsignedBigInteger,
    UnsignedDecimal,
    UnsignedInteger,
    UnsignedMediumInteger,
    UnsignedSmallInteger,
    UnsignedTinyInteger,
    Uuid,
    UuidMorphs,
    Year,
    /// Any other schema-builder column method
    Other(String),
}

impl ColumnType {
    /// Get the schema-builder method name for this column type
    pub fn as_str(&self) -> &str {
        match self {
            ColumnType::BigIncrements => "bigIncrements",
            ColumnType::BigInteger => "bigInteger",
            ColumnType::Binary => "binary",
            ColumnType::Boolean => "boolean",
            ColumnType::Char => "char",
            ColumnType::Date => "date",
            ColumnType::DateTime => "dateTime",
            ColumnType::DateTimeTz => "dateTimeTz",
            ColumnType::Decimal => "decimal",
            ColumnType::Double => "double",
            ColumnType::Enum => "enum",
            ColumnType::Float => "float",
            ColumnType::ForeignId => "foreignId",
            ColumnType::ForeignUlid => "foreignUlid",
            ColumnType::ForeignUuid => "foreignUuid",
            ColumnType::Geography => "geography",
            ColumnType::Geometry => "geometry",
            ColumnType::GeometryCollection => "geometryCollection",
            ColumnType::Id => "id",
            ColumnType::Increments => "increments",
            ColumnType::Integer => "integer",
            ColumnType::IpAddress => "ipAddress",
            ColumnType::Json => "json",
            ColumnType::Jsonb => "jsonb",
            ColumnType::LineString => "lineString",
            ColumnType::LongText => "longText",
            ColumnType::MacAddress => "macAddress",
            ColumnType::MediumIncrements => "mediumIncrements",
            ColumnType::MediumInteger => "mediumInteger",
            ColumnType::MediumText => "mediumText",
            ColumnType::Morphs => "morphs",
            ColumnType::MultiLineString => "multiLineString",
            ColumnType::MultiPoint => "multiPoint",
            ColumnType::MultiPolygon => "multiPolygon",
            ColumnType::NullableMorphs => "nullableMorphs",
            ColumnType::NullableTimestamps => "nullableTimestamps",
            ColumnType::NullableUlidMorphs => "nullableUlidMorphs",
            ColumnType::NullableUuidMorphs => "nullableUuidMorphs",
            ColumnType::Point => "point",
            ColumnType::Polygon => "polygon",
            ColumnType::RememberToken => "rememberToken",
            ColumnType::Set => "set",
            ColumnType::SmallIncrements => "smallIncrements",
            ColumnType::SmallInteger => "smallInteger",
            ColumnType::SoftDeletes => "softDeletes",
            ColumnType::SoftDeletesTz => "softDeletesTz",
            ColumnType::String => "string",
            ColumnType::Text => "text",
            ColumnType::Time => "time",
            ColumnType::TimeTz => "timeTz",
            ColumnType::Timestamp => "timestamp",
            ColumnType::TimestampTz => "timestampTz",
            ColumnType::TinyIncrements => "tinyIncrements",
            ColumnType::TinyInteger => "tinyInteger",
            ColumnType::TinyText => "tinyText",
            ColumnType::Ulid => "ulid",
            ColumnType::UlidMorphs => "ulidMorphs",
            ColumnType::UnsignedBigInteger => "unsignedBigInteger",
            ColumnType::UnsignedDecimal => "unsignedDecimal",
            ColumnType::UnsignedInteger => "unsignedInteger",
            ColumnType::UnsignedMediumInteger => "unsignedMediumInteger",
            ColumnType::UnsignedSmallInteger => "unsignedSmallInteger",
            ColumnType::UnsignedTinyInteger => "unsignedTinyInteger",
            ColumnType::Uuid => "uuid",
            ColumnType::UuidMorphs => "uuidMorphs",
            ColumnType::Year => "year",
            ColumnType::Other(name) => name,
        }
    }

    /// Look up a built-in column type by its schema-builder method name
    pub fn from_name(name: &str) -> Option<ColumnType> {
        Self::all().iter().find(|t| t.as_str() == name).cloned()
    }

    /// Check whether a name is part of the built-in vocabulary
    pub fn is_known(name: &str) -> bool {
        Self::from_name(name).is_some()
    }

    /// Get all built-in column types
    pub fn all() -> &'static [ColumnType] {
        &[
            ColumnType::BigIncrements,
            ColumnType::BigInteger,
            ColumnType::Binary,
            ColumnType::Boolean,
            ColumnType::Char,
            ColumnType::Date,
            ColumnType::DateTime,
            ColumnType::DateTimeTz,
            ColumnType::Decimal,
            ColumnType::Double,
            ColumnType::Enum,
            ColumnType::Float,
            ColumnType::ForeignId,
            ColumnType::ForeignUlid,
            ColumnType::ForeignUuid,
            ColumnType::Geography,
            ColumnType::Geometry,
            ColumnType::GeometryCollection,
            ColumnType::Id,
            ColumnType::Increments,
            ColumnType::Integer,
            ColumnType::IpAddress,
            ColumnType::Json,
            ColumnType::Jsonb,
            ColumnType::LineString,
            ColumnType::LongText,
            ColumnType::MacAddress,
            ColumnType::MediumIncrements,
            ColumnType::MediumInteger,
            ColumnType::MediumText,
            ColumnType::Morphs,
            ColumnType::MultiLineString,
            ColumnType::MultiPoint,
            ColumnType::MultiPolygon,
            ColumnType::NullableMorphs,
            ColumnType::NullableTimestamps,
            ColumnType::NullableUlidMorphs,
            ColumnType::NullableUuidMorphs,
            ColumnType::Point,
            ColumnType::Polygon,
            ColumnType::RememberToken,
            ColumnType::Set,
            ColumnType::SmallIncrements,
            ColumnType::SmallInteger,
            ColumnType::SoftDeletes,
            ColumnType::SoftDeletesTz,
            ColumnType::String,
            ColumnType::Text,
            ColumnType::Time,
            ColumnType::TimeTz,
            ColumnType::Timestamp,
            ColumnType::TimestampTz,
            ColumnType::TinyIncrements,
            ColumnType::TinyInteger,
            ColumnType::TinyText,
            ColumnType::Ulid,
            ColumnType::UlidMorphs,
            ColumnType::UnsignedBigInteger,
            ColumnType::UnsignedDecimal,
            ColumnType::UnsignedInteger,
            ColumnType::UnsignedMediumInteger,
            ColumnType::UnsignedSmallInteger,
            ColumnType::UnsignedTinyInteger,
            ColumnType::Uuid,
            ColumnType::UuidMorphs,
            ColumnType::Year,
        ]
    }
}

impl From<&str> for ColumnType {
    fn from(value: &str) -> Self {
        Self::from_name(value).unwrap_or_else(|| ColumnType::Other(value.to_string()))
    }
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Index Kinds
// ============================================================================

/// Index directive attached to a field.
///
/// Stored in model files as a plain string (`"none"`, `"primary"`, ...).
/// Anything outside the known set is kept verbatim in [`IndexKind::Other`]
/// and emitted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IndexKind {
    /// No index
    #[default]
    None,
    /// Primary key
    Primary,
    /// Unique index
    Unique,
    /// Plain index
    Index,
    /// Spatial index
    SpatialIndex,
    /// Full-text index
    Fulltext,
    /// Any other schema-builder index method
    Other(String),
}

impl IndexKind {
    /// Get the directive string (also the schema-builder method name)
    pub fn as_str(&self) -> &str {
        match self {
            IndexKind::None => "none",
            IndexKind::Primary => "primary",
            IndexKind::Unique => "unique",
            IndexKind::Index => "index",
            IndexKind::SpatialIndex => "spatialIndex",
            IndexKind::Fulltext => "fulltext",
            IndexKind::Other(name) => name,
        }
    }

    /// Whether an index call should be chained onto the column
    pub fn is_indexed(&self) -> bool {
        !matches!(self, IndexKind::None)
    }

    pub fn is_primary(&self) -> bool {
        matches!(self, IndexKind::Primary)
    }
}

impl From<&str> for IndexKind {
    fn from(value: &str) -> Self {
        match value {
            "" | "none" => IndexKind::None,
            "primary" => IndexKind::Primary,
            "unique" => IndexKind::Unique,
            "index" => IndexKind::Index,
            "spatialIndex" => IndexKind::SpatialIndex,
            "fulltext" => IndexKind::Fulltext,
            other => IndexKind::Other(other.to_string()),
        }
    }
}

impl From<String> for IndexKind {
    fn from(value: String) -> Self {
        IndexKind::from(value.as_str())
    }
}

impl From<IndexKind> for String {
    fn from(value: IndexKind) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for IndexKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Tests
// ============================================================================
