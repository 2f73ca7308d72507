pub mod angle;
pub mod errors;
pub mod formats;
pub mod model;
pub mod normalize;
mod registry;

pub use angle::{parse_angle, to_sexagesimal, Sexagesimal};
pub use errors::{AngleError, MagnitudeError, ParserAttempt, ParserError, RowError};
pub use formats::{Fk5CrossIndexParser, HygParser, SaoCsvParser, SyntheticGenerator};
pub use model::{
    AngleEncoding, AngleRole, CanonicalStarRecord, FormatDescriptor, IngestReport,
    MagnitudePolicy, ParsedCatalog, Precision, SkippedRow, SourceFormat, FAINT_MAGNITUDE,
};
pub use registry::{
    parse_catalog, parse_catalog_with, parse_with_parsers, parser_for, CatalogParser,
    ParseOptions,
};

#[cfg(test)]
mod tests;
