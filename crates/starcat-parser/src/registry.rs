use crate::errors::{ParserAttempt, ParserError};
use crate::formats::{Fk5CrossIndexParser, HygParser, SaoCsvParser};
use crate::model::{AngleEncoding, FormatDescriptor, MagnitudePolicy, ParsedCatalog, SourceFormat};

pub trait CatalogParser {
    fn name(&self) -> &'static str;
    fn format(&self) -> SourceFormat;
    fn parse(&self, content: &str) -> Result<ParsedCatalog, ParserError>;
}

/// Per-run overrides of a format's declared descriptor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    pub magnitude_policy: Option<MagnitudePolicy>,
    /// Applies only to sources whose RA is already decimal.
    pub ra_encoding: Option<AngleEncoding>,
}

impl ParseOptions {
    pub fn apply(&self, mut descriptor: FormatDescriptor) -> FormatDescriptor {
        if let Some(policy) = self.magnitude_policy {
            descriptor = descriptor.with_magnitude_policy(policy);
        }
        if let Some(encoding) = self.ra_encoding {
            if descriptor.ra.encoding != AngleEncoding::Sexagesimal {
                descriptor = descriptor.with_ra_encoding(encoding);
            }
        }
        descriptor
    }
}

/// Returns the text parser for `format`, or `None` for formats that are
/// generated rather than parsed.
pub fn parser_for(format: SourceFormat, options: &ParseOptions) -> Option<Box<dyn CatalogParser>> {
    let descriptor = options.apply(format.descriptor());
    match format {
        SourceFormat::Fk5CrossIndex => Some(Box::new(Fk5CrossIndexParser::new(descriptor))),
        SourceFormat::Hyg => Some(Box::new(HygParser::new(descriptor))),
        SourceFormat::SaoCsv => Some(Box::new(SaoCsvParser::new(descriptor))),
        SourceFormat::Synthetic => None,
    }
}

/// Detects the source format and parses it with default options.
pub fn parse_catalog(content: &str) -> Result<ParsedCatalog, ParserError> {
    parse_catalog_with(content, &ParseOptions::default())
}

pub fn parse_catalog_with(
    content: &str,
    options: &ParseOptions,
) -> Result<ParsedCatalog, ParserError> {
    let fk5 = Fk5CrossIndexParser::new(options.apply(SourceFormat::Fk5CrossIndex.descriptor()));
    let sao = SaoCsvParser::new(options.apply(SourceFormat::SaoCsv.descriptor()));
    let hyg = HygParser::new(options.apply(SourceFormat::Hyg.descriptor()));
    let parsers: [&dyn CatalogParser; 3] = [&fk5, &sao, &hyg];
    parse_with_parsers(content, &parsers)
}

pub fn parse_with_parsers(
    content: &str,
    parsers: &[&dyn CatalogParser],
) -> Result<ParsedCatalog, ParserError> {
    let mut attempts = Vec::new();

    for parser in parsers {
        match parser.parse(content) {
            Ok(parsed) => return Ok(parsed),
            Err(ParserError::FormatMismatch { reason, .. }) => {
                attempts.push(ParserAttempt::new(parser.name(), reason));
            }
            Err(err) => return Err(err),
        }
    }

    Err(ParserError::NoMatchingParser { attempts })
}
