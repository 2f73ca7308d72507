use crate::errors::ParserError;
use crate::model::{FormatDescriptor, ParsedCatalog, SourceFormat};
use crate::registry::CatalogParser;

use super::common::parse_header_table;

/// HYG style comma separated table: `ra, dec, mag` plus optional
/// `proper, bf, hr, hd, spect` columns.
pub struct HygParser {
    descriptor: FormatDescriptor,
}

impl Default for HygParser {
    fn default() -> Self {
        Self::new(SourceFormat::Hyg.descriptor())
    }
}

impl HygParser {
    const NAME: &'static str = "HYG";
    const SIGNATURE: &'static [&'static str] = &["ra", "dec", "mag"];

    pub fn new(descriptor: FormatDescriptor) -> Self {
        Self { descriptor }
    }
}

impl CatalogParser for HygParser {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn format(&self) -> SourceFormat {
        self.descriptor.format
    }

    fn parse(&self, content: &str) -> Result<ParsedCatalog, ParserError> {
        parse_header_table(Self::NAME, &self.descriptor, Self::SIGNATURE, content)
    }
}
