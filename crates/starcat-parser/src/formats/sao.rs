use crate::errors::ParserError;
use crate::model::{FormatDescriptor, ParsedCatalog, SourceFormat};
use crate::registry::CatalogParser;

use super::common::parse_header_table;

/// SAO catalog export with header `name,hd,ra,dec,vmag,class`. The `class`
/// column is mostly the literal `STAR`, which carries no spectral data.
pub struct SaoCsvParser {
    descriptor: FormatDescriptor,
}

impl Default for SaoCsvParser {
    fn default() -> Self {
        Self::new(SourceFormat::SaoCsv.descriptor())
    }
}

impl SaoCsvParser {
    const NAME: &'static str = "SAO_CSV";
    const SIGNATURE: &'static [&'static str] = &["name", "hd", "ra", "dec", "vmag", "class"];

    pub fn new(descriptor: FormatDescriptor) -> Self {
        Self { descriptor }
    }
}

impl CatalogParser for SaoCsvParser {
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
