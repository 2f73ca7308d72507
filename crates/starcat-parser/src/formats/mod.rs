mod common;
mod fk5_cross_index;
mod hyg;
mod sao;
mod synthetic;

pub use fk5_cross_index::{Fk5CrossIndexParser, FK5_COLUMNS};
pub use hyg::HygParser;
pub use sao::SaoCsvParser;
pub use synthetic::SyntheticGenerator;
