use ladder::LadderCatalog;
use lazy_static::lazy_static;

pub mod about;
pub mod error;
pub mod example_sheets;
pub mod gel_layout;
pub mod ladder;
pub mod migrate;
pub mod render_export;
pub mod render_plotly;

lazy_static! {
    // Reference ladder calibrations embedded at build time
    pub static ref GEL_LADDERS: LadderCatalog = LadderCatalog::default();
}
