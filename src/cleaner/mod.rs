pub mod engine;
pub mod manifest;
pub mod purger;

pub use engine::{
    delete_by_reference, delete_from_log, delete_global, delete_per_folder, find, find_output,
    CleanReport, EngineOptions, FindReport, Mode,
};
pub use manifest::DuplicateLogEntry;
pub use purger::PurgeReport;
