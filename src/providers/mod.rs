pub mod analysis;

pub use analysis::AnalysisProvider;
