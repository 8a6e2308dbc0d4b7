//! Engine variants and pipeline orchestration.

pub mod engine;
pub mod engines;
pub mod pipeline;

pub use engine::{build_engine, EngineKind, ExtractionEngine};
pub use engines::{LlmStubEngine, MlEngine, RuleEngine};
pub use pipeline::{ExtractionPipeline, PipelineOutput, PipelineReport};
