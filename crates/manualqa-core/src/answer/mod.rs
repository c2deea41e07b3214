//! Answer synthesis and the end-to-end pipeline

mod categories;
mod pipeline;
mod synthesizer;

pub use categories::{categorize, ChunkCategory};
pub use pipeline::AnswerPipeline;
pub use synthesizer::{
    generate_response, is_pressure_question, AssistantResponse, ResponseSynthesizer, SourceRef,
    NO_EVIDENCE_MESSAGE,
};
