pub mod step;
pub mod tokenizer;

pub use step::{Cardinality, IndexSpec, Modifier, Position, Step, StepTarget, TextFilter};
pub use tokenizer::{parse, parse_segment, ParseError};
