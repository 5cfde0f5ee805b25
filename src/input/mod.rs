mod reader;
pub mod tokenizer;

pub use reader::{EditorReader, LineReader, ScriptedReader};
pub use tokenizer::{tokenize, TokenSequence, TokenizeError};
