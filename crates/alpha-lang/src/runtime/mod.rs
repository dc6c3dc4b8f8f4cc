pub mod value;
pub mod variables;
pub mod eval;
pub mod interpreter;
