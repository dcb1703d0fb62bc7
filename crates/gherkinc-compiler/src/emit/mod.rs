//! C++ emission: lowers parsed features into the self-contained test file.

mod codegen;


pub use codegen::{CodeGen, gen_expression};
