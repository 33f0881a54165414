pub mod ast;
pub mod diag;
pub mod location;
pub mod parse;
pub mod sourcemap;
pub mod util;
