pub mod renderer;
pub mod runtime;
pub mod typescript;
pub mod writer;
