pub mod collection;
pub mod compiler;
pub mod draw;
pub mod function;
pub mod layer;
pub mod motion;
pub mod options;
pub mod pattern;
pub mod scanner;
pub mod warning;
