// Chart directive DSL parser module

pub mod ast;
pub mod command;
pub mod labels;
pub mod lexer;
pub mod mapping;
pub mod pipeline;

// Public API re-exports
pub use ast::{ChartDirective, Directive, DirectivePipeline, FieldRef, Labels, RoleMap};
pub use pipeline::parse_directives;
