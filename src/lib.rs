// Library exports for sketchspec

pub mod assemble;
pub mod data;
pub mod ingest;
pub mod messages;
pub mod options;
pub mod parser;
pub mod pipeline;
pub mod roles;
pub mod settings;
pub mod spec;
pub mod telemetry;
pub mod validate;

pub use messages::{EnglishCatalog, MessageCatalog, MessageKey};
pub use pipeline::build_view_model;
pub use settings::{ChartType, VisualSettings};
pub use spec::{ChartSpec, ViewModel};
pub use validate::{ShapeError, XyMapping};
