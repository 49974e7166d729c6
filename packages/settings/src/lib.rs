pub mod color;
pub mod document;
pub mod merge;
pub mod presets;
pub mod repository;
pub mod schema;
pub mod units;
pub mod validator;

pub use color::HexColor;
pub use document::*;
pub use merge::{merge_distinct, merge_with_defaults};
pub use presets::{detect_preset, find_preset, preset_values, presets, PresetKind, PresetRecord};
pub use repository::{
    load_or_default, InMemoryRepository, JsonFileRepository, RepositoryError, RepositoryResult,
    SettingsRepository,
};
pub use schema::{schema, CssBinding, CssFormat, FieldKind, FieldSpec, Schema};
pub use units::{convert_section, convert_subsection};
pub use validator::{FieldError, ValidatedFields, ValidationErrors, Validator};
