pub mod compile;
pub mod init;
pub mod lint;
pub mod presets;
pub mod settings;
pub mod transfer;

pub use compile::{compile, CompileArgs};
pub use init::{init, InitArgs};
pub use lint::{lint, LintArgs};
pub use presets::{presets, PresetsArgs};
pub use settings::{convert, reset, update, validate, ConvertArgs, UpdateArgs, ValidateArgs};
pub use transfer::{export, import, ExportArgs, ImportArgs};
