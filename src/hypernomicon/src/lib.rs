//! Conversion of Hypernomicon XML exports (debates, positions, arguments)
//! into the `{class, linkDataArray}` documents of the Block Editor diagram widget.

pub mod browser;
pub mod cmd;
pub mod config;
pub mod convert;
pub mod error;
pub mod format;
pub mod layout;
pub mod listing;
pub mod loader;
pub mod mapper;
pub mod output;
pub mod records;
pub mod resolver;

pub use config::ConvertConfig;
pub use convert::{convert, ConvertReport};
pub use error::{ConvertError, ConvertResult};
pub use mapper::BlockEditorModel;
