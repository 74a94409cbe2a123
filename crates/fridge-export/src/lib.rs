//! # fridge-export: File Formats for Fridge Manager
//!
//! Everything that leaves the process as a file: the binary product and
//! order exports, and the supplier order text file.
//!
//! ## Module Organization
//! - [`proto`] - Protobuf message definitions
//! - [`codec`] - `ProtobufCodec`: encode / decode, export / import
//! - [`report_file`] - Timestamped supplier order files
//! - [`error`] - Export error types

pub mod codec;
pub mod error;
pub mod proto;
pub mod report_file;

pub use codec::ProtobufCodec;
pub use error::{ExportError, ExportResult};
pub use proto::{OrderProto, ProductListProto, ProductProto};
pub use report_file::{write_report, DEFAULT_PREFIX};
