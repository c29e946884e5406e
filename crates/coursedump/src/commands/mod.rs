//! CLI command implementations.

mod archive;

pub(crate) use archive::ArchiveArgs;
