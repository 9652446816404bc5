//! Uploading client

pub mod uploader;

pub use uploader::{split_into_chunks, UploadReport, Uploader};
