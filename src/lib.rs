pub mod app;
pub mod config;
pub mod discovery;
pub mod domain;
pub mod error;
pub mod fasta;
pub mod fs_util;
pub mod genbank;
pub mod output;
pub mod resolver;
pub mod splitter;
pub mod summary;
