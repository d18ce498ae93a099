// Adapters layer: concrete implementations of the domain ports.

pub mod file_sink;

pub use file_sink::FileSink;
