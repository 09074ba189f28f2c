pub mod file_operations;
pub mod screen;
pub mod text_offsets;
