/// Reading of equation batch files
pub mod load_from_file;
