pub mod exam_loader;

pub use exam_loader::load_exam_file;
