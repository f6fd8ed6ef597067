pub mod json_record_file;
pub mod memory_record_file;
pub mod record_file;
