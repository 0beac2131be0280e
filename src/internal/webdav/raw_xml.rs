pub mod impl_multi_status;
pub mod raw_file;
pub mod request_body;
