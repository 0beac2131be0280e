pub mod webdav_error;
