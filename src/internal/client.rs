pub mod structs;

mod impl_read;
mod impl_sync;
mod impl_write;
