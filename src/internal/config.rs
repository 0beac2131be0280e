pub mod connection_options;
