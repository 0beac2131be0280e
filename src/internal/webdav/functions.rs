pub mod copy_move;
pub mod delete;
pub mod get;
pub mod mkcol;
pub mod propfind;
pub mod proppatch;
pub mod put;
