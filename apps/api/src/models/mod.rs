pub mod cv;
pub mod entities;
pub mod header;
