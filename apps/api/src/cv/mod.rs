//! CV aggregate core: assembly of composed documents, the main-CV
//! invariant, and the HTTP surface.

pub mod assembler;
pub mod handlers;
pub mod main_guard;
