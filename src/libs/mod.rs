pub mod chimera;
pub mod column;
pub mod error;
pub mod filter;
pub mod identity;
pub mod io;
pub mod search;
pub mod seq;
pub mod trim;
