mod interface;
mod suid;

pub use interface::*;
pub use suid::*;
