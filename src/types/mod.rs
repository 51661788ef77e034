mod category;
mod records;
mod result;

pub use category::*;
pub use records::*;
pub use result::*;
