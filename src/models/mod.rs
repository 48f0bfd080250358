pub mod record;
pub mod batch;
pub mod summary;

pub use record::*;
pub use batch::*;
pub use summary::*;
