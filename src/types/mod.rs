pub mod nav;
pub mod notification;
pub mod page;
pub mod ws;

pub use nav::*;
pub use notification::*;
pub use page::*;
pub use ws::*;
