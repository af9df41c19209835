pub mod category;
pub mod event;
pub mod organisation;

pub use category::Category;
pub use event::{Event, EventDetail, SearchCriteria};
pub use organisation::Organisation;
