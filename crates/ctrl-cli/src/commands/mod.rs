pub mod categories;
pub mod dispatch;
pub mod get;
pub mod list;
pub mod markets;
pub mod nav;
pub mod schema;
pub mod shared;
pub mod summary;
pub mod triggers;
pub mod validate;
