pub mod cargo;
pub mod collection;
pub mod record;

pub use collection::get as collection_get;
pub use collection::post as collection_post;

pub use record::delete as record_delete;
pub use record::get as record_get;
pub use record::patch as record_patch;
pub use record::put as record_put;

pub use cargo::assign as cargo_assign;
pub use cargo::list as cargo_list;
pub use cargo::remove as cargo_remove;
