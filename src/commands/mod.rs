pub mod summary;

pub use summary::handle_summary;
