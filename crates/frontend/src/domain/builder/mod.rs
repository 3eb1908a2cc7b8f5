pub mod model;
pub mod summary;
pub mod table_block;
pub mod view;
pub mod view_model;
