//! Services backing the pages
//!
//! - Dataset loading, saving and record mutations
//! - Copy naming for duplicated records

pub mod naming;
pub mod store;

pub use store::{
    create_dataset, delete_record, duplicate_record, export_file_name, find, load_dataset,
    read_edit_buffer, replace_record, save_dataset, write_edit_buffer,
};
