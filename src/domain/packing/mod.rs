//! Packing module - packing lists, category catalog, and sheet I/O.

mod catalog;
mod packing_list;
mod sheet;

pub use catalog::{CategoryCatalog, STANDARD_CATEGORIES};
pub use packing_list::{PackingList, PackingListItem};
pub use sheet::{
    export_rows, import_rows, PackingImportError, SheetImport, EXPORT_HEADER, HEADER_SEARCH_ROWS,
};
