//! Display formatting for terminal output
//!
//! Amount/date formatting, the rendered transaction list, and register and
//! totals output.

pub mod format;
pub mod list;
pub mod transaction;

pub use list::ListView;
pub use transaction::{
    format_register, format_totals, format_transaction_details, format_transaction_row,
    render_list,
};
