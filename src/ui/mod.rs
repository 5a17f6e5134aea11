pub mod icons;
pub mod output;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{banner, dim, error, header, info, section, sql, success, summary_row, warn};
pub use table::{records_table, report_table};
pub use theme::{theme, Theme};
