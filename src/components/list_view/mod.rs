mod config;
mod list;
mod props;
mod report_row;
mod row_item;
mod state;
mod view;

pub use config::{AddButtonConfig, DEFAULT_ICONS, Icons, ListConfig, RowButtonConfig, RowConfig, RowKind};
pub use list::ListComponent;
pub use props::{ListFilters, ListProps, PageHandler};
pub use report_row::ReportRowFields;
pub use state::{ListState, Status};
pub use view::{AddView, ListView, RowLabel, RowView, select_view};
