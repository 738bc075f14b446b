pub mod billing;
pub mod month;
pub mod table;

pub use billing::BillingRow;
pub use month::{DateRange, MonthSelector};
pub use table::TableReference;
