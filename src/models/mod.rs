pub mod day_record;
pub mod day_type;
pub mod origin;
pub mod status;

pub use day_record::{DayEntry, DayMap, DayRecord};
pub use day_type::DayType;
pub use origin::Origin;
pub use status::DayStatus;
