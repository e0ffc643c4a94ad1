pub mod daily;
pub mod extras;
pub mod hourly;
pub mod season;
pub mod weather;

pub use daily::{DailyRecord, DailyRow};
pub use extras::PassThroughColumns;
pub use hourly::{HourlyRecord, HourlyRow, RawHourlyRecord};
pub use season::Season;
pub use weather::WeatherSituation;
