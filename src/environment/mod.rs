pub mod hazard;
pub mod weather;

pub use hazard::{Hazard, HazardField, HazardKind, HazardUpdate};
pub use weather::{Weather, WeatherState, WEATHER_PERIOD};
