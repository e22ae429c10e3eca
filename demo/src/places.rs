//! Few common places in the city of Wrocław, used in the demo app.

use waymark::{lon_lat, Position};

/// Main train station of the city of Wrocław.
pub fn wroclaw_glowny() -> Position {
    lon_lat(17.03664, 51.09916)
}

/// Taking a public bus (line 106) is probably the cheapest option to get from the train
/// station to the airport.
pub fn dworcowa_bus_stop() -> Position {
    lon_lat(17.03940, 51.10005)
}

/// Musical Theatre Capitol.
pub fn capitol() -> Position {
    lon_lat(17.03018, 51.10073)
}

/// Shopping center, and the main intercity bus station.
pub fn wroclavia() -> Position {
    lon_lat(17.03471, 51.09648)
}
