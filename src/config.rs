use core::time::Duration;

use crate::ship::ShipType;

pub const BOARD_SIZE: usize = 10;
pub const FLEET_SIZE: usize = 10;

/// Fleet in placement order: longest first, equal lengths grouped.
pub const FLEET: [ShipType; FLEET_SIZE] = [
    ShipType::new("Battleship", 4),
    ShipType::new("Cruiser", 3),
    ShipType::new("Cruiser", 3),
    ShipType::new("Destroyer", 2),
    ShipType::new("Destroyer", 2),
    ShipType::new("Destroyer", 2),
    ShipType::new("Submarine", 1),
    ShipType::new("Submarine", 1),
    ShipType::new("Submarine", 1),
    ShipType::new("Submarine", 1),
];

/// Total number of ship segments in a full fleet (20).
pub const TOTAL_SHIP_CELLS: usize = fleet_cells(&FLEET);

const fn fleet_cells(fleet: &[ShipType]) -> usize {
    let mut total = 0;
    let mut i = 0;
    while i < fleet.len() {
        total += fleet[i].length();
        i += 1;
    }
    total
}

/// Pause before the computer announces its shot on the interactive CLI.
pub const DEFAULT_THINK_TIME: Duration = Duration::from_secs(2);

/// Environment variable read by [`crate::init_logging`].
pub const LOG_ENV: &str = "BROADSIDE_LOG";
