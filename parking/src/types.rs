pub const DEFAULT_COLOR: &str = "White";
pub const EMPTY_SLOT: &str = "--";
pub const STATUS_HEADER_SLOT: &str = "Slot No.";
pub const STATUS_HEADER_REGISTRATION: &str = "Registration No.";
pub const STATUS_SLOT_COLUMN_WIDTH: usize = 9;
/// Largest number of slots a lot can be created with.
pub const MAX_LOT_SIZE: usize = i32::MAX as usize;

pub const DEFAULT_INITIAL_DURATION: Units = 2;
pub const DEFAULT_SUBSEQUENT_DURATION: Units = 1;
pub const DEFAULT_INITIAL_RATE: Money = 10;
pub const DEFAULT_SUBSEQUENT_RATE: Money = 10;

/// 1-based slot number; slot 1 is nearest to the entry.
pub type SlotNumber = usize;
/// A count of whole time units (hours or minutes, depending on configuration).
pub type Units = u64;
pub type Money = u64;
/// Milliseconds since the Unix epoch.
pub type Timestamp = i64;
