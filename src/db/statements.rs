//! Every statement the console sends. Nothing else reaches the database.

pub const PROBE: &str =
    "SELECT COUNT(*) AS c FROM information_schema.tables WHERE table_schema = ?";

pub const CHECK_LOGIN: &str = "SELECT check_login_credentials(?, ?)";

pub const INSERT_EVENT: &str = "INSERT INTO events (title, description, location, start_time, end_time, user_id) VALUES (?, ?, ?, ?, ?, ?)";
pub const LIST_EVENTS: &str = "SELECT * FROM events ORDER BY id DESC";

pub const INSERT_ATTENDEE: &str = "INSERT INTO attendees (event_id, email) VALUES (?, ?)";
pub const LIST_ATTENDEES: &str = "SELECT * FROM attendees";

pub const INSERT_VENDOR: &str =
    "INSERT INTO vendors (event_id, name, service, amount_to_be_paid) VALUES (?, ?, ?, ?)";
pub const LIST_VENDORS: &str = "SELECT * FROM vendors";

pub const INSERT_SPONSOR: &str =
    "INSERT INTO sponsors (event_id, name, level, contribution) VALUES (?, ?, ?, ?)";
pub const LIST_SPONSORS: &str = "SELECT * FROM sponsors";

pub const EVENT_SUMMARY: &str = "CALL get_event_summary(?)";
