use super::entity::EntityView;
use super::{Field, Menu};
use crate::models::NewAttendee;

pub struct AttendeesView;

impl EntityView for AttendeesView {
    type Input = NewAttendee;

    const MENU: Menu = Menu::Attendees;
    const HEADING: &'static str = "Attendees";
    const ACTION: &'static str = "/attendees";
    const SUBMIT_LABEL: &'static str = "Add Attendee";
    const SUCCESS: &'static str = "Attendee inserted.";
    const EMPTY: &'static str = "No attendees yet.";

    fn fields() -> Vec<Field> {
        vec![Field::event_id("event_id"), Field::text("email", "Email")]
    }
}
