use super::entity::EntityView;
use super::{Field, Menu};
use crate::models::NewEvent;

pub struct EventsView;

impl EntityView for EventsView {
    type Input = NewEvent;

    const MENU: Menu = Menu::Events;
    const HEADING: &'static str = "Events";
    const ACTION: &'static str = "/events";
    const SUBMIT_LABEL: &'static str = "Add Event";
    const SUCCESS: &'static str = "Event inserted (triggers run on DB).";
    const EMPTY: &'static str = "No events yet.";

    fn fields() -> Vec<Field> {
        vec![
            Field::text("title", "Title"),
            Field::text("location", "Location"),
            Field::text("start_time", "Start time (YYYY-MM-DD HH:MM:SS)"),
            Field::text("end_time", "End time (YYYY-MM-DD HH:MM:SS)"),
            Field::textarea("description", "Description"),
        ]
    }
}
