use super::entity::EntityView;
use super::{Field, Menu};
use crate::models::NewSponsor;

pub struct SponsorsView;

impl EntityView for SponsorsView {
    type Input = NewSponsor;

    const MENU: Menu = Menu::Sponsors;
    const HEADING: &'static str = "Sponsors";
    const ACTION: &'static str = "/sponsors";
    const SUBMIT_LABEL: &'static str = "Add Sponsor";
    const SUCCESS: &'static str = "Sponsor added.";
    const EMPTY: &'static str = "No sponsors yet.";

    fn fields() -> Vec<Field> {
        vec![
            Field::event_id("event_id"),
            Field::text("name", "Name"),
            Field::text("level", "Level"),
            Field::amount("contribution", "Contribution"),
        ]
    }
}
