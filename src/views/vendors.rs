use super::entity::EntityView;
use super::{Field, Menu};
use crate::models::NewVendor;

pub struct VendorsView;

impl EntityView for VendorsView {
    type Input = NewVendor;

    const MENU: Menu = Menu::Vendors;
    const HEADING: &'static str = "Vendors";
    const ACTION: &'static str = "/vendors";
    const SUBMIT_LABEL: &'static str = "Add Vendor";
    const SUCCESS: &'static str = "Vendor added.";
    const EMPTY: &'static str = "No vendors yet.";

    fn fields() -> Vec<Field> {
        vec![
            Field::event_id("event_id"),
            Field::text("name", "Name"),
            Field::text("service", "Service"),
            Field::amount("amount_to_be_paid", "Amount to be paid"),
        ]
    }
}
