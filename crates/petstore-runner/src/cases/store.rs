use petstore_core::{Inventory, SchemaKind, ShapeKind};

use super::{ContractCase, Feature};
use crate::assert::{expect_fields, expect_model, expect_schema};
use crate::error::ContractError;
use crate::harness::Harness;
use crate::payload;

const ORDER_NOT_FOUND: &str = "Order not found";

/// `shipDate` is left out: the service may normalize the timestamp.
const ORDER_FIELDS: &[&str] = &["id", "petId", "quantity", "status"];

pub(super) fn cases() -> Vec<ContractCase> {
    vec![
        ContractCase::new("store::place_order", Feature::Store, "Place an order", place_order),
        ContractCase::new(
            "store::get_order_by_id",
            Feature::Store,
            "Read an order by id",
            get_order_by_id,
        ),
        ContractCase::new(
            "store::delete_order_by_id",
            Feature::Store,
            "Delete an order, then reading it answers 404",
            delete_order_by_id,
        ),
        ContractCase::new(
            "store::get_nonexistent_order",
            Feature::Store,
            "Reading a missing order answers 404",
            get_nonexistent_order,
        ),
        ContractCase::new(
            "store::inventory",
            Feature::Store,
            "Inventory maps statuses to counts",
            inventory,
        ),
    ]
}

fn place_order(h: &Harness) -> Result<(), ContractError> {
    let order = h.adopt_order(payload::order(h.next_id(), h.next_id()))?;
    let sent = order.body();

    let resp = h.api().place_order(sent)?.expect_status(200)?;
    let body = resp.expect_json()?;
    expect_schema(&resp.label, &body, SchemaKind::Order)?;
    expect_fields(&resp.label, &body, sent, ORDER_FIELDS)
}

fn get_order_by_id(h: &Harness) -> Result<(), ContractError> {
    let order = h.create_order()?;

    let resp = h.api().get_order(order.id())?.expect_status(200)?;
    let body = resp.expect_json()?;
    expect_schema(&resp.label, &body, SchemaKind::Order)?;
    expect_fields(&resp.label, &body, order.body(), ORDER_FIELDS)
}

fn delete_order_by_id(h: &Harness) -> Result<(), ContractError> {
    let order = h.create_order()?;

    h.api().delete_order(order.id())?.expect_status(200)?;
    h.api()
        .get_order(order.id())?
        .expect_status(404)?
        .expect_text(ORDER_NOT_FOUND)?;
    Ok(())
}

fn get_nonexistent_order(h: &Harness) -> Result<(), ContractError> {
    h.api()
        .get_order(h.missing_order_id())?
        .expect_status(404)?
        .expect_text(ORDER_NOT_FOUND)?;
    Ok(())
}

fn inventory(h: &Harness) -> Result<(), ContractError> {
    let resp = h.api().inventory()?.expect_status(200)?;
    let body = resp
        .expect_shape(ShapeKind::KeyedObject)?
        .into_value()
        .unwrap_or_default();
    expect_schema(&resp.label, &body, SchemaKind::Inventory)?;
    let inventory: Inventory = expect_model(&resp.label, body)?;
    tracing::debug!(statuses = inventory.len(), "inventory read");
    Ok(())
}
