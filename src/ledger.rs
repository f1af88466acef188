//! # Line-Item Ledger
//!
//! An ordered collection of billable line items with a derived total.
//!
//! Every mutation (adding, removing, or editing an item) recomputes the
//! affected item's `amount` and the ledger total synchronously before the
//! call returns. There is no deferred recomputation: `total()` is always
//! consistent with the items it was derived from.
//!
//! Item identifiers come from an [`IdSource`] passed into the mutating
//! calls, so the ledger carries no ambient global state and tests can use
//! a deterministic source.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::KuitansiError;

/// Supplies identifiers for new line items.
pub trait IdSource {
    fn next_id(&mut self) -> Uuid;
}

/// Production id source: random v4 UUIDs.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidSource;

impl IdSource for UuidSource {
    fn next_id(&mut self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Deterministic id source yielding 1, 2, 3, ... as UUIDs.
///
/// Useful for tests and reproducible documents.
#[derive(Debug, Default, Clone, Copy)]
pub struct SequentialSource {
    counter: u128,
}

impl IdSource for SequentialSource {
    fn next_id(&mut self) -> Uuid {
        self.counter += 1;
        Uuid::from_u128(self.counter)
    }
}

fn default_quantity() -> u32 {
    1
}

/// One billable row: description, unit price, quantity, derived amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Stable identifier, used only for addressing.
    pub id: Uuid,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub unit_price: f64,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    /// Derived: `unit_price * quantity`. Never set directly.
    #[serde(default)]
    pub amount: f64,
}

impl LineItem {
    fn new(id: Uuid) -> Self {
        Self {
            id,
            description: String::new(),
            unit_price: 0.0,
            quantity: 1,
            amount: 0.0,
        }
    }

    fn recompute_amount(&mut self) {
        self.amount = self.unit_price * self.quantity as f64;
    }
}

/// A single field update for [`Ledger::update_item`].
///
/// Price and quantity updates recompute the item's `amount` from the new
/// value and the existing other input; description edits leave it alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemUpdate {
    Description(String),
    UnitPrice(f64),
    Quantity(u32),
}

/// Ordered sequence of line items plus the eagerly maintained total.
///
/// The order is display order only; it never affects the total. The ledger
/// always holds at least one item: removal of the last one is rejected.
///
/// The ledger does not validate or clamp prices and quantities; the
/// surrounding form constrains what can be entered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    items: Vec<LineItem>,
    /// Derived: sum of item amounts.
    #[serde(default)]
    total: f64,
}

impl Ledger {
    /// Create a ledger seeded with one empty item.
    pub fn new(ids: &mut dyn IdSource) -> Self {
        Self {
            items: vec![LineItem::new(ids.next_id())],
            total: 0.0,
        }
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Sum of `amount` across all items.
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Append a new empty item (price 0, quantity 1) and return its id.
    pub fn add_item(&mut self, ids: &mut dyn IdSource) -> Uuid {
        let id = ids.next_id();
        self.items.push(LineItem::new(id));
        self.recompute_total();
        id
    }

    /// Remove the item with the given id.
    ///
    /// Rejected when exactly one item remains. An unknown id on a larger
    /// ledger is a defensive no-op.
    pub fn remove_item(&mut self, id: Uuid) -> Result<(), KuitansiError> {
        if self.items.len() <= 1 {
            return Err(KuitansiError::LastItem);
        }
        self.items.retain(|item| item.id != id);
        self.recompute_total();
        Ok(())
    }

    /// Apply one field update to the item with the given id.
    pub fn update_item(&mut self, id: Uuid, update: ItemUpdate) -> Result<(), KuitansiError> {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(KuitansiError::UnknownItem(id))?;

        match update {
            ItemUpdate::Description(description) => item.description = description,
            ItemUpdate::UnitPrice(price) => {
                item.unit_price = price;
                item.recompute_amount();
            }
            ItemUpdate::Quantity(quantity) => {
                item.quantity = quantity;
                item.recompute_amount();
            }
        }
        self.recompute_total();
        Ok(())
    }

    /// Recompute every amount and the total from scratch.
    ///
    /// Call after constructing a ledger from serialized form, where the
    /// derived fields cannot be trusted.
    pub fn recompute(&mut self) {
        for item in &mut self.items {
            item.recompute_amount();
        }
        self.recompute_total();
    }

    fn recompute_total(&mut self) {
        self.total = self.items.iter().map(|item| item.amount).sum();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ledger() -> (Ledger, SequentialSource) {
        let mut ids = SequentialSource::default();
        let ledger = Ledger::new(&mut ids);
        (ledger, ids)
    }

    #[test]
    fn new_ledger_has_one_empty_item() {
        let (ledger, _) = ledger();
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.total(), 0.0);
        let item = &ledger.items()[0];
        assert_eq!(item.description, "");
        assert_eq!(item.unit_price, 0.0);
        assert_eq!(item.quantity, 1);
        assert_eq!(item.amount, 0.0);
    }

    #[test]
    fn add_twice_then_price_each() {
        let (mut ledger, mut ids) = ledger();
        ledger.add_item(&mut ids);
        ledger.add_item(&mut ids);
        assert_eq!(ledger.len(), 3);
        assert_eq!(ledger.total(), 0.0);

        let item_ids: Vec<Uuid> = ledger.items().iter().map(|item| item.id).collect();
        for (id, price) in item_ids.iter().zip([1000.0, 2000.0, 3000.0]) {
            ledger.update_item(*id, ItemUpdate::UnitPrice(price)).unwrap();
        }
        assert_eq!(ledger.total(), 6000.0);
    }

    #[test]
    fn quantity_recomputes_amount_without_touching_price() {
        let (mut ledger, _) = ledger();
        let id = ledger.items()[0].id;

        ledger.update_item(id, ItemUpdate::UnitPrice(1500.0)).unwrap();
        ledger.update_item(id, ItemUpdate::Quantity(3)).unwrap();
        assert_eq!(ledger.get(id).unwrap().amount, 4500.0);

        ledger.update_item(id, ItemUpdate::Quantity(5)).unwrap();
        let item = ledger.get(id).unwrap();
        assert_eq!(item.unit_price, 1500.0);
        assert_eq!(item.amount, 7500.0);
        assert_eq!(ledger.total(), 7500.0);
    }

    #[test]
    fn description_edit_leaves_amount_alone() {
        let (mut ledger, _) = ledger();
        let id = ledger.items()[0].id;
        ledger.update_item(id, ItemUpdate::UnitPrice(250.0)).unwrap();
        ledger
            .update_item(id, ItemUpdate::Description("Iuran bulanan".into()))
            .unwrap();
        let item = ledger.get(id).unwrap();
        assert_eq!(item.description, "Iuran bulanan");
        assert_eq!(item.amount, 250.0);
    }

    #[test]
    fn remove_last_item_is_rejected() {
        let (mut ledger, _) = ledger();
        let id = ledger.items()[0].id;
        let err = ledger.remove_item(id).unwrap_err();
        assert!(matches!(err, KuitansiError::LastItem));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn remove_unknown_id_is_noop() {
        let (mut ledger, mut ids) = ledger();
        ledger.add_item(&mut ids);
        let before = ledger.clone();
        ledger.remove_item(Uuid::from_u128(0xdead)).unwrap();
        assert_eq!(ledger, before);
    }

    #[test]
    fn remove_updates_total() {
        let (mut ledger, mut ids) = ledger();
        let second = ledger.add_item(&mut ids);
        let first = ledger.items()[0].id;
        ledger.update_item(first, ItemUpdate::UnitPrice(100.0)).unwrap();
        ledger.update_item(second, ItemUpdate::UnitPrice(40.0)).unwrap();
        assert_eq!(ledger.total(), 140.0);

        ledger.remove_item(second).unwrap();
        assert_eq!(ledger.total(), 100.0);
    }

    #[test]
    fn update_unknown_id_errors() {
        let (mut ledger, _) = ledger();
        let err = ledger
            .update_item(Uuid::from_u128(0xbeef), ItemUpdate::UnitPrice(1.0))
            .unwrap_err();
        assert!(matches!(err, KuitansiError::UnknownItem(_)));
    }

    #[test]
    fn amounts_consistent_through_mixed_mutations() {
        let (mut ledger, mut ids) = ledger();
        let a = ledger.items()[0].id;
        let b = ledger.add_item(&mut ids);
        let c = ledger.add_item(&mut ids);

        ledger.update_item(a, ItemUpdate::UnitPrice(10.0)).unwrap();
        ledger.update_item(b, ItemUpdate::Quantity(4)).unwrap();
        ledger.update_item(b, ItemUpdate::UnitPrice(25.0)).unwrap();
        ledger.update_item(c, ItemUpdate::UnitPrice(7.5)).unwrap();
        ledger.remove_item(a).unwrap();

        for item in ledger.items() {
            assert_eq!(item.amount, item.unit_price * item.quantity as f64);
        }
        let expected: f64 = ledger.items().iter().map(|item| item.amount).sum();
        assert_eq!(ledger.total(), expected);
    }

    #[test]
    fn recompute_repairs_deserialized_state() {
        let json = r#"{
            "items": [
                {"id": "00000000-0000-0000-0000-000000000001", "unit_price": 500.0, "quantity": 2, "amount": 999.0}
            ],
            "total": 12.0
        }"#;
        let mut ledger: Ledger = serde_json::from_str(json).unwrap();
        ledger.recompute();
        assert_eq!(ledger.items()[0].amount, 1000.0);
        assert_eq!(ledger.total(), 1000.0);
    }

    #[test]
    fn negative_price_is_not_clamped() {
        let (mut ledger, _) = ledger();
        let id = ledger.items()[0].id;
        ledger.update_item(id, ItemUpdate::UnitPrice(-50.0)).unwrap();
        assert_eq!(ledger.total(), -50.0);
    }
}
