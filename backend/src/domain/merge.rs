//! Merge-by-identity: collapsing entries that describe the same product.
//!
//! Two entries are the same item when their names and units match after
//! trimming and lowercasing. Merging keeps one entry per identity in
//! first-seen order, sums quantities and ANDs the `checked` flags, so a
//! merged row only counts as bought once every contributing row was bought.
//! All other fields (id, category) come from the first entry of the group.
//!
//! The same rule drives the list view, the shopping summary, template detail
//! views, template loading, recipe ingredient addition and the single-item
//! add path.

use std::collections::HashMap;

/// An entry that can take part in merge-by-identity.
///
/// `checked` presence is a property of the implementing type: list rows and
/// history rows always report it, template items and ingredients never do.
pub trait Mergeable {
    /// Display name as entered.
    fn name(&self) -> &str;
    /// Unit as entered.
    fn unit(&self) -> &str;
    /// Quantity in `unit`.
    fn quantity(&self) -> f64;
    /// Replace the quantity.
    fn set_quantity(&mut self, quantity: f64);

    /// Whether the entry has been bought, if the type tracks it.
    fn checked(&self) -> Option<bool> {
        None
    }

    /// Replace the bought flag. Types without one ignore the call.
    fn set_checked(&mut self, _checked: bool) {}

    /// Identity key of this entry.
    fn identity_key(&self) -> IdentityKey {
        IdentityKey::new(self.name(), self.unit())
    }
}

/// Normalised (name, unit) pair identifying an item.
///
/// # Examples
/// ```
/// use grocery_backend::domain::merge::IdentityKey;
///
/// assert_eq!(IdentityKey::new(" Pommes ", "KG"), IdentityKey::new("pommes", "kg"));
/// assert_ne!(IdentityKey::new("pommes", "kg"), IdentityKey::new("pommes", "g"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdentityKey {
    name: String,
    unit: String,
}

impl IdentityKey {
    /// Build the key for a raw name and unit.
    #[must_use]
    pub fn new(name: &str, unit: &str) -> Self {
        Self {
            name: name.trim().to_lowercase(),
            unit: unit.trim().to_lowercase(),
        }
    }

    /// Normalised name component.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Normalised unit component.
    #[must_use]
    pub fn unit(&self) -> &str {
        &self.unit
    }
}

/// Fold `member` into `accumulated`, which already heads its group.
fn absorb<T: Mergeable>(accumulated: &mut T, member: &T) {
    accumulated.set_quantity(accumulated.quantity() + member.quantity());
    if let (Some(head), Some(next)) = (accumulated.checked(), member.checked()) {
        accumulated.set_checked(head && next);
    }
}

/// Collapse entries sharing an [`IdentityKey`].
///
/// Output order follows the first appearance of each key. Empty input gives
/// empty output; a blank name is a valid key.
///
/// # Examples
/// ```
/// use grocery_backend::domain::merge::merge_by_identity;
/// use grocery_backend::domain::{GroceryItem, GroceryItemId};
///
/// let items = vec![
///     GroceryItem::new(GroceryItemId::random(), "Pommes", 2.0, "kg", false),
///     GroceryItem::new(GroceryItemId::random(), "pommes", 1.0, "Kg", true),
/// ];
/// let merged = merge_by_identity(items);
/// assert_eq!(merged.len(), 1);
/// assert_eq!(merged[0].name, "Pommes");
/// assert!((merged[0].quantity - 3.0).abs() < f64::EPSILON);
/// assert!(!merged[0].checked);
/// ```
pub fn merge_by_identity<T, I>(items: I) -> Vec<T>
where
    T: Mergeable,
    I: IntoIterator<Item = T>,
{
    let mut positions: HashMap<IdentityKey, usize> = HashMap::new();
    let mut merged: Vec<T> = Vec::new();

    for item in items {
        let key = item.identity_key();
        match positions.get(&key).and_then(|&index| merged.get_mut(index)) {
            Some(head) => absorb(head, &item),
            None => {
                positions.insert(key, merged.len());
                merged.push(item);
            }
        }
    }

    merged
}

/// Changes needed to add a batch of entries onto an existing list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppendPlan<T, N> {
    /// Existing list rows with their quantity increased.
    pub updates: Vec<T>,
    /// Groups with no counterpart on the list, still to be inserted.
    pub inserts: Vec<N>,
}

impl<T, N> AppendPlan<T, N> {
    /// Whether the plan changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.updates.is_empty() && self.inserts.is_empty()
    }
}

/// Plan the "add to current list" mode.
///
/// `incoming` is merged with itself first. Each resulting group either bumps
/// the quantity of the first list row with the same key or becomes an
/// insertion. A list row matched by several groups cannot happen because the
/// groups already have distinct keys.
pub fn plan_append<T, N>(current: &[T], incoming: Vec<N>) -> AppendPlan<T, N>
where
    T: Mergeable + Clone,
    N: Mergeable,
{
    let mut first_rows: HashMap<IdentityKey, &T> = HashMap::new();
    for row in current {
        first_rows.entry(row.identity_key()).or_insert(row);
    }

    let mut plan = AppendPlan {
        updates: Vec::new(),
        inserts: Vec::new(),
    };
    for group in merge_by_identity(incoming) {
        match first_rows.get(&group.identity_key()) {
            Some(existing) => {
                let mut updated = (*existing).clone();
                updated.set_quantity(updated.quantity() + group.quantity());
                plan.updates.push(updated);
            }
            None => plan.inserts.push(group),
        }
    }
    plan
}

/// Outcome of adding one entry to a list with accumulation.
#[derive(Debug, Clone, PartialEq)]
pub enum Accumulation<T, N> {
    /// An existing row absorbed the quantity.
    Updated(T),
    /// No row matched; the entry is new.
    Inserted(N),
}

/// Single-item add: accumulate onto the first matching row or insert.
///
/// Adding the same name/unit pair repeatedly only ever grows one row.
pub fn accumulate_into<T, N>(current: &[T], entry: N) -> Accumulation<T, N>
where
    T: Mergeable + Clone,
    N: Mergeable,
{
    let key = entry.identity_key();
    match current.iter().find(|row| row.identity_key() == key) {
        Some(existing) => {
            let mut updated = existing.clone();
            updated.set_quantity(updated.quantity() + entry.quantity());
            Accumulation::Updated(updated)
        }
        None => Accumulation::Inserted(entry),
    }
}
