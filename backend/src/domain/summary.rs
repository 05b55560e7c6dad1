//! Export view of the current list.
//!
//! The list is merged by identity and split by the merged bought flag, the
//! same grouping the printable export uses.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::GroceryItem;
use super::merge::merge_by_identity;

/// Merged list split into what is left to buy and what is already bought.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingSummary {
    /// Merged groups not yet fully bought.
    pub to_buy: Vec<GroceryItem>,
    /// Merged groups whose every contributing row is bought.
    pub already_bought: Vec<GroceryItem>,
    /// Number of merged groups.
    pub total_items: usize,
    /// Number of merged groups already bought.
    pub bought_items: usize,
}

impl ShoppingSummary {
    /// Build the summary from raw list rows.
    ///
    /// # Examples
    /// ```
    /// use grocery_backend::domain::{GroceryItem, GroceryItemId, ShoppingSummary};
    ///
    /// let summary = ShoppingSummary::from_items(&[
    ///     GroceryItem::new(GroceryItemId::random(), "Lait", 1.0, "l", true),
    ///     GroceryItem::new(GroceryItemId::random(), "Pain", 2.0, "pièce(s)", false),
    /// ]);
    /// assert_eq!(summary.total_items, 2);
    /// assert_eq!(summary.bought_items, 1);
    /// ```
    #[must_use]
    pub fn from_items(items: &[GroceryItem]) -> Self {
        let (already_bought, to_buy): (Vec<_>, Vec<_>) = merge_by_identity(items.iter().cloned())
            .into_iter()
            .partition(|item| item.checked);
        Self {
            total_items: to_buy.len() + already_bought.len(),
            bought_items: already_bought.len(),
            to_buy,
            already_bought,
        }
    }

    /// Render a plain-text document with both sections and a totals footer.
    /// An empty list renders a single notice instead.
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = String::from("Shopping list\n");
        if self.total_items == 0 {
            out.push_str("\nYour shopping list is empty\n");
            return out;
        }
        render_section(&mut out, "To buy", &self.to_buy);
        render_section(&mut out, "Already bought", &self.already_bought);
        out.push_str(&format!(
            "\nTotal: {total} items - Bought: {bought}/{total}\n",
            total = self.total_items,
            bought = self.bought_items,
        ));
        out
    }
}

fn render_section(out: &mut String, title: &str, items: &[GroceryItem]) {
    if items.is_empty() {
        return;
    }
    out.push_str(&format!("\n{title}\n"));
    for item in items {
        out.push_str(&format!("- {}: {} {}", item.name, item.quantity, item.unit));
        if let Some(category) = &item.category {
            out.push_str(&format!(" ({category})"));
        }
        out.push('\n');
    }
}
