//! Shopping list aggregation over the ingredient lines of a user's cart.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::domain::types::CartLine;

pub const SHOPPING_LIST_HEADER: &str = "Shopping list:";
pub const SHOPPING_LIST_FILENAME: &str = "shopping_list.txt";

/// Summed amount for one (name, unit) group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingListItem {
    pub name: String,
    pub measurement_unit: String,
    pub amount: i64,
}

/// Group by (name, unit), sum amounts, order by name then unit.
pub fn aggregate(lines: impl IntoIterator<Item = CartLine>) -> Vec<ShoppingListItem> {
    let mut groups: BTreeMap<(String, String), i64> = BTreeMap::new();
    for line in lines {
        *groups
            .entry((line.name, line.measurement_unit))
            .or_default() += line.amount;
    }
    groups
        .into_iter()
        .map(|((name, measurement_unit), amount)| ShoppingListItem {
            name,
            measurement_unit,
            amount,
        })
        .collect()
}

/// Header line followed by one `"<name> - <amount> <unit>"` line per item.
pub fn render(items: &[ShoppingListItem]) -> String {
    let mut out = String::with_capacity(32 * (items.len() + 1));
    out.push_str(SHOPPING_LIST_HEADER);
    out.push('\n');
    for item in items {
        let _ = writeln!(
            out,
            "{} - {} {}",
            item.name, item.amount, item.measurement_unit
        );
    }
    out
}
