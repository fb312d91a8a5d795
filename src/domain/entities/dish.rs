//! Dish entity.
//!
//! Maps to the `dishes` table. Dishes are owned by exactly one menu and have
//! no repository of their own; they are written and deleted through
//! [`MenuRepository`](super::MenuRepository).

use serde::{Deserialize, Serialize};

/// A named, priced item on a menu.
///
/// Maps to the `dishes` table:
/// - id: BIGINT PRIMARY KEY DEFAULT nextval('global_seq')
/// - menu_id: BIGINT NOT NULL REFERENCES menus(id)
/// - name: VARCHAR(100) NOT NULL
/// - price: BIGINT NOT NULL CHECK (price >= 0)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dish {
    /// Generated primary key (`None` until stored)
    pub id: Option<i64>,

    /// Owning menu (`None` until stored)
    pub menu_id: Option<i64>,

    /// Dish name
    pub name: String,

    /// Price in minor currency units
    pub price: i64,
}

impl Dish {
    /// A dish that has not been stored yet.
    pub fn new(name: impl Into<String>, price: i64) -> Self {
        Self {
            id: None,
            menu_id: None,
            name: name.into(),
            price,
        }
    }
}
