//! This file defines the `Category` type and the built-in categories the app
//! records transactions against.
//! A category acts like a tag for a transaction, however a transaction may only have one category.

use serde::Serialize;

/// A transaction category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Category {
    /// The ID sent to the server, e.g. "food".
    pub id: &'static str,
    /// The display name, e.g. "餐饮".
    pub name: &'static str,
    /// The icon symbol name.
    pub icon: &'static str,
}

/// The built-in categories. The last entry is the fallback for unknown IDs.
pub static CATEGORIES: [Category; 10] = [
    Category {
        id: "food",
        name: "餐饮",
        icon: "fork.knife",
    },
    Category {
        id: "shopping",
        name: "购物",
        icon: "bag",
    },
    Category {
        id: "transport",
        name: "交通",
        icon: "car",
    },
    Category {
        id: "entertainment",
        name: "娱乐",
        icon: "gamecontroller",
    },
    Category {
        id: "housing",
        name: "住房",
        icon: "house",
    },
    Category {
        id: "medical",
        name: "医疗",
        icon: "heart",
    },
    Category {
        id: "education",
        name: "教育",
        icon: "book",
    },
    Category {
        id: "gift",
        name: "礼物",
        icon: "gift",
    },
    Category {
        id: "salary",
        name: "工资",
        icon: "dollarsign.circle",
    },
    Category {
        id: "other",
        name: "其他",
        icon: "ellipsis",
    },
];

/// Look up a category by ID, falling back to "other" for unknown IDs.
pub fn get_category(id: &str) -> &'static Category {
    CATEGORIES
        .iter()
        .find(|category| category.id == id)
        .unwrap_or(&CATEGORIES[CATEGORIES.len() - 1])
}

#[cfg(test)]
mod tests {
    use super::get_category;

    #[test]
    fn finds_known_category() {
        assert_eq!(get_category("salary").name, "工资");
    }

    #[test]
    fn unknown_category_falls_back_to_other() {
        assert_eq!(get_category("pets").id, "other");
        assert_eq!(get_category("").name, "其他");
    }
}
