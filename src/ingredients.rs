use crate::search::query::join_ingredients;

/// Separator used when ingredients are shown to the user
const DISPLAY_SEPARATOR: &str = "、";

/// Ordered list of ingredients the user wants to search with
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngredientList {
    items: Vec<String>,
}

impl IngredientList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an ingredient. Input is trimmed; blank or duplicate entries are
    /// rejected and `false` is returned.
    pub fn add(&mut self, raw: &str) -> bool {
        let name = raw.trim();
        if name.is_empty() || self.items.iter().any(|existing| existing == name) {
            return false;
        }
        self.items.push(name.to_string());
        true
    }

    /// Remove an ingredient by name
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|existing| existing != name);
        self.items.len() != before
    }

    /// Remove and return the most recently added ingredient
    pub fn pop(&mut self) -> Option<String> {
        self.items.pop()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    /// The `", "`-joined string passed to the search service
    pub fn query_string(&self) -> String {
        join_ingredients(&self.items)
    }

    /// Heading shown above the result cards
    pub fn heading(&self) -> String {
        format!("「{}」のレシピ検索結果", self.items.join(DISPLAY_SEPARATOR))
    }
}
