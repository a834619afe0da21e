//! Provider query construction.

use crate::config::Credentials;

/// Locale keyword appended to every query ("recipe")
pub const RECIPE_KEYWORD: &str = "レシピ";

/// Delimiter used to join ingredient tokens into one search string
pub const INGREDIENT_DELIMITER: &str = ", ";

/// Join ingredient tokens into the string handed to the search service
pub fn join_ingredients<S: AsRef<str>>(ingredients: &[S]) -> String {
    ingredients
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(INGREDIENT_DELIMITER)
}

/// Build the percent-encoded `q` parameter for a joined ingredient string.
///
/// Input is not validated: callers must not search with zero ingredients.
pub fn build_query(ingredients: &str) -> String {
    let query = format!("{} {}", ingredients, RECIPE_KEYWORD);
    urlencoding::encode(&query).into_owned()
}

/// Full request URL for the Custom Search endpoint
pub fn search_url(endpoint: &str, credentials: &Credentials, ingredients: &str) -> String {
    format!(
        "{}?key={}&cx={}&q={}",
        endpoint,
        urlencoding::encode(&credentials.api_key),
        urlencoding::encode(&credentials.search_engine_id),
        build_query(ingredients)
    )
}
