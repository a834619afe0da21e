//! Deterministic placeholder results used when the provider is unavailable.

use crate::search::SearchResult;
use regex::Regex;
use std::sync::OnceLock;

/// Conjunction used to list ingredients in a snippet ("and")
const CONJUNCTION: &str = "と";

struct MockRecipe {
    category: &'static str,
    title_suffix: &'static str,
    snippet_suffix: &'static str,
}

const MOCK_RECIPES: [MockRecipe; 6] = [
    MockRecipe {
        category: "pasta",
        title_suffix: "を使った簡単パスタ",
        snippet_suffix: "を使った美味しいパスタのレシピです。20分で簡単に作れます。",
    },
    MockRecipe {
        category: "salad",
        title_suffix: "のヘルシーサラダ",
        snippet_suffix: "を組み合わせた栄養満点のサラダです。ダイエット中の方にもおすすめ。",
    },
    MockRecipe {
        category: "stew",
        title_suffix: "の煮込み料理",
        snippet_suffix: "を使った体が温まる煮込み料理です。冬にぴったりの一品。",
    },
    MockRecipe {
        category: "soup",
        title_suffix: "のスープ",
        snippet_suffix: "で作る簡単スープのレシピです。風邪予防にもおすすめです。",
    },
    MockRecipe {
        category: "dessert",
        title_suffix: "を使ったデザート",
        snippet_suffix: "を使った甘くて美味しいデザートのレシピです。お子様にも人気です。",
    },
    MockRecipe {
        category: "stir-fry",
        title_suffix: "の炒め物",
        snippet_suffix: "を使った簡単炒め物のレシピです。10分で完成する時短料理です。",
    },
];

fn token_separator() -> &'static Regex {
    static SEPARATOR: OnceLock<Regex> = OnceLock::new();
    SEPARATOR.get_or_init(|| Regex::new(r",\s*").expect("separator pattern is valid"))
}

/// Split a joined ingredient string on comma plus optional whitespace
pub fn split_ingredients(ingredients: &str) -> Vec<&str> {
    token_separator().split(ingredients).collect()
}

/// Generate the six mock recipes for an ingredient string.
///
/// Same input, same output: no randomness, no clock.
pub fn mock_recipes(ingredients: &str) -> Vec<SearchResult> {
    let tokens = split_ingredients(ingredients);
    let first = tokens.first().copied().unwrap_or_default();
    let listed = tokens.join(CONJUNCTION);

    MOCK_RECIPES
        .iter()
        .enumerate()
        .map(|(idx, recipe)| SearchResult {
            title: format!("{}{}", first, recipe.title_suffix),
            link: format!("https://example.com/recipe{}", idx + 1),
            snippet: format!("{}{}", listed, recipe.snippet_suffix),
            image: Some(format!(
                "https://source.unsplash.com/random/300x200/?{}",
                recipe.category
            )),
        })
        .collect()
}
