//! String inflection for table names.
//!
//! Singularization uses the `inflector` crate with additional handling for
//! irregular plurals that show up in database schemas. Only the last
//! `_`-separated word of a name is inflected, so `sales_people` becomes
//! `sales_person`.

use inflector::Inflector;

/// Known irregular plurals that inflector doesn't handle well for database contexts.
static IRREGULAR_PLURALS: &[(&str, &str)] = &[
    // People
    ("person", "people"),
    ("child", "children"),
    ("man", "men"),
    ("woman", "women"),
    // Body parts
    ("foot", "feet"),
    ("tooth", "teeth"),
    // Animals
    ("goose", "geese"),
    ("mouse", "mice"),
    ("ox", "oxen"),
    // -f/-fe → -ves
    ("leaf", "leaves"),
    ("life", "lives"),
    ("knife", "knives"),
    ("wife", "wives"),
    ("half", "halves"),
    ("self", "selves"),
    ("calf", "calves"),
    ("loaf", "loaves"),
    // -o → -oes
    ("potato", "potatoes"),
    ("tomato", "tomatoes"),
    ("hero", "heroes"),
    // Latin/Greek
    ("analysis", "analyses"),
    ("crisis", "crises"),
    ("diagnosis", "diagnoses"),
    ("hypothesis", "hypotheses"),
    ("thesis", "theses"),
    ("phenomenon", "phenomena"),
    ("criterion", "criteria"),
    ("index", "indices"),
    ("appendix", "appendices"),
    ("matrix", "matrices"),
    ("vertex", "vertices"),
];

/// Singularize a name, handling irregulars first then falling back to inflector.
///
/// # Examples
/// ```ignore
/// assert_eq!(singularize("customers"), "customer");
/// assert_eq!(singularize("categories"), "category");
/// assert_eq!(singularize("people"), "person");
/// assert_eq!(singularize("order_items"), "order_item");
/// ```
pub fn singularize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }

    let (head, last) = match word.rfind('_') {
        Some(idx) => word.split_at(idx + 1),
        None => ("", word),
    };
    if last.is_empty() {
        return word.to_string();
    }

    let lower = last.to_lowercase();
    for (singular, plural) in IRREGULAR_PLURALS {
        if lower == *plural || lower == *singular {
            return format!("{}{}", head, match_leading_case(last, singular));
        }
    }

    word.to_singular()
}

/// Camel-case a name (`user_accounts` → `userAccounts`).
pub fn camel_case(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }
    word.to_camel_case()
}

/// Uppercase the first character, leaving the rest untouched.
pub fn upper_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn match_leading_case(original: &str, replacement: &str) -> String {
    if original.starts_with(|c: char| c.is_uppercase()) {
        upper_first(replacement)
    } else {
        replacement.to_string()
    }
}
