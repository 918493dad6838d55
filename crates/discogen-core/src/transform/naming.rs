use heck::{ToLowerCamelCase, ToPascalCase};

/// Substitute for an identifier that would collide with the `default` keyword.
pub const DEFAULT_KEYWORD_ALTERNATE: &str = "defaultValue";

/// Convert an arbitrary JSON name into a camel-cased source identifier.
///
/// Characters outside `[A-Za-z0-9]` separate words and are dropped. Each word
/// keeps its interior casing; only its first letter changes, so camel-case
/// boundaries survive and a second pass is a no-op. When the name has several
/// words, all-caps words (`NOT_FOR_SALE`) are recased to `NotForSale`. A leading
/// digit is prefixed with `x` (or `X` when capitalizing) unless
/// `allow_leading_digits` is set.
pub fn identifier_name(raw: &str, capitalize_first: bool, allow_leading_digits: bool) -> String {
    let words: Vec<&str> = raw
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();
    let separated = words.len() > 1;

    let mut name = String::with_capacity(raw.len());
    for (index, word) in words.iter().enumerate() {
        let upper = index > 0 || capitalize_first;
        if separated && is_all_caps(word) {
            name.push_str(&if upper {
                word.to_pascal_case()
            } else {
                word.to_lower_camel_case()
            });
        } else {
            push_recased_first(&mut name, word, upper);
        }
    }

    if name.is_empty() {
        return if capitalize_first { "Unnamed" } else { "unnamed" }.to_string();
    }

    if !allow_leading_digits && name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, if capitalize_first { 'X' } else { 'x' });
    }

    if name == "default" {
        return DEFAULT_KEYWORD_ALTERNATE.to_string();
    }

    name
}

fn is_all_caps(word: &str) -> bool {
    word.chars().any(|c| c.is_ascii_uppercase()) && !word.chars().any(|c| c.is_ascii_lowercase())
}

fn push_recased_first(out: &mut String, word: &str, upper: bool) {
    let mut chars = word.chars();
    if let Some(first) = chars.next() {
        out.push(if upper {
            first.to_ascii_uppercase()
        } else {
            first.to_ascii_lowercase()
        });
        out.push_str(chars.as_str());
    }
}

/// Join raw name fragments into one identifier.
///
/// The first fragment follows `capitalize_first`; every later fragment is
/// capitalized and may start with a digit. Empty fragments are skipped.
pub fn identifier_from_components<S: AsRef<str>>(components: &[S], capitalize_first: bool) -> String {
    let mut result = String::new();
    for component in components.iter().map(AsRef::as_ref).filter(|c| !c.is_empty()) {
        if result.is_empty() {
            result.push_str(&identifier_name(component, capitalize_first, false));
        } else {
            result.push_str(&identifier_name(component, true, true));
        }
    }
    result
}

/// Naive singularization: drops a single trailing `s`.
///
/// Irregular plurals are not handled (`Addresses` -> `Addresse`).
pub fn singularize(name: &str) -> String {
    name.strip_suffix('s').unwrap_or(name).to_string()
}
