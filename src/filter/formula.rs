//! Textual building blocks of the Airtable formula grammar.

/// Reference to a field: `{Name}`
pub fn field(name: &str) -> String {
    format!("{{{}}}", name)
}

/// Single-quoted string literal with backslash escapes
pub fn string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        if c == '\'' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('\'');
    out
}

/// `{Field}='value'`
pub fn equals(name: &str, value: &str) -> String {
    format!("{}={}", field(name), string_literal(value))
}

/// `FIND('value', {Field})`, truthy when the field contains the value
pub fn contains(name: &str, value: &str) -> String {
    format!("FIND({}, {})", string_literal(value), field(name))
}

/// `{Field}>=n`
pub fn at_least(name: &str, bound: u64) -> String {
    format!("{}>={}", field(name), bound)
}

/// `{Field}<=n`
pub fn at_most(name: &str, bound: u64) -> String {
    format!("{}<={}", field(name), bound)
}

pub fn and(terms: &[String]) -> String {
    combinator("AND", terms)
}

pub fn or(terms: &[String]) -> String {
    combinator("OR", terms)
}

/// Always-true formula
pub fn match_all() -> String {
    "TRUE()".to_string()
}

fn combinator(name: &str, terms: &[String]) -> String {
    format!("{}({})", name, terms.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literals_escape_quotes_and_backslashes() {
        assert_eq!(string_literal("Laval"), "'Laval'");
        assert_eq!(string_literal("L'Île-Perrot"), r"'L\'Île-Perrot'");
        assert_eq!(string_literal(r"a\b"), r"'a\\b'");
    }

    #[test]
    fn predicates() {
        assert_eq!(equals("City", "Laval"), "{City}='Laval'");
        assert_eq!(contains("Ville", "Laval"), "FIND('Laval', {Ville})");
        assert_eq!(at_least("Bedrooms", 3), "{Bedrooms}>=3");
        assert_eq!(at_most("Price", 500000), "{Price}<=500000");
    }

    #[test]
    fn combinators_keep_argument_order() {
        let terms = vec!["a".to_string(), "b".to_string()];
        assert_eq!(and(&terms), "AND(a, b)");
        assert_eq!(or(&terms), "OR(a, b)");
        assert_eq!(and(&[]), "AND()");
    }
}
