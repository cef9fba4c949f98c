use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::{Value, coerce_to_string, consts::WORD_BOUNDARY_PATTERN};

static WORD_BOUNDARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(WORD_BOUNDARY_PATTERN).expect("word boundary pattern is a valid regex")
});

fn upper_first_char(s: &str) -> String {
    let mut chars = s.chars();
    chars
        .next()
        .map_or_else(String::new, |first| first.to_uppercase().chain(chars).collect())
}

/// Removes every run of separators (anything but ASCII letters and digits)
/// that precedes a word, upper-casing the word's first character.
///
/// Other characters keep their case: `"AnyWord"` is unchanged and
/// `"ANY WORD"` becomes `"ANYWORD"`.
pub fn camel_case(text: &str) -> String {
    WORD_BOUNDARY
        .replace_all(text, |caps: &Captures<'_>| {
            caps.get(1)
                .map_or_else(String::new, |m| m.as_str().to_ascii_uppercase())
        })
        .into_owned()
}

/// [`camel_case`] with the first character upper-cased.
pub fn pascal_case(text: &str) -> String {
    upper_first_char(&camel_case(text))
}

/// [`pascal_case`] when `pascal` is set, [`camel_case`] otherwise.
pub fn camelize(text: &str, pascal: bool) -> String {
    if pascal {
        pascal_case(text)
    } else {
        camel_case(text)
    }
}

/// The value's string form with its first character upper-cased.
/// An absent value stays absent.
pub fn upper_first(value: &Value) -> Option<String> {
    coerce_to_string(value, None).map(|s| upper_first_char(&s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case_separators() {
        struct TestCase {
            input: &'static str,
            expected: &'static str,
        }

        let cases = [
            TestCase { input: "any-word", expected: "anyWord" },
            TestCase { input: "any_word", expected: "anyWord" },
            TestCase { input: "any word", expected: "anyWord" },
            TestCase { input: "any -_ word", expected: "anyWord" },
            TestCase { input: "any.word/here", expected: "anyWordHere" },
            TestCase { input: "-any-word", expected: "AnyWord" },
            TestCase { input: "any-word-", expected: "anyWord-" },
            TestCase { input: "any-2nd-word", expected: "any2ndWord" },
            TestCase { input: "", expected: "" },
            TestCase { input: "---", expected: "---" },
        ];

        for case in &cases {
            assert_eq!(camel_case(case.input), case.expected, "input: {:?}", case.input);
        }
    }

    #[test]
    fn test_camel_case_preserves_case() {
        assert_eq!(camel_case("AnyWord"), "AnyWord");
        assert_eq!(camel_case("anyWord"), "anyWord");
        assert_eq!(camel_case("ANY WORD"), "ANYWORD");
        assert_eq!(camel_case("any-Word"), "anyWord");
    }

    #[test]
    fn test_camel_case_non_ascii_is_separator() {
        assert_eq!(camel_case("caféau"), "cafAu");
    }

    #[test]
    fn test_pascal_case() {
        assert_eq!(pascal_case("any-word"), "AnyWord");
        assert_eq!(pascal_case("any_word"), "AnyWord");
        assert_eq!(pascal_case("AnyWord"), "AnyWord");
        assert_eq!(pascal_case(""), "");
    }

    #[test]
    fn test_camelize() {
        assert_eq!(camelize("any-word", false), "anyWord");
        assert_eq!(camelize("any_word", false), "anyWord");
        assert_eq!(camelize("any-word", true), "AnyWord");
        assert_eq!(camelize("any_word", true), "AnyWord");
    }

    #[test]
    fn test_upper_first() {
        assert_eq!(upper_first(&Value::from("any-word")), Some("Any-word".to_owned()));
        assert_eq!(upper_first(&Value::from(12345)), Some("12345".to_owned()));
        assert_eq!(upper_first(&Value::from("ébène")), Some("Ébène".to_owned()));
        assert_eq!(upper_first(&Value::from("")), Some(String::new()));
        assert_eq!(upper_first(&Value::Null), None);
    }
}
