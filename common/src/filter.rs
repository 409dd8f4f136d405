//! Filter grammar of list queries.
//!
//! A filter is a comma-separated list of clauses, each being
//! `<field><operator><value>`, for example `price:>500,city:Hanoi,title~loft`.
//! Parsing is permissive: malformed clauses are dropped instead of failing the
//! whole filter.

use std::sync::{LazyLock, OnceLock};

use derive_more::Display;
use regex::Regex;
use strum::EnumString;

/// Operator of a filter [`Condition`].
///
/// [`Display`] and [`FromStr`] use the exact tokens of the grammar.
///
/// [`FromStr`]: std::str::FromStr
#[derive(Clone, Copy, Debug, Display, EnumString, Eq, Hash, PartialEq)]
pub enum Operator {
    /// Greater than or equal to the value (range start).
    #[display(":>")]
    #[strum(serialize = ":>")]
    Gte,

    /// Less than or equal to the value (range end).
    #[display(":<")]
    #[strum(serialize = ":<")]
    Lte,

    /// Equal to the value.
    #[display(":")]
    #[strum(serialize = ":")]
    Eq,

    /// Strictly greater than the value.
    #[display(">")]
    #[strum(serialize = ">")]
    Gt,

    /// Strictly less than the value.
    #[display("<")]
    #[strum(serialize = "<")]
    Lt,

    /// Contains the value (fuzzy match).
    #[display("~")]
    #[strum(serialize = "~")]
    Contains,
}

impl Operator {
    /// All the [`Operator`]s in their matching priority: two-character
    /// operators go before their one-character prefixes.
    pub const PRIORITY: [Self; 6] = [
        Self::Gte,
        Self::Lte,
        Self::Eq,
        Self::Gt,
        Self::Lt,
        Self::Contains,
    ];
}

/// Single parsed `(field, operator, value)` clause of a filter.
#[derive(Clone, Debug, Display, Eq, Hash, PartialEq)]
#[display("{field}{operator}{value}")]
pub struct Condition {
    /// Name of the filtered field.
    pub field: String,

    /// [`Operator`] to apply.
    pub operator: Operator,

    /// Value to compare the field with.
    pub value: String,
}

/// Parses the provided `filter` string into [`Condition`]s, in the order they
/// are encountered.
///
/// Empty clauses, clauses without a recognized [`Operator`], and clauses with
/// an empty field or value are silently dropped. Duplicated fields are kept
/// as is.
#[must_use]
pub fn parse(filter: &str) -> Vec<Condition> {
    filter.split(',').filter_map(parse_clause).collect()
}

/// Parses a single comma-free `clause` of a filter.
fn parse_clause(clause: &str) -> Option<Condition> {
    /// Regular expression of a single clause.
    ///
    /// Alternation order encodes [`Operator::PRIORITY`], so `:>` is never
    /// split into `:` followed by a `>`-prefixed value.
    static CLAUSE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^([^:<>~,]+)(:>|:<|:|>|<|~)(.*)$").expect("valid regex")
    });

    let clause = clause.trim();
    if clause.is_empty() {
        return None;
    }

    let caps = CLAUSE.captures(clause)?;
    let field = caps.get(1)?.as_str().trim();
    let operator = caps.get(2)?.as_str().parse().ok()?;
    let value = caps.get(3)?.as_str().trim();
    if field.is_empty() || value.is_empty() {
        return None;
    }

    Some(Condition {
        field: field.to_owned(),
        operator,
        value: value.to_owned(),
    })
}

/// Raw filter string along with its lazily parsed [`Condition`]s.
///
/// Parsing happens at most once, on the first [`Filter::conditions()`] call.
#[derive(Clone, Debug, Default)]
pub struct Filter {
    /// Raw filter string, if any was provided.
    raw: Option<String>,

    /// Memoized result of parsing the `raw` string.
    conditions: OnceLock<Vec<Condition>>,
}

impl Filter {
    /// Creates a new [`Filter`] out of the provided `raw` string.
    #[must_use]
    pub fn new(raw: Option<String>) -> Self {
        Self {
            raw,
            conditions: OnceLock::new(),
        }
    }

    /// Returns the raw filter string of this [`Filter`], if any.
    #[must_use]
    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    /// Returns the [`Condition`]s of this [`Filter`], parsing them on the
    /// first call.
    #[must_use]
    pub fn conditions(&self) -> &[Condition] {
        self.conditions.get_or_init(|| match &self.raw {
            Some(raw) => parse(raw),
            None => Vec::new(),
        })
    }

    /// Indicates whether [`Condition`]s of this [`Filter`] were already
    /// parsed.
    #[must_use]
    pub fn is_parsed(&self) -> bool {
        self.conditions.get().is_some()
    }
}

impl From<&str> for Filter {
    fn from(raw: &str) -> Self {
        Self::new(Some(raw.to_owned()))
    }
}

#[cfg(test)]
mod spec {
    use super::{parse, Condition, Filter, Operator};

    fn cond(field: &str, operator: Operator, value: &str) -> Condition {
        Condition {
            field: field.to_owned(),
            operator,
            value: value.to_owned(),
        }
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(parse("").is_empty());
        assert!(parse("   ").is_empty());
        assert!(parse(" , ,, ").is_empty());
    }

    #[test]
    fn absent_filter_yields_nothing() {
        let filter = Filter::new(None);

        assert!(filter.conditions().is_empty());
        assert!(filter.raw().is_none());
    }

    #[test]
    fn parses_range_start() {
        assert_eq!(parse("price:>500"), [cond("price", Operator::Gte, "500")]);
    }

    #[test]
    fn preserves_encounter_order() {
        assert_eq!(
            parse("city:Hanoi,title~loft"),
            [
                cond("city", Operator::Eq, "Hanoi"),
                cond("title", Operator::Contains, "loft"),
            ],
        );
    }

    #[test]
    fn drops_malformed_clauses() {
        assert_eq!(
            parse("badtoken,,price:100"),
            [cond("price", Operator::Eq, "100")],
        );
        assert_eq!(parse("city:,:Hanoi, : x"), []);
    }

    #[test]
    fn prefers_two_char_operators() {
        assert_eq!(parse("age:>18"), [cond("age", Operator::Gte, "18")]);
        assert_eq!(parse("age:<65"), [cond("age", Operator::Lte, "65")]);
        assert_eq!(parse("age>18"), [cond("age", Operator::Gt, "18")]);
        assert_eq!(parse("age<65"), [cond("age", Operator::Lt, "65")]);
    }

    #[test]
    fn trims_field_and_value() {
        assert_eq!(
            parse("  district :  Ba Dinh  "),
            [cond("district", Operator::Eq, "Ba Dinh")],
        );
    }

    #[test]
    fn value_keeps_operator_characters() {
        assert_eq!(
            parse("title~a:b>c"),
            [cond("title", Operator::Contains, "a:b>c")],
        );
    }

    #[test]
    fn keeps_duplicated_fields() {
        assert_eq!(
            parse("price:>100,price:<300"),
            [
                cond("price", Operator::Gte, "100"),
                cond("price", Operator::Lte, "300"),
            ],
        );
    }

    #[test]
    fn parses_lazily_and_once() {
        let filter = Filter::from("price:>100");
        assert!(!filter.is_parsed());

        let first = filter.conditions().as_ptr();
        assert!(filter.is_parsed());
        assert_eq!(filter.conditions().as_ptr(), first);
        assert_eq!(filter.conditions(), [cond("price", Operator::Gte, "100")]);
    }

    #[test]
    fn operator_tokens_round_trip() {
        for op in Operator::PRIORITY {
            assert_eq!(op.to_string().parse::<Operator>().unwrap(), op);
        }
        assert_eq!(cond("price", Operator::Lte, "9").to_string(), "price:<9");
    }
}
