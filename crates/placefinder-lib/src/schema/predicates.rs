//! Reusable value predicates for endpoint schemas.

use super::ValuePredicate;

/// Parse a query value as a finite number.
///
/// Surrounding whitespace is ignored; empty text, `NaN` and infinities are
/// rejected.
pub fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

fn single(values: &[String]) -> Option<&str> {
    match values {
        [value] => Some(value.as_str()),
        _ => None,
    }
}

/// Accepts any value list, including an empty one.
#[derive(Debug, Clone, Copy, Default)]
pub struct Anything;

impl ValuePredicate for Anything {
    fn test(&self, _values: &[String]) -> bool {
        true
    }
}

/// Exactly one value, with no constraint on its content.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactlyOne;

impl ValuePredicate for ExactlyOne {
    fn test(&self, values: &[String]) -> bool {
        single(values).is_some()
    }
}

/// Exactly one non-empty value.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleNonEmpty;

impl ValuePredicate for SingleNonEmpty {
    fn test(&self, values: &[String]) -> bool {
        single(values).is_some_and(|value| !value.is_empty())
    }
}

/// Exactly one value drawn from a fixed allow-list (case-sensitive).
#[derive(Debug, Clone, Copy)]
pub struct OneOf {
    allowed: &'static [&'static str],
}

impl OneOf {
    pub const fn new(allowed: &'static [&'static str]) -> Self {
        Self { allowed }
    }
}

impl ValuePredicate for OneOf {
    fn test(&self, values: &[String]) -> bool {
        single(values).is_some_and(|value| self.allowed.contains(&value))
    }
}

/// Any number of values, every one drawn from a fixed allow-list.
#[derive(Debug, Clone, Copy)]
pub struct AllOf {
    allowed: &'static [&'static str],
}

impl AllOf {
    pub const fn new(allowed: &'static [&'static str]) -> Self {
        Self { allowed }
    }
}

impl ValuePredicate for AllOf {
    fn test(&self, values: &[String]) -> bool {
        values
            .iter()
            .all(|value| self.allowed.contains(&value.as_str()))
    }
}

/// Exactly one numeric value inside the closed range `[min, max]`.
#[derive(Debug, Clone, Copy)]
pub struct NumberInRange {
    min: f64,
    max: f64,
}

impl NumberInRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

impl ValuePredicate for NumberInRange {
    fn test(&self, values: &[String]) -> bool {
        single(values)
            .and_then(parse_number)
            .is_some_and(|n| self.min <= n && n <= self.max)
    }
}

/// Exactly one `latitude,longitude` pair.
///
/// Latitude must be within ±90 and longitude within ±180, both finite.
#[derive(Debug, Clone, Copy, Default)]
pub struct Coordinate;

impl Coordinate {
    pub const MAX_LATITUDE: f64 = 90.0;
    pub const MAX_LONGITUDE: f64 = 180.0;
}

impl ValuePredicate for Coordinate {
    fn test(&self, values: &[String]) -> bool {
        let Some(value) = single(values) else {
            return false;
        };
        let parts: Vec<&str> = value.split(',').collect();
        let [lat, lng] = parts.as_slice() else {
            return false;
        };

        let within = |text: &str, limit: f64| parse_number(text).is_some_and(|n| n.abs() <= limit);
        within(*lat, Self::MAX_LATITUDE) && within(*lng, Self::MAX_LONGITUDE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("42"), Some(42.0));
        assert_eq!(parse_number(" -1.5 "), Some(-1.5));
        assert_eq!(parse_number("1e3"), Some(1000.0));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("   "), None);
        assert_eq!(parse_number("test"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("-Infinity"), None);
    }

    #[test]
    fn test_coordinate_accepts_valid_pair() {
        assert!(Coordinate.test(&values(&["-33.8670522,151.1957362"])));
        assert!(Coordinate.test(&values(&["90,-180"])));
    }

    #[test]
    fn test_coordinate_rejects_out_of_range() {
        assert!(!Coordinate.test(&values(&["-160.8670522,151.1957362"])));
        assert!(!Coordinate.test(&values(&["-33.8670522,190.1957362"])));
        assert!(!Coordinate.test(&values(&["90.0001,0"])));
    }

    #[test]
    fn test_coordinate_rejects_wrong_shape() {
        assert!(!Coordinate.test(&values(&[
            "-33.8670522,151.1957362",
            "-33.8670522,151.1957362"
        ])));
        assert!(!Coordinate.test(&values(&["-33.8670522,151.1957362,1234"])));
        assert!(!Coordinate.test(&values(&["-33.8670522"])));
        assert!(!Coordinate.test(&values(&["thisShouldFail,thisShouldFail"])));
        assert!(!Coordinate.test(&values(&[",151.1"])));
        assert!(!Coordinate.test(&[]));
    }

    #[test]
    fn test_one_of() {
        let predicate = OneOf::new(&["restaurant"]);
        assert!(predicate.test(&values(&["restaurant"])));
        assert!(!predicate.test(&values(&["restarant"])));
        assert!(!predicate.test(&values(&["Restaurant"])));
        assert!(!predicate.test(&values(&[""])));
        assert!(!predicate.test(&values(&["123"])));
        assert!(!predicate.test(&values(&["restaurant", "restaurant"])));
        assert!(!predicate.test(&[]));
    }

    #[test]
    fn test_number_in_range_boundaries() {
        let predicate = NumberInRange::new(0.0, 50000.0);
        for ok in ["45000", "233", "0", "50000"] {
            assert!(predicate.test(&values(&[ok])), "{ok} should pass");
        }
        for bad in ["test", "-1", "50001", "55000", ""] {
            assert!(!predicate.test(&values(&[bad])), "{bad} should fail");
        }
        assert!(!predicate.test(&values(&["1", "2"])));
    }

    #[test]
    fn test_single_non_empty() {
        assert!(SingleNonEmpty.test(&values(&["pizza"])));
        assert!(!SingleNonEmpty.test(&values(&[""])));
        assert!(!SingleNonEmpty.test(&values(&["a", "b"])));
        assert!(!SingleNonEmpty.test(&[]));
    }

    #[test]
    fn test_exactly_one_and_anything() {
        assert!(ExactlyOne.test(&values(&["ChIJ"])));
        assert!(!ExactlyOne.test(&values(&["a", "b"])));
        assert!(Anything.test(&[]));
        assert!(Anything.test(&values(&["name", "rating"])));
    }

    #[test]
    fn test_all_of() {
        let predicate = AllOf::new(&["finance", "tech", "values"]);
        assert!(predicate.test(&values(&["finance", "tech", "values"])));
        assert!(predicate.test(&values(&["values", "finance"])));
        assert!(!predicate.test(&values(&["finance", "invalid", "values"])));
        assert!(predicate.test(&[]));
    }
}
