/// Midpoint of a free-text price range such as `"300-350€"`.
///
/// Everything except ASCII digits and `-` is discarded before splitting. A
/// single number stands for both ends of the range; input with no digits at
/// all resolves to `0.0`.
pub fn price_midpoint(raw: &str) -> f64 {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '-')
        .collect();

    let mut bounds = cleaned
        .split('-')
        .filter(|part| !part.is_empty())
        .filter_map(|part| part.parse::<f64>().ok());

    match (bounds.next(), bounds.next()) {
        (Some(min), Some(max)) => (min + max) / 2.0,
        (Some(single), None) => single,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn averages_a_two_sided_range() {
        assert_eq!(price_midpoint("300-350€"), 325.0);
        assert_eq!(price_midpoint(" 99 - 120 EUR"), 109.5);
    }

    #[test]
    fn single_number_is_used_directly() {
        assert_eq!(price_midpoint("189€"), 189.0);
        assert_eq!(price_midpoint("-210"), 210.0);
    }

    #[test]
    fn unparseable_input_is_zero() {
        assert_eq!(price_midpoint(""), 0.0);
        assert_eq!(price_midpoint("consultar"), 0.0);
        assert_eq!(price_midpoint("--"), 0.0);
    }

    #[test]
    fn oversized_numbers_keep_their_magnitude() {
        assert_eq!(price_midpoint("99999999999-5"), 50_000_000_002.0);
        assert!(price_midpoint("99999999999") > 165.0);
    }
}
