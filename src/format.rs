use crate::secondary_validation::IDENTIFIER_LENGTH;

// XX.XXX.XXX-X
const SEPARATORS: &[(usize, char)] = &[(2, '.'), (5, '.'), (8, '-')];

/// Renders a 9-character identifier as `XX.XXX.XXX-X`.
///
/// This is a display transform only: no validity check is made, and any input that is not
/// exactly 9 characters long is returned unchanged.
pub fn format_fiscal_identifier(normalized: &str) -> String {
    if normalized.chars().count() != IDENTIFIER_LENGTH {
        return normalized.to_string();
    }

    let mut formatted = String::with_capacity(normalized.len() + SEPARATORS.len());
    for (idx, c) in normalized.chars().enumerate() {
        if let Some((_, separator)) = SEPARATORS.iter().find(|(at, _)| *at == idx) {
            formatted.push(*separator);
        }
        formatted.push(c);
    }
    formatted
}
