/// Removes whitespace and hyphens and upper-cases what is left.
///
/// Total over any input. An empty result is a valid candidate that the length gate rejects later.
pub fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .flat_map(char::to_uppercase)
        .collect()
}
