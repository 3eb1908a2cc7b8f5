use uuid::Uuid;

/// Allocate an identifier unique for the lifetime of the session.
///
/// The suffix is a v4 UUID in simple (dash-free) form, so two calls within
/// the same instant can never collide and the `"<tableId>-<columnId>"`
/// endpoint keys keep a single separator between the two ids.
pub fn new_id(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4().as_simple())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ids_are_unique_under_rapid_calls() {
        let ids: HashSet<String> = (0..10_000).map(|_| new_id("column")).collect();
        assert_eq!(ids.len(), 10_000);
    }

    #[test]
    fn id_contains_exactly_one_dash() {
        let id = new_id("table");
        assert_eq!(id.matches('-').count(), 1);
        assert!(id.starts_with("table-"));
    }
}
