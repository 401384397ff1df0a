#![forbid(unsafe_code)]

use poem_openapi::Object;

// ***************************************************************************
//                                Game Records
// ***************************************************************************
// ---------------------------------------------------------------------------
// GameRecord:
// ---------------------------------------------------------------------------
/** A single game in the catalog.  Records are defined once at startup and
 * never change, so identifiers stay stable for the life of the process.
 * Field names are serialized in camelCase to match the published wire format.
 */
#[derive(Object, Debug, Clone, PartialEq)]
#[oai(rename_all = "camelCase")]
pub struct GameRecord {
    pub id: i32,
    pub name: String,
    pub developer: String,
    pub platform: String,
    pub release_year: i32,
    pub rating: f64,
}

impl GameRecord {
    fn new(id: i32, name: &str, developer: &str, platform: &str,
           release_year: i32, rating: f64) -> Self {
        Self {
            id,
            name: name.to_string(),
            developer: developer.to_string(),
            platform: platform.to_string(),
            release_year,
            rating,
        }
    }
}

// ***************************************************************************
//                                  Catalog
// ***************************************************************************
// ---------------------------------------------------------------------------
// Catalog:
// ---------------------------------------------------------------------------
/** The fixed, read-only game collection.  Built once, shared by reference
 * from the static context, and safe for concurrent reads without locking.
 */
#[derive(Debug)]
pub struct Catalog {
    games: Vec<GameRecord>,
}

impl Catalog {
    // -----------------------------------------------------------------------
    // standard:
    // -----------------------------------------------------------------------
    /** Construct the catalog with its fixed contents.  Order here is the
     * order every response preserves.
     */
    pub fn standard() -> Self {
        Self {
            games: vec![
                GameRecord::new(1, "The Legend of Zelda: Breath of the Wild",
                                "Nintendo", "Nintendo Switch", 2017, 9.3),
                GameRecord::new(2, "Elden Ring",
                                "FromSoftware", "Multi-platform", 2022, 9.1),
                GameRecord::new(3, "The Witcher 3: Wild Hunt",
                                "CD Projekt Red", "Multi-platform", 2015, 9.2),
                GameRecord::new(4, "Cyberpunk 2077",
                                "CD Projekt Red", "Multi-platform", 2020, 7.7),
                GameRecord::new(5, "Hades",
                                "Supergiant Games", "Multi-platform", 2020, 9.0),
                GameRecord::new(6, "Hollow Knight",
                                "Team Cherry", "Multi-platform", 2017, 8.7),
            ],
        }
    }

    // -----------------------------------------------------------------------
    // search:
    // -----------------------------------------------------------------------
    /** Return the games whose name contains the query as a case-insensitive
     * substring, preserving catalog order.  An absent query, or one that
     * trims to the empty string, returns the whole catalog.  A non-empty
     * query is matched as given: surrounding whitespace is part of the
     * needle.  This operation cannot fail: any query string is acceptable
     * and zero matches is an ordinary, empty result.
     */
    pub fn search(&self, query: Option<&str>) -> Vec<GameRecord> {
        let raw = query.unwrap_or("");
        if raw.trim().is_empty() {
            return self.games.clone();
        }

        let needle = raw.to_lowercase();
        self.games
            .iter()
            .filter(|g| g.name.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    // -----------------------------------------------------------------------
    // len:
    // -----------------------------------------------------------------------
    /** Number of records in the full catalog. */
    pub fn len(&self) -> usize {
        self.games.len()
    }

}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use super::Catalog;

    #[test]
    fn ids_are_unique() {
        let catalog = Catalog::standard();
        let mut ids: Vec<i32> = catalog.games.iter().map(|g| g.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), catalog.len());
    }

    #[test]
    fn absent_query_returns_all() {
        let catalog = Catalog::standard();
        let all = catalog.search(None);
        assert_eq!(all.len(), 6);
        assert_eq!(all, catalog.games);
    }

    #[test]
    fn empty_and_whitespace_queries_return_all() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.search(Some("")).len(), 6);
        assert_eq!(catalog.search(Some("   ")).len(), 6);
    }

    #[test]
    fn search_is_case_insensitive() {
        let catalog = Catalog::standard();
        let upper = catalog.search(Some("ZELDA"));
        let lower = catalog.search(Some("zelda"));
        assert_eq!(upper, lower);
        assert_eq!(upper.len(), 1);
        assert_eq!(upper[0].name, "The Legend of Zelda: Breath of the Wild");
    }

    #[test]
    fn search_matches_substring_not_whole_words() {
        let catalog = Catalog::standard();
        let hits = catalog.search(Some("witch"));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 3);
    }

    #[test]
    fn search_preserves_catalog_order() {
        let catalog = Catalog::standard();
        // "o" matches several names; order must follow definition order.
        let hits = catalog.search(Some("o"));
        let ids: Vec<i32> = hits.iter().map(|g| g.id).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn padded_query_is_matched_literally() {
        let catalog = Catalog::standard();
        // Whitespace is significant once the query is non-empty: no name
        // contains "  hades  ", so nothing matches.
        assert!(catalog.search(Some("  hades  ")).is_empty());
        assert_eq!(catalog.search(Some("hades")).len(), 1);
    }

    #[test]
    fn unmatched_query_returns_empty_not_error() {
        let catalog = Catalog::standard();
        let hits = catalog.search(Some("xyzzynonexistent"));
        assert!(hits.is_empty());
    }
}
