use serde::Serialize;

use super::normalize::normalize;
use super::table::TaxTable;

/// Which rule produced a match. Rules are tried in declaration order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// Normalized boundary name equals the key.
    Exact,
    /// The key occurs inside the boundary name ("republic of the congo" / "congo").
    KeyInName,
    /// The boundary name occurs inside the key ("bahamas" / "the bahamas").
    NameInKey,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Resolution<'a> {
    pub key: &'a str,
    pub kind: MatchKind,
}

/// Picks at most one key for a raw boundary name. See [`resolve_match`].
pub fn resolve<'a, I>(boundary_name: &str, keys: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
    I::IntoIter: Clone,
{
    resolve_match(&normalize(boundary_name), keys).map(|r| r.key)
}

/// Matches an already-normalized name against `keys`.
///
/// Exact equality wins over containment. Within one containment rule the
/// first key in iteration order wins, so callers must iterate keys in a
/// stable order. Empty names and empty keys never match.
pub fn resolve_match<'a, I>(name: &str, keys: I) -> Option<Resolution<'a>>
where
    I: IntoIterator<Item = &'a str>,
    I::IntoIter: Clone,
{
    if name.is_empty() {
        return None;
    }
    let keys = keys.into_iter().filter(|k| !k.is_empty());

    let hit = |kind: MatchKind| move |key: &'a str| Resolution { key, kind };
    keys.clone()
        .find(|k| *k == name)
        .map(hit(MatchKind::Exact))
        .or_else(|| {
            keys.clone()
                .find(|k| name.contains(k))
                .map(hit(MatchKind::KeyInName))
        })
        .or_else(|| {
            keys.clone()
                .find(|k| k.contains(name))
                .map(hit(MatchKind::NameInKey))
        })
}

/// [`resolve_match`] against a table, using its index for the exact rule.
pub fn resolve_in<'a>(name: &str, table: &'a TaxTable) -> Option<&'a str> {
    resolve_match_in(name, table).map(|r| r.key)
}

pub fn resolve_match_in<'a>(name: &str, table: &'a TaxTable) -> Option<Resolution<'a>> {
    if name.is_empty() {
        return None;
    }
    if let Some((key, _)) = table.get_key_value(name) {
        return Some(Resolution {
            key,
            kind: MatchKind::Exact,
        });
    }
    resolve_match(name, table.keys())
}

#[cfg(test)]
mod tests {
    use super::{MatchKind, Resolution, resolve, resolve_match};

    #[test]
    fn exact_match_beats_containment() {
        let keys = ["united states of america", "usa"];
        assert_eq!(resolve("USA", keys), Some("usa"));
        let keys = ["usa", "united states of america"];
        assert_eq!(resolve("USA", keys), Some("usa"));
    }

    #[test]
    fn key_inside_name_falls_back() {
        let r = resolve_match("republic of the congo", ["chad", "congo"]);
        assert_eq!(
            r,
            Some(Resolution {
                key: "congo",
                kind: MatchKind::KeyInName
            })
        );
    }

    #[test]
    fn name_inside_key_is_last_resort() {
        let r = resolve_match("bahamas", ["the bahamas"]).unwrap();
        assert_eq!(r.kind, MatchKind::NameInKey);
        assert_eq!(r.key, "the bahamas");
    }

    #[test]
    fn key_in_name_is_preferred_over_name_in_key() {
        let r = resolve_match("korea", ["south korea", "korea"]).unwrap();
        assert_eq!(r.kind, MatchKind::Exact);
        let r = resolve_match("north korea", ["south korea", "korea"]).unwrap();
        assert_eq!(r.key, "korea");
        assert_eq!(r.kind, MatchKind::KeyInName);
    }

    #[test]
    fn ties_go_to_first_key_in_order() {
        assert_eq!(resolve("Korea", ["north korea", "south korea"]), Some("north korea"));
        assert_eq!(resolve("Korea", ["south korea", "north korea"]), Some("south korea"));
    }

    #[test]
    fn empty_names_and_keys_never_match() {
        assert_eq!(resolve("", ["chad"]), None);
        assert_eq!(resolve("(unknown)", ["chad"]), None);
        assert_eq!(resolve("Chad", ["", "peru"]), None);
    }

    #[test]
    fn unrelated_name_is_unresolved() {
        assert_eq!(resolve("Antarctica", ["chad", "peru"]), None);
    }
}
