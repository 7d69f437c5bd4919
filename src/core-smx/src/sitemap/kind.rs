//! The closed set of sitemap sections a request can name.

use std::str::FromStr;

/// Every section the service can serve. Dispatch happens over this enum,
/// never over raw query strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Static,
    States,
    Cities,
    /// Legacy alias of [`SectionKind::Cities`] kept for an old consumer:
    /// same URLs, but only cities that actually have published clinics.
    Locations,
    Services,
    ServiceLocations,
    Profiles,
    Dentists,
    Posts,
    Insurance,
}

/// A `type` query value that names no known section. Surfaces as a 400 at
/// the API; only an *absent* `type` falls back to the index document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sitemap section type: {0:?}")]
pub struct UnknownSectionKind(pub String);

impl FromStr for SectionKind {
    type Err = UnknownSectionKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "static" => Ok(SectionKind::Static),
            "states" => Ok(SectionKind::States),
            "cities" => Ok(SectionKind::Cities),
            "locations" => Ok(SectionKind::Locations),
            "services" => Ok(SectionKind::Services),
            "service-locations" => Ok(SectionKind::ServiceLocations),
            "profiles" | "clinics" => Ok(SectionKind::Profiles),
            "dentists" => Ok(SectionKind::Dentists),
            "posts" => Ok(SectionKind::Posts),
            "insurance" => Ok(SectionKind::Insurance),
            other => Err(UnknownSectionKind(other.to_string())),
        }
    }
}

impl SectionKind {
    /// Canonical value for the `type` query parameter, as emitted in the
    /// sitemap-index document.
    pub fn query_value(&self) -> &'static str {
        match self {
            SectionKind::Static => "static",
            SectionKind::States => "states",
            SectionKind::Cities => "cities",
            SectionKind::Locations => "locations",
            SectionKind::Services => "services",
            SectionKind::ServiceLocations => "service-locations",
            SectionKind::Profiles => "profiles",
            SectionKind::Dentists => "dentists",
            SectionKind::Posts => "posts",
            SectionKind::Insurance => "insurance",
        }
    }

    /// True for the sections large enough to be served in chunks.
    pub fn is_chunkable(&self) -> bool {
        matches!(
            self,
            SectionKind::Cities | SectionKind::ServiceLocations | SectionKind::Profiles
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_kinds() {
        assert_eq!("states".parse::<SectionKind>().unwrap(), SectionKind::States);
        assert_eq!(
            "service-locations".parse::<SectionKind>().unwrap(),
            SectionKind::ServiceLocations
        );
        assert_eq!("locations".parse::<SectionKind>().unwrap(), SectionKind::Locations);
    }

    #[test]
    fn test_profiles_and_clinics_are_the_same_section() {
        assert_eq!("profiles".parse::<SectionKind>().unwrap(), SectionKind::Profiles);
        assert_eq!("clinics".parse::<SectionKind>().unwrap(), SectionKind::Profiles);
    }

    #[test]
    fn test_unknown_kind_is_an_explicit_error() {
        let err = "everything".parse::<SectionKind>().unwrap_err();
        assert_eq!(err, UnknownSectionKind("everything".to_string()));
    }

    #[test]
    fn test_query_values_round_trip() {
        for kind in [
            SectionKind::Static,
            SectionKind::States,
            SectionKind::Cities,
            SectionKind::Locations,
            SectionKind::Services,
            SectionKind::ServiceLocations,
            SectionKind::Profiles,
            SectionKind::Dentists,
            SectionKind::Posts,
            SectionKind::Insurance,
        ] {
            assert_eq!(kind.query_value().parse::<SectionKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_only_the_big_sections_chunk() {
        assert!(SectionKind::Cities.is_chunkable());
        assert!(SectionKind::ServiceLocations.is_chunkable());
        assert!(SectionKind::Profiles.is_chunkable());
        assert!(!SectionKind::States.is_chunkable());
        assert!(!SectionKind::Locations.is_chunkable());
        assert!(!SectionKind::Insurance.is_chunkable());
    }
}
