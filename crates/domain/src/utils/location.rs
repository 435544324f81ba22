//! Location normalization for new events.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::MIN_ADDRESS_LENGTH;
use crate::types::EventKind;

/// Room codes such as `JP20` or `A101`.
static ROOM_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^[a-z]{1,3}\d+$").expect("ROOM_CODE should compile"));

/// Whether `location` looks like a bare room code.
pub fn is_room_code(location: &str) -> bool {
    ROOM_CODE.is_match(location.trim())
}

/// Location to store on a new event.
///
/// Class events with no usable address (missing, too short to be one, or a
/// room code) get the campus address when one is configured. Everything else
/// keeps what the caller gave, trimmed, with blanks collapsed to `None`.
pub fn resolve_location(
    kind: EventKind,
    location: Option<&str>,
    campus_address: Option<&str>,
) -> Option<String> {
    let raw = location.map(str::trim).filter(|l| !l.is_empty());

    if kind == EventKind::Class {
        if let Some(campus) = campus_address.map(str::trim).filter(|c| !c.is_empty()) {
            let needs_campus = match raw {
                None => true,
                Some(l) => is_room_code(l) || l.chars().count() < MIN_ADDRESS_LENGTH,
            };
            if needs_campus {
                return Some(campus.to_string());
            }
        }
    }

    raw.map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CAMPUS: Option<&str> = Some("1 Rue de l'Université, Paris");

    #[test]
    fn room_codes_use_campus_address() {
        assert!(is_room_code("JP20"));
        assert!(is_room_code(" a101 "));
        assert!(!is_room_code("Amphi B"));
        assert_eq!(resolve_location(EventKind::Class, Some("JP20"), CAMPUS).as_deref(), CAMPUS);
    }

    #[test]
    fn short_or_missing_class_location_uses_campus() {
        assert_eq!(resolve_location(EventKind::Class, None, CAMPUS).as_deref(), CAMPUS);
        assert_eq!(resolve_location(EventKind::Class, Some("B2"), CAMPUS).as_deref(), CAMPUS);
        assert_eq!(resolve_location(EventKind::Class, Some("Hall"), CAMPUS).as_deref(), CAMPUS);
    }

    #[test]
    fn real_addresses_and_other_kinds_are_kept() {
        assert_eq!(
            resolve_location(EventKind::Class, Some("Amphithéâtre Richelieu"), CAMPUS).as_deref(),
            Some("Amphithéâtre Richelieu")
        );
        assert_eq!(
            resolve_location(EventKind::Study, Some("JP20"), CAMPUS).as_deref(),
            Some("JP20")
        );
        assert_eq!(resolve_location(EventKind::Class, Some("JP20"), None).as_deref(), Some("JP20"));
        assert_eq!(resolve_location(EventKind::Activity, Some("   "), CAMPUS), None);
    }
}
