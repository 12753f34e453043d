//! Carrier service-level codes.

// self
use crate::_prelude::*;

/// Ground; used when a request names no service.
pub const DEFAULT_SERVICE_CODE: &str = "03";

const SERVICE_NAMES: [(&str, &str); 12] = [
	("01", "UPS Next Day Air"),
	("02", "UPS 2nd Day Air"),
	("03", "UPS Ground"),
	("07", "UPS Worldwide Express"),
	("08", "UPS Worldwide Expedited"),
	("11", "UPS Standard"),
	("12", "UPS 3 Day Select"),
	("13", "UPS Next Day Air Saver"),
	("14", "UPS Next Day Air Early AM"),
	("54", "UPS Worldwide Express Plus"),
	("59", "UPS 2nd Day Air AM"),
	("65", "UPS Saver"),
];

/// Returns the marketing name for a known service code.
pub fn known_service_name(code: &str) -> Option<&'static str> {
	SERVICE_NAMES.iter().find(|(known, _)| *known == code).map(|(_, name)| *name)
}

/// Returns the marketing name, or `Unknown Service (<code>)`.
pub fn service_name(code: &str) -> Cow<'static, str> {
	match known_service_name(code) {
		Some(name) => Cow::Borrowed(name),
		None => Cow::Owned(format!("Unknown Service ({code})")),
	}
}
