//! Help texts for the repository storage circuit breaker fields
//!
//! The circuit breaker attributes are plain numbers in the settings record;
//! these strings explain them next to the form inputs.

/// Help for `circuitbreaker_failure_count_threshold`.
///
/// `health_page_link` and `api_documentation_link` are inserted verbatim, so
/// the caller decides whether they are markup or plain URLs.
pub fn failure_count(health_page_link: &str, api_documentation_link: &str) -> String {
	format!(
		"The number of failures after which the instance will completely prevent access to the \
		 storage. The number of failures can be reset in the admin interface: {} or using the {}.",
		health_page_link, api_documentation_link
	)
}

/// Help for `circuitbreaker_failure_wait_time`
pub const FAILURE_WAIT_TIME: &str = "When access to a storage fails, the instance will prevent \
	access to the storage for the time specified here. This allows the filesystem to recover. \
	Repositories on failing shards are temporarily unavailable.";

/// Help for `circuitbreaker_failure_reset_time`
pub const FAILURE_RESET_TIME: &str = "The time in seconds the instance will keep failure \
	information. When no failures occur during this time, information about the mount is reset.";

/// Help for `circuitbreaker_storage_timeout`
pub const STORAGE_TIMEOUT: &str = "The time in seconds the instance will try to access storage. \
	After this time a timeout error will be raised.";

/// Help text for a circuit breaker attribute, if it has a fixed one
pub fn for_attribute(name: &str) -> Option<&'static str> {
	match name {
		"circuitbreaker_failure_wait_time" => Some(FAILURE_WAIT_TIME),
		"circuitbreaker_failure_reset_time" => Some(FAILURE_RESET_TIME),
		"circuitbreaker_storage_timeout" => Some(STORAGE_TIMEOUT),
		_ => None,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_failure_count_inserts_links() {
		let text = failure_count("health page", "circuitbreaker api");
		assert!(text.contains("admin interface: health page or using the circuitbreaker api."));
	}

	#[test]
	fn test_for_attribute() {
		assert_eq!(for_attribute("circuitbreaker_storage_timeout"), Some(STORAGE_TIMEOUT));
		assert!(for_attribute("circuitbreaker_failure_count_threshold").is_none());
		assert!(!FAILURE_WAIT_TIME.contains("  "));
	}
}

// vim: ts=4
