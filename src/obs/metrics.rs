// self
use crate::obs::{OperationKind, OperationOutcome};

/// Counter incremented once per operation attempt and once per outcome.
pub const OPERATION_COUNTER: &str = "ups_shipping_operation_total";

/// Label pairs attached to [`OPERATION_COUNTER`].
pub fn operation_labels(
	kind: OperationKind,
	outcome: OperationOutcome,
) -> [(&'static str, &'static str); 2] {
	[("operation", kind.as_str()), ("outcome", outcome.as_str())]
}

/// Bumps [`OPERATION_COUNTER`] on the installed recorder; a no-op without the `metrics` feature.
pub fn record_operation_outcome(kind: OperationKind, outcome: OperationOutcome) {
	let labels = operation_labels(kind, outcome);

	#[cfg(feature = "metrics")]
	metrics::counter!(OPERATION_COUNTER, &labels).increment(1);
	#[cfg(not(feature = "metrics"))]
	let _ = labels;
}
