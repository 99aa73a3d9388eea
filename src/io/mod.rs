/// CSV export of decision records.
pub mod export;
