//! Record ID type definition.

/// Alias for the identifiers the store assigns to every row.
///
/// The store generates UUIDs, but nothing here depends on their structure so
/// they are kept as opaque strings.
pub type RecordId = String;
