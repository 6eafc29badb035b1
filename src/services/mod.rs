pub mod catalog_services;
pub mod in_flight;
pub mod timeline_services;

/// What a user action ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Request sent and its result applied to the view.
    Applied,
    /// Nothing sent: duplicate trigger, failed presence check or declined confirmation.
    Ignored,
    /// Request sent but failed; the user has been told.
    Failed,
}
