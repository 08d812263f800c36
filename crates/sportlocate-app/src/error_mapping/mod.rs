//! Maps service errors to sportlocate_core::AppError for consistent user-facing messages.

mod venue;
mod weather;
