//! Service layer for business logic.
//!
//! Services operate on the plain models and hold no transport concerns; the
//! HTTP layer composes them per request.

pub mod availability_cache;
pub mod filter_store;
pub mod filtering;
pub mod map_usage;
pub mod map_view;
pub mod navigation;
pub mod opening_hours;
pub mod route_planner;

pub use availability_cache::{AvailabilityCache, CachedDecision};
pub use filter_store::{FilterStore, ViewMode};
pub use filtering::{filter_houses, house_matches, retain_favorites, retain_within_radius};
pub use map_usage::{
    AvailabilityReason, MapAvailability, MapQuotaGatekeeper, MapboxUsageClient, MonthlyUsage,
    RetryPolicy, UsageCredentials, UsageError, UsageSource,
};
pub use map_view::{MapViewConfig, MapViewport};
pub use navigation::NavigationLinks;
pub use opening_hours::{
    format_time_range, is_house_open_now, next_opening_time, opening_status, venue_local,
    OpeningStatus,
};
pub use route_planner::RoutePlanner;
