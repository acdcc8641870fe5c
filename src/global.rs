pub const LOG_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/logs");
pub const CRASH_LOG: &str = "crash.log";
pub const LATEST_LOG: &str = "latest.log";

/// Default ECS threshold applied by the filter pipeline when the caller omits
/// `ecs_score_threshold`.
pub const DEFAULT_ECS_THRESHOLD: f64 = 0.3;
/// Default distance-matrix batch size: one origin, up to this many destinations per call.
pub const MAX_MATRIX_BATCH: usize = 25;
/// Sentinel minutes returned by the travel-time provider for an unreachable pair.
pub const UNREACHABLE_ETA_MINUTES: f64 = 9999.0;
/// Average speed assumed by the haversine travel-time fallback.
pub const FALLBACK_KMH: f64 = 30.0;
/// Default number of activities to place per day in the clustering allocator.
pub const DEFAULT_POIS_PER_DAY: usize = 3;
/// Maximum deferred-retry rounds per day in the sequencer.
pub const MAX_RETRY_ROUNDS: u32 = 3;
/// Maximum forward time jumps per day in the sequencer.
pub const MAX_TIME_JUMPS: u32 = 2;
/// Maximum horizon, in hours, for a single forward time jump.
pub const MAX_JUMP_HOURS: i64 = 4;
