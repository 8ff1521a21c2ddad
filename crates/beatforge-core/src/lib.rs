pub mod beatmap;
pub mod config;
pub mod error;
pub mod generator;
pub mod hit_object;
pub mod score;
pub mod session;
pub mod storage;

pub use beatmap::{
    Beatmap, BeatmapDifficulty, BeatmapMetadata, BeatmapPattern, BeatmapSummary,
    BeatmapTimingPoint, MirrorAxis,
};
pub use config::Config;
pub use error::{Error, Result};
pub use generator::{BeatmapFactory, CreateBeatmapParams, GenerationStrategy, GeneratorStyle};
pub use hit_object::{HitObject, HitObjectKind, HitResult, HitResultType, Position};
pub use score::{Grade, HitCounts, Score, SessionStats};
pub use session::{GameSession, PlayRecord, SessionState};
pub use storage::{
    BeatmapStore, JsonBeatmapStore, MemoryBeatmapStore, MemorySessionStore, RecordLog,
    SessionStore,
};
