//! Application constants.
//!
//! Centralizes magic numbers and configuration values for better maintainability.

/// Song recency thresholds, in whole days since the last performance.
pub mod recency {
    /// Below this many days a song is `Recent`.
    pub const RECENT_DAYS: i64 = 30;

    /// Below this many days a song is `Moderate`.
    pub const MODERATE_DAYS: i64 = 90;

    /// Below this many days a song is `LongAgo`; at or above, `VeryLongAgo`.
    pub const LONG_AGO_DAYS: i64 = 180;
}

/// Song catalog search constants.
pub mod search {
    /// Maximum number of songs offered by the song picker.
    pub const MAX_SONG_RESULTS: usize = 20;

    /// Minimum skim score for a fuzzy song name match.
    pub const MIN_FUZZY_SCORE: i64 = 50;
}

/// Standard order of service used when no template file is configured.
pub mod template {
    /// `(type, default description, allows song, song slot count)` per moment.
    pub const STANDARD_ORDER: &[(&str, Option<&str>, bool, u32)] = &[
        ("Prelude", None, true, 1),
        ("Call to Worship", None, false, 1),
        ("Congregational Song", None, true, 3),
        ("Prayer", Some("Pastoral prayer"), false, 1),
        ("Scripture Reading", None, false, 1),
        ("Offering", None, false, 1),
        ("Special Music", None, true, 1),
        ("Sermon", None, false, 1),
        ("Congregational Song", Some("Response"), true, 1),
        ("Benediction", None, false, 1),
        ("Postlude", None, true, 1),
    ];
}

/// Store constants.
pub mod store {
    /// File name of the JSON store under the data directory.
    pub const DATA_FILE_NAME: &str = "liturgy.json";

    /// Application directory name under the platform data directory.
    pub const DATA_DIR_NAME: &str = "liturgy";
}
