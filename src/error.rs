use core::fmt;

/// Rejected construction input. The simulation cannot start without valid
/// dimensions and speeds, so these surface at startup, never mid-tick.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    ArenaTooSmall { width: f32, height: f32 },
    NonPositiveSpeed { what: &'static str, speed: f32 },
    NonFiniteAngle { angle: f32 },
    NonPositiveSize { what: &'static str, width: f32, height: f32 },
    DoesNotFit { what: &'static str },
    ZeroTickRate,
    VolumeOutOfRange { what: &'static str, volume: f32 },
    Read { path: String, message: String },
    Parse { what: &'static str, message: String },
    Serialize { what: &'static str, message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ArenaTooSmall { width, height } => {
                write!(f, "arena must have positive area, got {width}x{height}")
            }
            Self::NonPositiveSpeed { what, speed } => {
                write!(f, "{what} speed must be positive and finite, got {speed}")
            }
            Self::NonFiniteAngle { angle } => write!(f, "angle must be finite, got {angle}"),
            Self::NonPositiveSize {
                what,
                width,
                height,
            } => write!(f, "{what} size must be positive, got {width}x{height}"),
            Self::DoesNotFit { what } => write!(f, "{what} does not fit inside the arena"),
            Self::ZeroTickRate => write!(f, "tick rate must be at least 1"),
            Self::VolumeOutOfRange { what, volume } => {
                write!(f, "{what} volume must be within 0.0..=1.0, got {volume}")
            }
            Self::Read { path, message } => write!(f, "failed to read {path}: {message}"),
            Self::Parse { what, message } => write!(f, "malformed {what}: {message}"),
            Self::Serialize { what, message } => {
                write!(f, "failed to serialize {what}: {message}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
