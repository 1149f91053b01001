//! Best-effort player teardown.

use std::fmt;

use crate::error::PlayerError;
use crate::platform::Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseStep {
    Pause,
    Unload,
    Detach,
    Destroy,
}

impl fmt::Display for ReleaseStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pause => "pause",
            Self::Unload => "unload",
            Self::Detach => "detachMediaElement",
            Self::Destroy => "destroy",
        };
        f.write_str(name)
    }
}

/// A teardown step that failed. Never fatal.
#[derive(Debug)]
pub struct ReleaseWarning {
    pub step: ReleaseStep,
    pub error: PlayerError,
}

/// Runs pause, unload, detach and destroy in that order, whatever fails.
pub fn try_release<P: Player>(player: &mut P) -> Vec<ReleaseWarning> {
    let steps: [(ReleaseStep, fn(&mut P) -> crate::error::Result<()>); 4] = [
        (ReleaseStep::Pause, P::pause),
        (ReleaseStep::Unload, P::unload),
        (ReleaseStep::Detach, P::detach_media_element),
        (ReleaseStep::Destroy, P::destroy),
    ];

    steps
        .into_iter()
        .filter_map(|(step, run)| run(player).err().map(|error| ReleaseWarning { step, error }))
        .collect()
}
