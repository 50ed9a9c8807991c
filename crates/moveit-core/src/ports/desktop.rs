use std::process::{Command, Stdio};

use crate::challenge::ChallengeTemplate;
use crate::storage::NotificationsConfig;

use super::{Chime, Notifier};

/// Desktop notifier backed by the platform notification service.
///
/// Suppressed entirely when notifications are disabled or the install is
/// classified as a handheld profile.
pub struct DesktopNotifier {
    enabled: bool,
    mobile_profile: bool,
    permission_granted: bool,
}

impl DesktopNotifier {
    pub fn from_config(config: &NotificationsConfig) -> Self {
        Self {
            enabled: config.enabled,
            mobile_profile: config.mobile_profile,
            permission_granted: false,
        }
    }
}

impl Notifier for DesktopNotifier {
    fn request_permission(&mut self) -> bool {
        // The freedesktop and macOS services have no explicit permission
        // handshake; an enabled, non-handheld install counts as granted.
        self.permission_granted = self.enabled && !self.mobile_profile;
        self.permission_granted
    }

    fn challenge_drawn(&self, challenge: &ChallengeTemplate) {
        if !self.permission_granted {
            return;
        }
        let _ = notify_rust::Notification::new()
            .summary("New challenge")
            .body(&format!("Worth {} xp", challenge.amount))
            .appname("moveit")
            .icon("alarm-clock")
            .show();
    }
}

/// Plays the notification sound by spawning a system audio player.
pub struct DesktopChime {
    enabled: bool,
    custom_sound: Option<String>,
}

impl DesktopChime {
    pub fn from_config(config: &NotificationsConfig) -> Self {
        Self {
            enabled: config.sound,
            custom_sound: config.custom_sound.clone(),
        }
    }
}

const PLAYERS: &[(&str, &str)] = &[
    ("paplay", "/usr/share/sounds/freedesktop/stereo/complete.oga"),
    ("aplay", "/usr/share/sounds/sound-icons/prompt.wav"),
    ("afplay", "/System/Library/Sounds/Glass.aiff"),
];

impl Chime for DesktopChime {
    fn play(&self) {
        if !self.enabled {
            return;
        }
        let custom = self.custom_sound.clone();
        // Detached playback; failures never reach the state machines.
        std::thread::spawn(move || {
            if let Some(path) = custom {
                for &(player, _) in PLAYERS {
                    if spawn_player(player, &path) {
                        return;
                    }
                }
                return;
            }
            for &(player, sound) in PLAYERS {
                if std::path::Path::new(sound).exists() && spawn_player(player, sound) {
                    return;
                }
            }
        });
    }
}

fn spawn_player(player: &str, sound: &str) -> bool {
    Command::new(player)
        .arg(sound)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .is_ok()
}
