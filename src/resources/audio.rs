//! Sound bank and the channel bridge to the playback side.
//!
//! The core never touches an audio device. Gameplay writes [`AudioCmd`]
//! messages; [`crate::systems::audio::forward_audio_cmds`] drains them onto
//! the channel created by [`setup_audio`], and whoever owns the receiving
//! end (the demo binary's frame loop, nothing in tests) plays them.
//!
//! [`SoundBank`] maps logical effect names to concrete ids. A name may be a
//! single effect or a group ("sword" covering three swing variants); groups
//! resolve to a random member on each play.

use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender, unbounded};
use log::warn;
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use crate::events::audio::AudioCmd;

/// Registry of playable effect ids and group aliases.
#[derive(Resource, Default)]
pub struct SoundBank {
    effects: FxHashSet<String>,
    groups: FxHashMap<String, SmallVec<[String; 4]>>,
}

impl SoundBank {
    pub fn new() -> Self {
        SoundBank::default()
    }

    /// Register a single playable effect id.
    pub fn insert(&mut self, id: impl Into<String>) {
        self.effects.insert(id.into());
    }

    /// Register a group alias resolving to one of `members` at random.
    /// Members are registered as effects as well.
    pub fn insert_group<I, S>(&mut self, name: impl Into<String>, members: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let members: SmallVec<[String; 4]> = members.into_iter().map(Into::into).collect();
        for m in &members {
            self.effects.insert(m.clone());
        }
        self.groups.insert(name.into(), members);
    }

    /// Resolve a logical name to a concrete effect id. Unknown names log a
    /// warning and resolve to `None`; play requests for them are dropped.
    pub fn resolve(&self, name: &str) -> Option<String> {
        if let Some(members) = self.groups.get(name) {
            if members.is_empty() {
                warn!("sound group '{}' has no members", name);
                return None;
            }
            let pick = fastrand::usize(..members.len());
            return Some(members[pick].clone());
        }
        if self.effects.contains(name) {
            return Some(name.to_string());
        }
        warn!("unknown sound '{}'", name);
        None
    }

    pub fn contains(&self, name: &str) -> bool {
        self.effects.contains(name) || self.groups.contains_key(name)
    }
}

/// Sender half of the audio command channel, owned by the ECS world.
#[derive(Resource)]
pub struct AudioBridge {
    pub tx_cmd: Sender<AudioCmd>,
}

/// Create the audio command channel and register bridge resources.
///
/// Inserts [`AudioBridge`] and initializes `Messages<AudioCmd>` so systems
/// can write commands. Returns the receiver for the playback side; dropping
/// it is fine, sends are then discarded.
pub fn setup_audio(world: &mut World) -> Receiver<AudioCmd> {
    let (tx_cmd, rx_cmd) = unbounded::<AudioCmd>();

    world.insert_resource(AudioBridge { tx_cmd });
    world.insert_resource(Messages::<AudioCmd>::default());

    rx_cmd
}

/// Remove the bridge, closing the command channel.
pub fn shutdown_audio(world: &mut World) {
    world.remove_resource::<AudioBridge>();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_effect_resolves_to_itself() {
        let mut bank = SoundBank::new();
        bank.insert("jump");
        assert_eq!(bank.resolve("jump").as_deref(), Some("jump"));
    }

    #[test]
    fn test_group_resolves_to_a_member() {
        let mut bank = SoundBank::new();
        bank.insert_group("sword", ["sword1", "sword2", "sword3"]);
        for _ in 0..32 {
            let id = bank.resolve("sword").unwrap();
            assert!(["sword1", "sword2", "sword3"].contains(&id.as_str()));
        }
        assert!(bank.contains("sword"));
        assert!(bank.contains("sword2"));
    }

    #[test]
    fn test_unknown_name_resolves_to_none() {
        let bank = SoundBank::new();
        assert_eq!(bank.resolve("nope"), None);
    }
}
