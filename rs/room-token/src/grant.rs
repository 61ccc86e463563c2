use serde::{Deserialize, Serialize};

/// The capabilities granted to the bearer of a token.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Grants {
	/// The name the participant presents when joining a room.
	pub identity: String,

	/// Permission to join a video room.
	pub video: VideoGrant,
}

impl Grants {
	pub fn new(identity: impl Into<String>, room: impl Into<String>) -> Self {
		Self {
			identity: identity.into(),
			video: VideoGrant::new(room),
		}
	}
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct VideoGrant {
	/// The room the bearer may join.
	pub room: String,

	#[serde(default)]
	pub room_type: RoomType,
}

impl VideoGrant {
	pub fn new(room: impl Into<String>) -> Self {
		Self {
			room: room.into(),
			room_type: RoomType::Group,
		}
	}
}

/// How media is routed within the room.
///
/// Only group rooms are issued; the platform routes media through its own servers.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RoomType {
	#[default]
	Group,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn serialize() {
		let grants = Grants::new("user-0042", "group-video-room");
		let json = serde_json::to_value(&grants).unwrap();

		assert_eq!(
			json,
			serde_json::json!({
				"identity": "user-0042",
				"video": {
					"room": "group-video-room",
					"room_type": "group",
				},
			})
		);
	}

	#[test]
	fn missing_room_type() {
		let grants: Grants = serde_json::from_str(r#"{"identity":"a","video":{"room":"b"}}"#).unwrap();
		assert_eq!(grants.video.room_type, RoomType::Group);
	}
}
