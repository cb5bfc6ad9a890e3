//! Shared state types for the orb: mode, quality tier and event payloads.
//!
//! These types avoid referencing platform-specific APIs and are shared by the
//! simulation, the controller and the web frontend.

use crate::constants::*;
use crate::error::{OrbError, OrbResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What the orb is currently expressing. Exactly one is active per controller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrbMode {
    #[default]
    Idle,
    Listening,
    Speaking,
    Thinking,
}

impl OrbMode {
    pub fn as_str(self) -> &'static str {
        match self {
            OrbMode::Idle => "idle",
            OrbMode::Listening => "listening",
            OrbMode::Speaking => "speaking",
            OrbMode::Thinking => "thinking",
        }
    }

    /// Parse a mode name; unknown names fall back to `Idle`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "listening" => OrbMode::Listening,
            "speaking" => OrbMode::Speaking,
            "thinking" => OrbMode::Thinking,
            _ => OrbMode::Idle,
        }
    }

    #[inline]
    pub fn noise_scale(self) -> f32 {
        match self {
            OrbMode::Thinking => NOISE_SCALE_THINKING,
            _ => NOISE_SCALE_DEFAULT,
        }
    }

    #[inline]
    pub fn swirl(self) -> f32 {
        match self {
            OrbMode::Listening => SWIRL_LISTENING,
            OrbMode::Speaking => SWIRL_SPEAKING,
            _ => SWIRL_DEFAULT,
        }
    }

    #[inline]
    pub fn flow_bonus(self) -> f32 {
        match self {
            OrbMode::Speaking => FLOW_SPEAKING_BONUS,
            _ => 0.0,
        }
    }
}

impl fmt::Display for OrbMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Particle-count budget trading visual density for CPU cost.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    Low,
    #[default]
    Medium,
    High,
}

impl Quality {
    pub fn budget(self) -> usize {
        match self {
            Quality::Low => QUALITY_BUDGET_LOW,
            Quality::Medium => QUALITY_BUDGET_MEDIUM,
            Quality::High => QUALITY_BUDGET_HIGH,
        }
    }
}

/// Application-level event kinds an orb reacts to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OrbEventKind {
    Question,
    Answer,
    Error,
    Other(String),
}

impl OrbEventKind {
    pub fn parse(kind: &str) -> Self {
        match kind {
            "question" => OrbEventKind::Question,
            "answer" => OrbEventKind::Answer,
            "error" => OrbEventKind::Error,
            other => OrbEventKind::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            OrbEventKind::Question => "question",
            OrbEventKind::Answer => "answer",
            OrbEventKind::Error => "error",
            OrbEventKind::Other(s) => s,
        }
    }

    /// Mode a controller switches to when it ingests this kind.
    pub fn target_mode(&self) -> OrbMode {
        match self {
            OrbEventKind::Question => OrbMode::Listening,
            OrbEventKind::Answer => OrbMode::Speaking,
            OrbEventKind::Error => OrbMode::Thinking,
            OrbEventKind::Other(_) => OrbMode::Idle,
        }
    }
}

/// Payload of the `"echo:orb"` bus event: `{ "type": "question" }`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrbEvent {
    #[serde(rename = "type")]
    pub kind: String,
}

impl OrbEvent {
    pub fn new(kind: impl Into<String>) -> Self {
        Self { kind: kind.into() }
    }

    pub fn kind(&self) -> OrbEventKind {
        OrbEventKind::parse(&self.kind)
    }

    /// Parse an event detail serialized as JSON. Anything that is not an
    /// object with a string `type` is rejected.
    pub fn from_json(detail: &str) -> OrbResult<Self> {
        let value: serde_json::Value =
            serde_json::from_str(detail).map_err(|e| OrbError::MalformedEvent(e.to_string()))?;
        if !value.is_object() {
            return Err(OrbError::MalformedEvent("detail is not an object".into()));
        }
        serde_json::from_value(value).map_err(|e| OrbError::MalformedEvent(e.to_string()))
    }

    pub fn to_json(&self) -> String {
        // a single string field always serializes
        serde_json::to_string(self).unwrap_or_else(|_| String::from("{}"))
    }
}
